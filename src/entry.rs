use crate::date::{normalize_entry_date, DateParseError, DATE_STORED_FORMAT};
use crate::{Record, CSV_FILENAME, VERSION};
use chrono::prelude::*;
use clap::{App, Arg};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The seven raw strings of one entry, as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub date: String,
    pub weight: String,
    pub fat_pct: String,
    pub muscle: String,
    pub calories: String,
    pub metabolic_age: String,
    pub visceral_fat: String,
}

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("please fill all fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("{field} is not a valid number: {value:?}")]
    BadNumber { field: &'static str, value: String },
    #[error(transparent)]
    BadDate(#[from] DateParseError),
}

/// Takes the CLI arguments for one health entry.
pub fn parse_cli_entry() -> (PathBuf, bool, RawEntry) {
    let today = Local::now().format(DATE_STORED_FORMAT).to_string();
    let arg_csvfile = Arg::with_name("csvfile")
        .help("name for the csv file")
        .short("o")
        .long("csvfile")
        .takes_value(true)
        .required(true)
        .default_value(CSV_FILENAME);
    let arg_date = Arg::with_name("date")
        .help("date of the measurements, YYYY-MM-DD; DD/MM/YYYY and YYYY/MM/DD are also accepted")
        .short("d")
        .long("date")
        .takes_value(true)
        .default_value(&today);
    let arg_weight = Arg::with_name("weight")
        .help("body weight, kg")
        .short("w")
        .long("weight")
        .takes_value(true)
        .required_unless("locate");
    let arg_fat = Arg::with_name("fat")
        .help("fat mass, percentage of the body weight")
        .short("f")
        .long("fat")
        .takes_value(true)
        .required_unless("locate");
    let arg_muscle = Arg::with_name("muscle")
        .help("muscle mass, kg")
        .short("m")
        .long("muscle")
        .takes_value(true)
        .required_unless("locate");
    let arg_calories = Arg::with_name("calories")
        .help("daily calories, kcal")
        .short("c")
        .long("calories")
        .takes_value(true)
        .required_unless("locate");
    let arg_metabolic_age = Arg::with_name("metabolic_age")
        .help("metabolic age, years")
        .short("a")
        .long("metabolic-age")
        .takes_value(true)
        .required_unless("locate");
    let arg_visceral_fat = Arg::with_name("visceral_fat")
        .help("visceral fat rating")
        .short("v")
        .long("visceral-fat")
        .takes_value(true)
        .required_unless("locate");
    let arg_locate = Arg::with_name("locate")
        .help("print and open the folder containing the csv file, nothing is saved")
        .long("locate")
        .takes_value(false);
    let cli_args = App::new("log health metrics")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to append dated health measurements to the csv store")
        .arg(arg_csvfile)
        .arg(arg_date)
        .arg(arg_weight)
        .arg(arg_fat)
        .arg(arg_muscle)
        .arg(arg_calories)
        .arg(arg_metabolic_age)
        .arg(arg_visceral_fat)
        .arg(arg_locate)
        .get_matches();
    let val_csvfile = PathBuf::from(cli_args.value_of("csvfile").unwrap_or_default());
    let val_locate = cli_args.is_present("locate");
    let raw = RawEntry {
        date: String::from(cli_args.value_of("date").unwrap_or_default()),
        weight: String::from(cli_args.value_of("weight").unwrap_or_default()),
        fat_pct: String::from(cli_args.value_of("fat").unwrap_or_default()),
        muscle: String::from(cli_args.value_of("muscle").unwrap_or_default()),
        calories: String::from(cli_args.value_of("calories").unwrap_or_default()),
        metabolic_age: String::from(cli_args.value_of("metabolic_age").unwrap_or_default()),
        visceral_fat: String::from(cli_args.value_of("visceral_fat").unwrap_or_default()),
    };
    return (val_csvfile, val_locate, raw);
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, EntryError> {
    match value.parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) => Err(EntryError::BadNumber {
            field,
            value: String::from(value),
        }),
    }
}

/// Validates the raw entry and derives the stored record. All seven fields
/// must be non-empty; the fat percentage is converted to mass in kg from
/// the entered weight and is not stored itself.
pub fn build_record(raw: &RawEntry) -> Result<Record, EntryError> {
    let date = raw.date.trim();
    let weight = raw.weight.trim();
    let fat_pct = raw.fat_pct.trim();
    let muscle = raw.muscle.trim();
    let calories = raw.calories.trim();
    let metabolic_age = raw.metabolic_age.trim();
    let visceral_fat = raw.visceral_fat.trim();
    let mut missing: Vec<String> = Vec::new();
    for &(name, value) in [
        ("date", date),
        ("weight_kg", weight),
        ("fat_kg", fat_pct),
        ("muscle_mass_kg", muscle),
        ("calories_kcal", calories),
        ("metabolic_age", metabolic_age),
        ("visceral_fat", visceral_fat),
    ]
    .iter()
    {
        if value.is_empty() {
            missing.push(String::from(name));
        }
    }
    if !missing.is_empty() {
        return Err(EntryError::MissingFields(missing));
    }
    let date = normalize_entry_date(date)?;
    let weight_kg = parse_number("weight_kg", weight)?;
    let fat_kg = weight_kg * parse_number("fat_kg", fat_pct)? / 100f64;
    let muscle_kg = parse_number("muscle_mass_kg", muscle)?;
    let kcal = parse_number("calories_kcal", calories)?;
    let meta_age = parse_number("metabolic_age", metabolic_age)? as i64;
    let vfat = parse_number("visceral_fat", visceral_fat)? as i64;
    Ok(Record {
        date,
        weight_kg: format!("{:.3}", weight_kg),
        fat_kg: format!("{:.3}", fat_kg),
        muscle_mass_kg: format!("{:.3}", muscle_kg),
        calories_kcal: format!("{:.0}", kcal),
        metabolic_age: meta_age.to_string(),
        visceral_fat: vfat.to_string(),
    })
}

/// Opens the folder containing the csv file in the platform file manager,
/// fire and forget.
pub fn open_csv_location(folder: &Path) {
    let opener = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    match std::process::Command::new(opener).arg(folder).spawn() {
        Ok(_) => {}
        Err(e) => println!(
            "could not open the file manager at {}, error: {}",
            folder.display(),
            e
        ),
    }
}
