use super::{CSV_FILENAME, METRIC_FIELDS, VERSION};
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of the health time series.
pub fn parse_cli_plot() -> (PathBuf, PathBuf, Vec<String>) {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name for the csv file")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .required(true)
        .default_value(CSV_FILENAME);
    let arg_svgout = Arg::with_name("output_svgfile")
        .help("name of the output svg file")
        .short("o")
        .long("svgfile")
        .takes_value(true);
    let arg_metrics = Arg::with_name("metrics")
        .help("metrics to plot, comma separated")
        .short("m")
        .long("metrics")
        .takes_value(true)
        .multiple(true)
        .use_delimiter(true)
        .possible_values(&METRIC_FIELDS);
    let cli_args = App::new("plot health metrics")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the health metrics time series")
        .arg(arg_csvin)
        .arg(arg_svgout)
        .arg(arg_metrics)
        .get_matches();
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or_default());
    let svgout = match cli_args.value_of("output_svgfile") {
        Some(p) => PathBuf::from(p),
        None => {
            let mut svgout = csvin.clone();
            svgout.set_extension("svg");
            svgout
        }
    };
    let metrics: Vec<String> = match cli_args.values_of("metrics") {
        Some(vals) => vals.map(String::from).collect(),
        None => vec![String::from("weight_kg"), String::from("fat_kg")],
    };
    return (csvin, svgout, metrics);
}
