pub mod date;
pub mod entry;
pub mod plot;
pub mod series;
pub mod store;

pub use series::TimeSeries;
pub use store::RecordStore;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const CSV_FILENAME: &str = "health_data.csv";

/// Canonical column order of the csv store; every persisted row conforms to it.
pub const FIELDNAMES: [&str; 7] = [
    "date",
    "weight_kg",
    "fat_kg",
    "muscle_mass_kg",
    "calories_kcal",
    "metabolic_age",
    "visceral_fat",
];

/// The six plottable columns, canonical order without the date.
pub const METRIC_FIELDS: [&str; 6] = [
    "weight_kg",
    "fat_kg",
    "muscle_mass_kg",
    "calories_kcal",
    "metabolic_age",
    "visceral_fat",
];

/// One row of the csv store, every field kept as the text that was written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub date: String,
    pub weight_kg: String,
    pub fat_kg: String,
    pub muscle_mass_kg: String,
    pub calories_kcal: String,
    pub metabolic_age: String,
    pub visceral_fat: String,
}

impl Record {
    /// Splits one csv line positionally on the canonical column order,
    /// missing trailing cells become empty fields.
    pub fn from_csv_line(line: &str) -> Record {
        let mut cells = line.split(',');
        let mut cell = || String::from(cells.next().unwrap_or(""));
        Record {
            date: cell(),
            weight_kg: cell(),
            fat_kg: cell(),
            muscle_mass_kg: cell(),
            calories_kcal: cell(),
            metabolic_age: cell(),
            visceral_fat: cell(),
        }
    }

    pub fn to_csv_row(&self) -> String {
        self.fields().join(",")
    }

    /// The field values in canonical column order.
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.date,
            &self.weight_kg,
            &self.fat_kg,
            &self.muscle_mass_kg,
            &self.calories_kcal,
            &self.metabolic_age,
            &self.visceral_fat,
        ]
    }

    /// Looks up one of the six metric cells by its canonical column name.
    pub fn metric(&self, name: &str) -> Option<&str> {
        match name {
            "weight_kg" => Some(&self.weight_kg),
            "fat_kg" => Some(&self.fat_kg),
            "muscle_mass_kg" => Some(&self.muscle_mass_kg),
            "calories_kcal" => Some(&self.calories_kcal),
            "metabolic_age" => Some(&self.metabolic_age),
            "visceral_fat" => Some(&self.visceral_fat),
            _ => None,
        }
    }

    /// A row is blank iff every field trims to the empty string.
    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|c| c.trim().is_empty())
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_csv_row())
    }
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> (T, T) {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => panic!("could not iterate over slice"),
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    return (min, max);
}

pub fn suitable_xfmt(d: chrono::Duration) -> &'static str {
    let xfmt = if d > chrono::Duration::weeks(12) {
        "%Y-%m"
    } else if d > chrono::Duration::weeks(1) {
        "%y-%m-%d"
    } else if d > chrono::Duration::days(1) {
        "%m-%d %H"
    } else {
        "%d %H:%M"
    };
    return xfmt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_line_splits_on_canonical_order() {
        let r = Record::from_csv_line("2024-01-05,70.000,14.000,55.500,2100,30,7");
        assert_eq!(r.date, "2024-01-05");
        assert_eq!(r.weight_kg, "70.000");
        assert_eq!(r.visceral_fat, "7");
    }

    #[test]
    fn short_csv_line_pads_missing_cells() {
        let r = Record::from_csv_line("2024-01-05,70.000");
        assert_eq!(r.weight_kg, "70.000");
        assert_eq!(r.fat_kg, "");
        assert_eq!(r.visceral_fat, "");
    }

    #[test]
    fn blank_row_detection_trims_whitespace() {
        assert!(Record::from_csv_line(",,,,,,").is_blank());
        assert!(Record::from_csv_line(" , ,,  ,,,").is_blank());
        assert!(!Record::from_csv_line("2024-01-05,,,,,,").is_blank());
    }

    #[test]
    fn metric_lookup_rejects_unknown_names() {
        let r = Record::from_csv_line("2024-01-05,70.000,14.000,55.500,2100,30,7");
        assert_eq!(r.metric("muscle_mass_kg"), Some("55.500"));
        assert_eq!(r.metric("date"), None);
        assert_eq!(r.metric("bogus"), None);
    }
}
