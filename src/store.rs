use crate::{Record, FIELDNAMES};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The csv store behind one backing file; the path is fixed at construction
/// and every operation opens and closes the file on its own.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: PathBuf) -> RecordStore {
        RecordStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The folder containing the csv file.
    pub fn location(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Idempotent schema check. Creates the file header-only when absent;
    /// on a header mismatch every row is reprojected onto the canonical
    /// columns (missing fields empty, extra columns dropped) and the whole
    /// file is rewritten. A malformed header counts as a mismatch, not as
    /// an error.
    pub fn ensure_schema(&self) -> std::io::Result<()> {
        if !self.path.exists() {
            let file = File::create(&self.path)?;
            let mut buf = BufWriter::new(file);
            buf.write_all(format!("{}\n", FIELDNAMES.join(",")).as_bytes())?;
            buf.flush()?;
            return Ok(());
        }
        let file = File::open(&self.path)?;
        let mut buf = BufReader::new(file);
        let mut header = String::new();
        buf.read_line(&mut header)?;
        let current: Vec<String> = header
            .trim_end()
            .split(',')
            .map(String::from)
            .collect();
        if current == FIELDNAMES {
            return Ok(());
        }
        println!(
            "upgrading csvfile {} to the canonical columns",
            self.path.display()
        );
        let mut upgraded: Vec<String> = Vec::new();
        for l in buf.lines() {
            let l = l?;
            if l.is_empty() {
                continue;
            }
            let cells: Vec<&str> = l.split(',').collect();
            let projected: Vec<&str> = FIELDNAMES
                .iter()
                .map(|&f| match current.iter().position(|c| c.as_str() == f) {
                    Some(i) => cells.get(i).copied().unwrap_or(""),
                    None => "",
                })
                .collect();
            upgraded.push(projected.join(","));
        }
        let file = File::create(&self.path)?;
        let mut buf = BufWriter::new(file);
        buf.write_all(format!("{}\n", FIELDNAMES.join(",")).as_bytes())?;
        for row in upgraded {
            buf.write_all(format!("{}\n", row).as_bytes())?;
        }
        buf.flush()?;
        Ok(())
    }

    /// Reads every non-blank row in file order, no sorting; an absent file
    /// reads as empty rather than as an error.
    pub fn read_all(&self) -> std::io::Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        let buf = BufReader::new(file);
        let mut records: Vec<Record> = Vec::new();
        for l in buf.lines().skip(1) {
            let l = l?;
            if l.is_empty() {
                continue;
            }
            let record = Record::from_csv_line(&l);
            if record.is_blank() {
                continue;
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Appends one row in canonical column order; assumes `ensure_schema`
    /// has already run.
    pub fn append(&self, record: &Record) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        write!(file, "{}\n", record.to_csv_row())?;
        Ok(())
    }
}
