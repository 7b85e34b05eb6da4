use health_lpp::entry::{build_record, open_csv_location, parse_cli_entry};
use health_lpp::RecordStore;

fn main() {
    let (csvfile, locate, raw) = parse_cli_entry();
    let store = RecordStore::new(csvfile);
    if locate {
        let folder = store.location();
        println!("csv folder: {}", folder.display());
        open_csv_location(&folder);
        return;
    }
    if let Err(e) = store.ensure_schema() {
        println!(
            "could not prepare csvfile {}, error: {}",
            store.path().display(),
            e
        );
        std::process::exit(1);
    }
    let record = match build_record(&raw) {
        Ok(r) => r,
        Err(e) => {
            println!("entry rejected: {}", e);
            std::process::exit(1);
        }
    };
    match store.append(&record) {
        Ok(()) => println!("appended {} to {}", record, store.path().display()),
        Err(e) => {
            println!(
                "could not write to csvfile {}, error: {}",
                store.path().display(),
                e
            );
            std::process::exit(1);
        }
    }
}
