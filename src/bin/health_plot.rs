use health_lpp::date::sort_by_date;
use health_lpp::plot::parse_cli_plot;
use health_lpp::{RecordStore, TimeSeries};

fn main() {
    let (csvin, svgout, metrics) = parse_cli_plot();
    println!(
        "read data from {} and plot to {}",
        csvin.display(),
        svgout.display()
    );
    let store = RecordStore::new(csvin);
    if let Err(e) = store.ensure_schema() {
        println!(
            "could not prepare csvfile {}, error: {}",
            store.path().display(),
            e
        );
        std::process::exit(1);
    }
    let mut records = match store.read_all() {
        Ok(r) => r,
        Err(e) => {
            println!(
                "could not read csvfile {}, error: {}",
                store.path().display(),
                e
            );
            std::process::exit(1);
        }
    };
    if records.is_empty() {
        println!("no data to plot yet, save an entry first");
        std::process::exit(1);
    }
    sort_by_date(&mut records);
    let timeseries = TimeSeries::from_records(&records, &metrics);
    println!(
        "plotting {} points; skipped {} rows due to bad dates",
        timeseries.time.len(),
        timeseries.skipped
    );
    if timeseries.time.is_empty() {
        println!("no rows with a usable date, nothing to plot");
        std::process::exit(1);
    }
    if timeseries.has_too_few_points() {
        println!(
            "only {} usable row(s) found, check the csv dates and values",
            timeseries.time.len()
        );
    }
    if let Err(e) = timeseries.plot_datetime(svgout) {
        println!("could not plot the time series, error: {}", e);
        std::process::exit(1);
    }
}
