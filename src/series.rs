use crate::date::parse_date;
use crate::{min_and_max, suitable_xfmt, Record};
use chrono::prelude::*;
use plotters::prelude::*;
use std::path::PathBuf;

/// One metric column as a plottable numeric sequence; unparsable cells are
/// kept as NAN so all series stay aligned with the x axis.
#[derive(Debug, Clone)]
pub struct MetricSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// The date-aligned series for the selected metrics.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    pub time: Vec<NaiveDateTime>,
    pub series: Vec<MetricSeries>,
    pub skipped: usize,
}

impl TimeSeries {
    /// Builds the aligned series from date-sorted records. A record whose
    /// date does not parse is dropped from every series and counted in
    /// `skipped`; a cell that does not parse as a number becomes NAN in its
    /// own series only.
    pub fn from_records(records: &[Record], metrics: &[String]) -> TimeSeries {
        let mut timeseries = TimeSeries {
            time: Vec::with_capacity(records.len()),
            series: metrics
                .iter()
                .map(|m| MetricSeries {
                    name: m.clone(),
                    values: Vec::with_capacity(records.len()),
                })
                .collect(),
            skipped: 0,
        };
        for record in records {
            let dt = match parse_date(&record.date) {
                Ok(dt) => dt,
                Err(_) => {
                    timeseries.skipped += 1;
                    continue;
                }
            };
            timeseries.time.push(dt);
            for s in timeseries.series.iter_mut() {
                let cell = record.metric(&s.name).unwrap_or("").trim();
                s.values.push(cell.parse().unwrap_or(f64::NAN));
            }
        }
        timeseries
    }

    /// Fewer than two usable rows; the caller should warn but still plot.
    pub fn has_too_few_points(&self) -> bool {
        self.time.len() < 2
    }

    /// Plots the selected metrics over time to svg, one labelled line per
    /// metric, breaking each line at NAN cells instead of drawing through
    /// them.
    pub fn plot_datetime(&self, fout: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let (xmindt, xmaxdt): (NaiveDateTime, NaiveDateTime) = min_and_max(&self.time[..]);
        let mut xspan: chrono::Duration = xmaxdt - xmindt;
        if xspan == chrono::Duration::zero() {
            // single usable point, give the axis something to span
            xspan = chrono::Duration::hours(24);
        }
        let xmargin: chrono::Duration = xspan / 20;
        let xmindt = xmindt - xmargin;
        let xmaxdt = xmaxdt + xmargin;
        let xminlocal = TimeZone::from_utc_datetime(&Utc, &xmindt);
        let xmaxlocal = TimeZone::from_utc_datetime(&Utc, &xmaxdt);
        let xfmt = suitable_xfmt(xspan);
        let finite: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.values.iter())
            .copied()
            .filter(|v| !v.is_nan())
            .collect();
        let (mut ymin, mut ymax) = if finite.is_empty() {
            (0f64, 1f64)
        } else {
            min_and_max(&finite[..])
        };
        let yspan = (ymax - ymin) / 10f64;
        if yspan == 0f64 {
            ymin -= 1f64;
            ymax += 1f64;
        } else {
            ymin -= yspan;
            ymax += yspan;
        }
        let root = SVGBackend::new(&fout, (1600, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("health metrics over time", ("sans-serif", 32))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xminlocal..xmaxlocal, ymin..ymax)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 24))
            .y_desc("value")
            .x_labels(14) // max number of labels
            .x_label_formatter(&|x: &DateTime<Utc>| x.format(xfmt).to_string())
            .y_label_formatter(&|x: &f64| format!("{:5}", x))
            .x_desc(format!("date [{}]", xfmt.replace("%", "")))
            .draw()?;

        for (i, s) in self.series.iter().enumerate() {
            let color = Palette99::pick(i);
            let mut labelled = false;
            let viter = &mut s.values[..].split(|v| v.is_nan());
            let titer = &mut self.time[..].iter();
            for vchunk in viter.into_iter() {
                if vchunk.is_empty() {
                    titer.next();
                    continue;
                }
                // zip consumes one extra timestamp, the slot of the NAN
                // separator that closed this chunk
                let points: Vec<(DateTime<Utc>, f64)> = titer
                    .zip(vchunk)
                    .map(|(t, v)| (TimeZone::from_utc_datetime(&Utc, t), *v))
                    .collect();
                let line = LineSeries::new(points.iter().copied(), color.stroke_width(3));
                if labelled {
                    chart.draw_series(line)?;
                } else {
                    chart
                        .draw_series(line)?
                        .label(s.name.replace("_", " "))
                        .legend(move |(x, y)| {
                            PathElement::new(
                                vec![(x, y), (x + 20, y)],
                                Palette99::pick(i).stroke_width(3),
                            )
                        });
                    labelled = true;
                }
                chart.draw_series(
                    points
                        .iter()
                        .map(|&(t, v)| Circle::new((t, v), 4, color.filled())),
                )?;
            }
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .label_font(("sans-serif", 24))
            .draw()?;
        Ok(())
    }
}
