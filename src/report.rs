use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::weather::{DailySummary, ForecastReport};

const LABEL_WIDTH: usize = 13;

fn header(report: &ForecastReport) -> String {
    format!("Forecast for {}, {}:", report.city, report.country)
}

fn rows(day: &DailySummary) -> [(&'static str, String); 5] {
    [
        ("Date", day.date.format("%d/%m/%Y").to_string()),
        ("Description", day.description.clone()),
        (
            "Temperature",
            format!(
                "Min: {}°C | Max: {}°C",
                celsius(day.temp_min),
                celsius(day.temp_max)
            ),
        ),
        ("Humidity", format!("{:.1}%", day.humidity)),
        ("Wind speed", format!("{:.1} m/s", day.wind_speed)),
    ]
}

/// Whole degrees keep their decimal point: `12.0`, not `12`.
fn celsius(value: f64) -> String {
    format!("{value:?}")
}

pub fn write_report<W: Write>(
    out: &mut W,
    report: &ForecastReport,
    color: bool,
) -> io::Result<()> {
    if color {
        writeln!(out, "{}", header(report).yellow().bold())?;
    } else {
        writeln!(out, "{}", header(report))?;
    }

    for day in &report.days {
        writeln!(out)?;
        for (label, value) in rows(day) {
            let label = format!("{:LABEL_WIDTH$}", format!("{label}:"));
            if color {
                writeln!(out, "{label}{}", value.green())?;
            } else {
                writeln!(out, "{label}{value}")?;
            }
        }
    }
    Ok(())
}
