use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

mod cli;
mod daily;
mod error;
mod owm;
mod report;
mod weather;

use crate::cli::Args;
use crate::error::Error;
use crate::owm::Fetcher;
use crate::weather::ForecastReport;

fn get_forecast(args: &Args, city: &str) -> Result<ForecastReport, Error> {
    let fetcher = Fetcher::new(args.fetcher_config())?;
    let forecast = fetcher.fetch(city)?;
    let report = daily::build_report(forecast)?;
    info!(
        "{} samples summarized into {} days for {}",
        report.days.iter().map(|day| day.samples).sum::<usize>(),
        report.days.len(),
        report.city
    );
    Ok(report)
}

fn run(args: &Args) -> Result<(), Error> {
    let city = args.city(&mut io::stdin().lock(), &mut io::stdout())?;
    let report = get_forecast(args, &city)?;

    print_report(&mut io::stdout().lock(), &report, !args.no_color)
}

fn print_report<W: Write>(out: &mut W, report: &ForecastReport, color: bool) -> Result<(), Error> {
    writeln!(out)
        .and_then(|()| report::write_report(out, report, color))
        .map_err(Error::Output)
}

fn main() -> ExitCode {
    cli::load_dotenv();
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_env("RUST_LOG")
        .init();

    let result = run(&args);
    if let Err(ref err) = result {
        debug!("{:?} failure: {err:?}", err.kind());
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ Error::Http(_)) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
