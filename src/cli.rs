use std::io::{BufRead, Write};

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;
use log::LevelFilter;

use crate::error::Error;
use crate::owm::{FetcherConfig, BASE_URL};

const ABOUT: &str = "Daily weather forecast summaries from OpenWeatherMap";

const LONG_ABOUT: &str = "
Fetches the 5 day / 3 hour forecast for a city from OpenWeatherMap and prints one summary per
day: minimum and maximum temperature, the most frequent description, average humidity and
average wind speed.

The API key is read from --api-key, the API_KEY environment variable or an API_KEY entry in a
.env file. When no city is given on the command line, it is asked for interactively.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

/// Loads a `.env` file from the working directory (or a parent) into the
/// process environment so `API_KEY` can be kept there. A missing file is fine.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

const PROMPT: &str = "Enter the city name to get the weather forecast: ";

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "City name (e.g. \"São Paulo\", \"Lisbon,PT\")")]
    pub city: Option<String>,

    #[arg(long, env = "API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    #[arg(long, default_value = "en", help = "Language of the weather descriptions")]
    pub lang: String,

    #[arg(long, default_value = BASE_URL, hide = true)]
    pub endpoint: String,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

impl Args {
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            lang: self.lang.clone(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// City from the command line, or one line asked for on `input`.
    pub fn city<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        prompt: &mut W,
    ) -> Result<String, Error> {
        let city = match self.city {
            Some(ref city) => city.clone(),
            None => {
                write!(prompt, "\n{PROMPT}")?;
                prompt.flush()?;
                let mut line = String::new();
                input.read_line(&mut line)?;
                line
            }
        };

        let city = city.trim();
        if city.is_empty() {
            return Err(Error::EmptyCity);
        }
        Ok(city.to_string())
    }
}
