use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::Error;

pub const BASE_URL: &str = "http://api.openweathermap.org/data/2.5/forecast";

const UNITS: &str = "metric";
const NOT_FOUND: &str = "city not found";

pub mod forecast {
    use serde::Deserialize;

    use crate::error::Error;
    use crate::weather::ForecastSample;

    #[derive(Deserialize, Debug)]
    pub struct Forecast {
        pub city: City,

        pub list: Vec<Entry>,
    }

    #[derive(Deserialize, Debug)]
    pub struct City {
        pub name: String,

        pub country: String,
    }

    #[derive(Deserialize, Debug)]
    pub struct Entry {
        pub dt_txt: String,

        pub main: Main,

        pub wind: Wind,

        pub weather: Vec<Condition>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Main {
        pub temp: f64,

        pub humidity: f64,
    }

    #[derive(Deserialize, Debug)]
    pub struct Wind {
        pub speed: f64,
    }

    #[derive(Deserialize, Debug)]
    pub struct Condition {
        pub description: String,
    }

    impl Entry {
        pub fn to_sample(&self) -> Result<ForecastSample, Error> {
            let condition = self
                .weather
                .first()
                .ok_or_else(|| Error::MissingDescription {
                    timestamp: self.dt_txt.clone(),
                })?;
            Ok(ForecastSample {
                timestamp: self.dt_txt.clone(),
                temperature: self.main.temp,
                description: condition.description.clone(),
                humidity: self.main.humidity,
                wind_speed: self.wind.speed,
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub endpoint: String,
    pub api_key: String,
    pub lang: String,
}

#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, Error> {
        let client = Client::builder().user_agent("previsao").build()?;
        Ok(Self { client, config })
    }

    pub fn fetch(&self, city: &str) -> Result<forecast::Forecast, Error> {
        debug!(
            "GET {} q={city} lang={} units={UNITS}",
            self.config.endpoint, self.config.lang
        );
        let body: Value = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("lang", self.config.lang.as_str()),
                ("units", UNITS),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        let code = status_code(&body).ok_or(Error::MissingField("cod"))?;
        if code != "200" {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(NOT_FOUND);
            warn!("provider returned code {code} for '{city}': {message}");
            return Err(Error::Unavailable(message.to_string()));
        }

        let forecast: forecast::Forecast = serde_json::from_value(body)?;
        info!(
            "received {} samples for {}, {}",
            forecast.list.len(),
            forecast.city.name,
            forecast.city.country
        );
        Ok(forecast)
    }
}

/// The `cod` field arrives as a string on success and sometimes as a number
/// on errors.
fn status_code(body: &Value) -> Option<String> {
    match body.get("cod")? {
        Value::String(code) => Some(code.clone()),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}
