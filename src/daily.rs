use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::Error;
use crate::owm::forecast::Forecast;
use crate::weather::{DailySummary, ForecastReport, ForecastSample};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        Error::MalformedTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// Groups samples by calendar date and reduces each group to a summary.
/// Days come out in the order their date was first seen, not sorted.
pub fn summarize(samples: &[ForecastSample]) -> Result<Vec<DailySummary>, Error> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut groups: Vec<(NaiveDate, Vec<&ForecastSample>)> = Vec::new();

    for sample in samples {
        let date = parse_timestamp(&sample.timestamp)?.date();
        let slot = *index.entry(date).or_insert_with(|| {
            groups.push((date, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(sample);
    }

    Ok(groups
        .into_iter()
        .map(|(date, group)| reduce(date, &group))
        .collect())
}

fn reduce(date: NaiveDate, group: &[&ForecastSample]) -> DailySummary {
    let n = group.len() as f64;
    let temp_min = group
        .iter()
        .map(|s| s.temperature)
        .fold(f64::INFINITY, f64::min);
    let temp_max = group
        .iter()
        .map(|s| s.temperature)
        .fold(f64::NEG_INFINITY, f64::max);
    let descriptions: Vec<&str> = group.iter().map(|s| s.description.as_str()).collect();

    DailySummary {
        date,
        temp_min,
        temp_max,
        description: capitalize(dominant(&descriptions).unwrap_or_default()),
        humidity: group.iter().map(|s| s.humidity).sum::<f64>() / n,
        wind_speed: group.iter().map(|s| s.wind_speed).sum::<f64>() / n,
        samples: group.len(),
    }
}

/// Most frequent value; on a tie the one seen first wins.
pub fn dominant<'a>(values: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn build_report(forecast: Forecast) -> Result<ForecastReport, Error> {
    let samples = forecast
        .list
        .iter()
        .map(|entry| entry.to_sample())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastReport {
        city: forecast.city.name,
        country: forecast.city.country,
        days: summarize(&samples)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    fn sample(timestamp: &str, temperature: f64, description: &str) -> ForecastSample {
        ForecastSample {
            timestamp: timestamp.to_string(),
            temperature,
            description: description.to_string(),
            humidity: 50.0,
            wind_speed: 2.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty() {
        assert!(summarize(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_grouping_key() {
        let samples = vec![
            sample("2024-05-01 09:00:00", 10.0, "rain"),
            sample("2024-05-01 21:00:00", 12.0, "rain"),
            sample("2024-05-02 00:00:00", 8.0, "rain"),
        ];
        let days = summarize(&samples).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2024, 5, 1));
        assert_eq!(days[0].samples, 2);
        assert_eq!(days[1].date, date(2024, 5, 2));
        assert_eq!(days[1].samples, 1);
    }

    #[test]
    fn test_two_days_of_eight_samples() {
        let temps = [9.5, 11.0, 14.2, 17.8, 16.1, 13.0, 10.4, 8.7];
        let samples: Vec<_> = temps
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let day = if i < 5 { 1 } else { 2 };
                let hour = (i % 5) * 3 + 6;
                let ts = format!("2024-05-0{day} {hour:02}:00:00");
                sample(&ts, *t, "clear sky")
            })
            .collect();

        let days = summarize(&samples).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2024, 5, 1));
        assert_eq!(days[1].date, date(2024, 5, 2));
        assert_eq!(days.iter().map(|d| d.samples).sum::<usize>(), samples.len());

        for (day, group) in days.iter().zip([&samples[..5], &samples[5..]]) {
            for s in group {
                assert!(day.temp_min <= s.temperature && s.temperature <= day.temp_max);
            }
        }
        assert_eq!(days[0].temp_min, 9.5);
        assert_eq!(days[0].temp_max, 17.8);
        assert_eq!(days[1].temp_min, 8.7);
        assert_eq!(days[1].temp_max, 13.0);
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        // Out-of-order input is reported in arrival order, not by calendar.
        let samples = vec![
            sample("2024-05-03 09:00:00", 1.0, "a"),
            sample("2024-05-01 09:00:00", 1.0, "a"),
            sample("2024-05-03 12:00:00", 1.0, "a"),
        ];
        let days = summarize(&samples).unwrap();
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(2024, 5, 3), date(2024, 5, 1)]);
        assert_eq!(days[0].samples, 2);
    }

    #[test]
    fn test_single_sample_day() {
        let days = summarize(&[sample("2024-05-01 12:00:00", 21.3, "nuvens dispersas")]).unwrap();
        assert_eq!(days[0].temp_min, 21.3);
        assert_eq!(days[0].temp_max, 21.3);
        assert_eq!(days[0].description, "Nuvens dispersas");
    }

    #[test]
    fn test_dominant_tie_break() {
        let samples: Vec<_> = ["rain", "clear", "rain", "clear"]
            .iter()
            .enumerate()
            .map(|(i, d)| sample(&format!("2024-05-01 {:02}:00:00", i * 3), 0.0, d))
            .collect();
        let days = summarize(&samples).unwrap();
        assert_eq!(days[0].description, "Rain");

        assert_eq!(dominant(&["clear", "rain", "rain"]), Some("rain"));
        assert_eq!(dominant(&["b", "a", "a", "b", "c"]), Some("b"));
        assert_eq!(dominant(&[]), None);
    }

    #[test]
    fn test_dominant_is_case_sensitive() {
        assert_eq!(dominant(&["Rain", "rain", "rain"]), Some("rain"));
        assert_eq!(dominant(&["Rain", "rain"]), Some("Rain"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("céu limpo"), "Céu limpo");
        assert_eq!(capitalize("light RAIN"), "Light RAIN");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_averages() {
        let samples = vec![
            ForecastSample {
                timestamp: "2024-05-01 00:00:00".into(),
                temperature: 1.0,
                description: "x".into(),
                humidity: 71.0,
                wind_speed: 1.3,
            },
            ForecastSample {
                timestamp: "2024-05-01 03:00:00".into(),
                temperature: 2.0,
                description: "x".into(),
                humidity: 64.0,
                wind_speed: 4.1,
            },
            ForecastSample {
                timestamp: "2024-05-01 06:00:00".into(),
                temperature: 3.0,
                description: "x".into(),
                humidity: 90.0,
                wind_speed: 0.4,
            },
        ];
        let day = &summarize(&samples).unwrap()[0];
        assert!((day.humidity - (71.0 + 64.0 + 90.0) / 3.0).abs() < 1e-9);
        assert!((day.wind_speed - (1.3 + 4.1 + 0.4) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_timestamp() {
        let samples = vec![
            sample("2024-05-01 09:00:00", 1.0, "a"),
            sample("not-a-date", 1.0, "a"),
        ];
        let err = summarize(&samples).unwrap_err();
        assert_eq!(err.kind(), Kind::MalformedData);
        assert!(matches!(
            err,
            Error::MalformedTimestamp { ref value, .. } if value == "not-a-date"
        ));

        assert!(parse_timestamp("2024-05-01T09:00:00").is_err());
        assert!(parse_timestamp("2024-05-01").is_err());
    }

    #[test]
    fn test_build_report() {
        let forecast: Forecast = serde_json::from_value(serde_json::json!({
            "city": {"name": "Recife", "country": "BR"},
            "list": [
                {
                    "dt_txt": "2024-05-01 09:00:00",
                    "main": {"temp": 27.0, "humidity": 80},
                    "wind": {"speed": 4.0},
                    "weather": [{"description": "chuva moderada"}]
                },
                {
                    "dt_txt": "2024-05-01 12:00:00",
                    "main": {"temp": 30.0, "humidity": 70},
                    "wind": {"speed": 5.0},
                    "weather": [{"description": "chuva moderada"}, {"description": "nublado"}]
                }
            ]
        }))
        .unwrap();

        let report = build_report(forecast).unwrap();
        assert_eq!(report.city, "Recife");
        assert_eq!(report.country, "BR");
        assert_eq!(report.days.len(), 1);
        let day = &report.days[0];
        assert_eq!(day.description, "Chuva moderada");
        assert_eq!((day.temp_min, day.temp_max), (27.0, 30.0));
        assert_eq!(day.humidity, 75.0);
        assert_eq!(day.wind_speed, 4.5);
    }
}
