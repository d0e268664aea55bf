use chrono::NaiveDate;

/// One 3-hour observation as returned by the provider. The timestamp is kept
/// as text until the aggregator parses it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
    /// Number of samples that fell on this date.
    pub samples: usize,
}

/// Days are in the order their date first appeared in the provider's list.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub city: String,
    pub country: String,
    pub days: Vec<DailySummary>,
}
