use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp formats the backend is known to emit.
///
/// Open-Meteo hourly times come without seconds or offset, e.g. `2023-08-01T06:00`.
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// One hourly wind record as served by `GET /hourly`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    #[serde(deserialize_with = "deserialize_time")]
    pub time: NaiveDateTime,
    /// Degrees. `null` where the backend padded a shorter series.
    #[serde(deserialize_with = "deserialize_nullable")]
    pub winddirection: Option<f64>,
    /// m/s.
    #[serde(deserialize_with = "deserialize_nullable")]
    pub windgusts: Option<f64>,
    /// m/s.
    #[serde(deserialize_with = "deserialize_nullable")]
    pub windspeed: Option<f64>,
}

impl ForecastSample {
    /// Hour of day (0-23) of the sample's timestamp.
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
}

/// Coordinate-display payload served by `GET /weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generationtime_ms: Option<f64>,
}

/// Parse a backend timestamp in any of the accepted formats.
pub fn parse_time(raw: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

/// The key must be present; only its value may be `null`.
fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp '{raw}'")))
}
