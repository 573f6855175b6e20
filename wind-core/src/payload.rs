//! Schema check between raw backend bytes and the typed view data.

use crate::{
    error::FetchError,
    model::{ForecastSample, WeatherSummary},
};

/// A value a forecast view can hold once its fetch succeeds.
pub trait Payload: Sized + Send + Sync + 'static {
    /// Validate and decode a response body.
    fn parse(body: &[u8]) -> Result<Self, FetchError>;
}

/// The canonical list endpoint: every sample, in backend order.
impl Payload for Vec<ForecastSample> {
    fn parse(body: &[u8]) -> Result<Self, FetchError> {
        let samples: Vec<ForecastSample> =
            serde_json::from_slice(body).map_err(FetchError::from_json)?;

        if samples.is_empty() {
            return Err(FetchError::Empty);
        }

        Ok(samples)
    }
}

/// The list endpoint reduced to its first sample.
impl Payload for ForecastSample {
    fn parse(body: &[u8]) -> Result<Self, FetchError> {
        Vec::<ForecastSample>::parse(body)?
            .into_iter()
            .next()
            .ok_or(FetchError::Empty)
    }
}

impl Payload for WeatherSummary {
    fn parse(body: &[u8]) -> Result<Self, FetchError> {
        serde_json::from_slice(body).map_err(FetchError::from_json)
    }
}
