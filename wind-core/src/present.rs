//! Text rendering of forecast views: cards, the direction indicator and the
//! hour slider.

use crate::{
    model::{ForecastSample, WeatherSummary},
    view::ViewState,
};

pub const LOADING_TEXT: &str = "Loading...";
pub const ERROR_TEXT: &str = "No backend connection or no data available";

/// Rotation used when no sample is selected.
pub const UNSELECTED_ROTATION: f64 = -90.0;

/// Indicator rotation in degrees, straight from the wind direction.
pub fn rotation(direction: f64) -> f64 {
    direction
}

/// Indicator rotation with the 180° flip and -90° pointer offset.
///
/// `(direction + 180) % 360 - 90`, or -90 with nothing selected. Existing
/// visual calibration depends on this exact arithmetic.
pub fn flipped_rotation(direction: Option<f64>) -> f64 {
    match direction {
        Some(d) => (d + 180.0) % 360.0 - 90.0,
        None => UNSELECTED_ROTATION,
    }
}

/// Eight-point arrow for a compass bearing, clockwise from north.
pub fn arrow_glyph(direction: f64) -> char {
    const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
    let sector = (direction.rem_euclid(360.0) / 45.0).round() as usize % 8;
    ARROWS[sector]
}

/// 12-hour clock label for an hour of day, e.g. `12AM`, `6AM`, `12PM`, `6PM`.
pub fn format_hour(hour: u32) -> String {
    match hour % 24 {
        0 => "12AM".to_string(),
        12 => "12PM".to_string(),
        h if h < 12 => format!("{h}AM"),
        h => format!("{}PM", h - 12),
    }
}

/// Slider tick label for an hour: only every sixth hour gets one.
pub fn tick_label(hour: u32) -> Option<String> {
    (hour % 6 == 0).then(|| format_hour(hour))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderMark {
    pub index: usize,
    pub label: String,
}

/// Labelled slider positions for a sample sequence.
pub fn slider_marks(samples: &[ForecastSample]) -> Vec<SliderMark> {
    samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| {
            tick_label(sample.hour()).map(|label| SliderMark { index, label })
        })
        .collect()
}

/// Index selector over a sample sequence, bounded to `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    len: usize,
    index: usize,
}

impl Slider {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Move to `index`, clamped to the last sample.
    pub fn select(&mut self, index: usize) -> usize {
        self.index = index.min(self.len.saturating_sub(1));
        self.index
    }

    pub fn selected<'a>(&self, samples: &'a [ForecastSample]) -> Option<&'a ForecastSample> {
        samples.get(self.index)
    }

    /// One-line track with tick labels placed at their sample columns.
    pub fn track(&self, samples: &[ForecastSample]) -> String {
        let mut track: Vec<char> = vec!['─'; samples.len()];
        if let Some(knob) = track.get_mut(self.index) {
            *knob = '●';
        }

        let mut labels = String::new();
        for mark in slider_marks(samples) {
            let width = labels.chars().count();
            if mark.index >= width {
                labels.push_str(&" ".repeat(mark.index - width));
                labels.push_str(&mark.label);
            }
        }

        let track: String = track.into_iter().collect();
        format!("{track}\n{}", labels.trim_end())
    }
}

/// Placeholder for a wind value the backend sent as `null`.
pub const MISSING_VALUE: &str = "-";

/// Anything a view can hold that knows how to draw itself.
pub trait Render {
    fn render(&self) -> String;
}

fn value_or_missing(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => MISSING_VALUE.to_string(),
    }
}

impl Render for ForecastSample {
    fn render(&self) -> String {
        let direction = match self.winddirection {
            Some(d) => format!("{d}° {}", arrow_glyph(rotation(d))),
            None => MISSING_VALUE.to_string(),
        };

        format!(
            "Weather Data · {}\nWind Information\nWind Direction: {}\nWind Gusts: {}\nWind Speed: {}",
            self.time.format("%Y-%m-%d %H:%M"),
            direction,
            value_or_missing(self.windgusts, " m/s"),
            value_or_missing(self.windspeed, " m/s"),
        )
    }
}

impl Render for Vec<ForecastSample> {
    fn render(&self) -> String {
        self.iter()
            .map(Render::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Render for WeatherSummary {
    fn render(&self) -> String {
        let mut out = format!(
            "Weather Data\nLatitude: {}\nLongitude: {}",
            self.latitude, self.longitude
        );
        if let Some(tz) = &self.timezone {
            out.push_str(&format!("\nTimezone: {tz}"));
        }
        out
    }
}

/// Loading indicator, error message or the data itself.
pub fn render_state<T: Render>(state: &ViewState<T>) -> String {
    match state {
        ViewState::Loading => LOADING_TEXT.to_string(),
        ViewState::Error => ERROR_TEXT.to_string(),
        ViewState::Ready(data) => data.render(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_time;

    fn sample(hour: u32, direction: f64) -> ForecastSample {
        ForecastSample {
            time: parse_time(&format!("2023-08-01T{hour:02}:00")).unwrap(),
            winddirection: Some(direction),
            windgusts: Some(8.5),
            windspeed: Some(4.0),
        }
    }

    fn day() -> Vec<ForecastSample> {
        (0..24).map(|h| sample(h, 10.0 * h as f64)).collect()
    }

    #[test]
    fn plain_rotation_is_direction() {
        assert_eq!(rotation(225.0), 225.0);
    }

    #[test]
    fn flipped_rotation_exact_values() {
        assert_eq!(flipped_rotation(Some(0.0)), 90.0);
        assert_eq!(flipped_rotation(Some(90.0)), 180.0);
        assert_eq!(flipped_rotation(Some(180.0)), -90.0);
        assert_eq!(flipped_rotation(Some(350.0)), 80.0);
    }

    #[test]
    fn flipped_rotation_without_selection() {
        assert_eq!(flipped_rotation(None), -90.0);
    }

    #[test]
    fn arrow_glyph_sectors() {
        assert_eq!(arrow_glyph(0.0), '↑');
        assert_eq!(arrow_glyph(90.0), '→');
        assert_eq!(arrow_glyph(350.0), '↑');
        assert_eq!(arrow_glyph(225.0), '↙');
    }

    #[test]
    fn hour_formatting() {
        assert_eq!(format_hour(0), "12AM");
        assert_eq!(format_hour(6), "6AM");
        assert_eq!(format_hour(12), "12PM");
        assert_eq!(format_hour(18), "6PM");
        assert_eq!(format_hour(23), "11PM");
    }

    #[test]
    fn ticks_every_six_hours_over_a_day() {
        let marks = slider_marks(&day());

        let expected = vec![
            SliderMark {
                index: 0,
                label: "12AM".into(),
            },
            SliderMark {
                index: 6,
                label: "6AM".into(),
            },
            SliderMark {
                index: 12,
                label: "12PM".into(),
            },
            SliderMark {
                index: 18,
                label: "6PM".into(),
            },
        ];
        assert_eq!(marks, expected);
    }

    #[test]
    fn no_tick_off_the_six_hour_grid() {
        for hour in [1, 5, 7, 13, 23] {
            assert_eq!(tick_label(hour), None, "hour {hour}");
        }
    }

    #[test]
    fn slider_clamps_to_last_sample() {
        let samples = day();
        let mut slider = Slider::new(samples.len());

        assert_eq!(slider.select(40), 23);
        assert_eq!(slider.selected(&samples).map(ForecastSample::hour), Some(23));
    }

    #[test]
    fn slider_over_nothing_selects_nothing() {
        let mut slider = Slider::new(0);
        assert_eq!(slider.select(3), 0);
        assert!(slider.selected(&[]).is_none());
    }

    #[test]
    fn track_places_labels_under_ticks() {
        let samples = day();
        let mut slider = Slider::new(samples.len());
        slider.select(6);

        let track = slider.track(&samples);
        let (line, labels) = track.split_once('\n').unwrap();

        assert_eq!(line.chars().nth(6), Some('●'));
        assert!(labels.starts_with("12AM  6AM"));
        assert!(labels.contains("12PM"));
        assert!(labels.ends_with("6PM"));
    }

    #[test]
    fn card_shows_units() {
        let card = sample(6, 270.0).render();

        assert!(card.contains("Wind Direction: 270° ←"));
        assert!(card.contains("Wind Gusts: 8.5 m/s"));
        assert!(card.contains("Wind Speed: 4 m/s"));
    }

    #[test]
    fn card_shows_placeholder_for_null_values() {
        let mut gusty = sample(13, 0.0);
        gusty.winddirection = None;
        gusty.windgusts = None;

        let card = gusty.render();
        assert!(card.contains("Wind Direction: -\n"));
        assert!(card.contains("Wind Gusts: -\n"));
        assert!(card.contains("Wind Speed: 4 m/s"));
    }

    #[test]
    fn missing_direction_uses_unselected_rotation() {
        let mut calm = sample(13, 0.0);
        calm.winddirection = None;

        assert_eq!(flipped_rotation(calm.winddirection), UNSELECTED_ROTATION);
    }

    #[test]
    fn list_renders_one_card_per_sample() {
        let cards = vec![sample(0, 0.0), sample(1, 10.0)].render();
        assert_eq!(cards.matches("Wind Information").count(), 2);
    }

    #[test]
    fn coordinates_card() {
        let summary = WeatherSummary {
            latitude: 38.810608,
            longitude: -90.699844,
            timezone: None,
            elevation: None,
            generationtime_ms: None,
        };

        let card = summary.render();
        assert!(card.contains("Latitude: 38.810608"));
        assert!(card.contains("Longitude: -90.699844"));
    }

    #[test]
    fn state_rendering() {
        assert_eq!(render_state::<Vec<ForecastSample>>(&ViewState::Loading), "Loading...");
        assert_eq!(
            render_state::<Vec<ForecastSample>>(&ViewState::Error),
            "No backend connection or no data available"
        );
    }
}
