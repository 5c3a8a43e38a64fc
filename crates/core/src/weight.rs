//! Weight tracking figures: BMI, change over a window and history statistics.

use crate::constants::WEIGHT_CHANGE_WINDOW_DAYS;
use crate::{DietError, DietResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weigh-in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub recorded_at: DateTime<Utc>,
    pub weight_kg: f64,
}

impl WeightEntry {
    /// Builds an entry from a timestamp string.
    ///
    /// Accepts RFC 3339, a naive ISO 8601 date-time (taken as UTC) or a bare `YYYY-MM-DD` date
    /// (midnight UTC).
    ///
    /// # Errors
    ///
    /// Returns `DietError::InvalidTimestamp` if the timestamp matches none of these forms, and
    /// `DietError::InvalidInput` if the weight is not a positive finite number.
    pub fn parse(recorded_at: &str, weight_kg: f64) -> DietResult<Self> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(DietError::InvalidInput(format!(
                "weight must be a positive number, got {weight_kg}"
            )));
        }

        Ok(Self {
            recorded_at: parse_timestamp(recorded_at)?,
            weight_kg,
        })
    }
}

/// Parses a timestamp in any of the forms accepted by [`WeightEntry::parse`].
pub fn parse_timestamp(input: &str) -> DietResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(naive) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    Err(DietError::InvalidTimestamp(input.to_owned()))
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Body mass index rounded to one decimal. `None` without a usable height or weight.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(round_to_tenth(weight_kg / (height_m * height_m)))
}

/// Difference between `current_kg` and the most recent entry recorded at least `window` before
/// `reference`. Zero when no entry is that old.
pub fn weight_change(
    history: &[WeightEntry],
    current_kg: f64,
    reference: DateTime<Utc>,
    window: Duration,
) -> f64 {
    let cutoff = reference - window;
    history
        .iter()
        .filter(|entry| entry.recorded_at <= cutoff)
        .max_by_key(|entry| entry.recorded_at)
        .map_or(0.0, |old| round_to_tenth(current_kg - old.weight_kg))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub min_kg: f64,
    pub avg_kg: f64,
    pub max_kg: f64,
}

impl WeightStats {
    /// `None` for an empty history.
    pub fn from_history(history: &[WeightEntry]) -> Option<Self> {
        let first = history.first()?.weight_kg;
        let (min, max, sum) = history.iter().fold((first, first, 0.0), |(min, max, sum), e| {
            (min.min(e.weight_kg), max.max(e.weight_kg), sum + e.weight_kg)
        });

        Some(Self {
            min_kg: round_to_tenth(min),
            avg_kg: round_to_tenth(sum / history.len() as f64),
            max_kg: round_to_tenth(max),
        })
    }
}

/// Dashboard weight card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightSummary {
    pub current_weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub change_kg: f64,
    pub recorded_at: Option<DateTime<Utc>>,
    pub stats: Option<WeightStats>,
}

/// Summarises a weight history as of `now`.
///
/// The current weight is the latest entry, or `profile_weight_kg` when the history is empty. In
/// that case no BMI or change is reported.
pub fn summarize(
    history: &[WeightEntry],
    height_cm: Option<f64>,
    profile_weight_kg: Option<f64>,
    now: DateTime<Utc>,
) -> WeightSummary {
    let Some(latest) = history.iter().max_by_key(|entry| entry.recorded_at) else {
        return WeightSummary {
            current_weight_kg: profile_weight_kg,
            bmi: None,
            change_kg: 0.0,
            recorded_at: None,
            stats: None,
        };
    };

    let window = Duration::days(WEIGHT_CHANGE_WINDOW_DAYS);
    tracing::debug!(entries = history.len(), "summarising weight history");

    WeightSummary {
        current_weight_kg: Some(latest.weight_kg),
        bmi: height_cm.and_then(|h| bmi(latest.weight_kg, h)),
        change_kg: weight_change(history, latest.weight_kg, now, window),
        recorded_at: Some(latest.recorded_at),
        stats: WeightStats::from_history(history),
    }
}
