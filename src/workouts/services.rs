use time::{macros::format_description, Date};
use tracing::debug;

use super::dto::NewTrainingForm;
use super::repo::WorkoutStore;
use super::repo_types::NewWorkoutSession;
use crate::error::SubmissionError;

/// Placeholder some clients send for an unset field.
const NULL_PLACEHOLDER: &str = "None";

/// Converts `"HH:MM"` to minutes. Hour and minute ranges are not checked,
/// so `"99:99"` gives 5939.
pub fn parse_duration_to_minutes(input: &str) -> Result<f64, SubmissionError> {
    let invalid = || SubmissionError::FormatError {
        field: "duration",
        value: input.to_string(),
    };

    let (hours, minutes) = input.split_once(':').ok_or_else(invalid)?;
    if minutes.contains(':') {
        return Err(invalid());
    }
    let hours: i64 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.trim().parse().map_err(|_| invalid())?;

    let total = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(invalid)?;
    Ok(total as f64)
}

/// Strict `YYYY-MM-DD`. `[year]` alone would also take a leading sign.
pub fn parse_session_date(input: &str) -> Result<Date, SubmissionError> {
    let invalid = || SubmissionError::FormatError {
        field: "session date",
        value: format!("{} (expected YYYY-MM-DD)", input),
    };
    if input.len() != 10 || !input.as_bytes()[0].is_ascii_digit() {
        return Err(invalid());
    }
    Date::parse(input, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())
}

/// Monday = 0 ... Sunday = 6.
pub fn day_of_week(date: Date) -> i64 {
    i64::from(date.weekday().number_days_from_monday())
}

/// Target types an optional form field can be coerced into.
pub trait FormValue: Sized {
    const EXPECTED: &'static str;
    fn parse_form(raw: &str) -> Option<Self>;
}

impl FormValue for i64 {
    const EXPECTED: &'static str = "a whole number";
    fn parse_form(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FormValue for f64 {
    const EXPECTED: &'static str = "a number";
    fn parse_form(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FormValue for String {
    const EXPECTED: &'static str = "text";
    fn parse_form(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

fn is_null(raw: Option<&str>) -> bool {
    matches!(raw, None | Some("") | Some(NULL_PLACEHOLDER))
}

/// Absent, empty and `"None"` all map to `Ok(None)`; anything else must parse
/// as `T`.
pub fn coerce_optional<T: FormValue>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, SubmissionError> {
    let raw = match raw {
        Some(v) if !is_null(raw) => v,
        _ => return Ok(None),
    };
    T::parse_form(raw)
        .map(Some)
        .ok_or_else(|| SubmissionError::TypeMismatch {
            field,
            expected: T::EXPECTED,
            value: raw.to_string(),
        })
}

fn required<'a>(field: &'static str, raw: &'a Option<String>) -> Result<&'a str, SubmissionError> {
    raw.as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(SubmissionError::MissingField(field))
}

/// Validates a submission and computes its derived fields. Performs no I/O.
pub fn build_session(form: &NewTrainingForm) -> Result<NewWorkoutSession, SubmissionError> {
    let session_date = required("session_date", &form.session_date)?;
    let activity_id = required("activity_id", &form.activity_id)?;
    let duration_hhmm = required("duration_hhmm", &form.duration_hhmm)?;

    let activity_id = i64::parse_form(activity_id).ok_or_else(|| SubmissionError::TypeMismatch {
        field: "activity_id",
        expected: i64::EXPECTED,
        value: activity_id.to_string(),
    })?;

    let date = parse_session_date(session_date)?;
    let duration_minutes = parse_duration_to_minutes(duration_hhmm)?;
    let session_date = date
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|_| SubmissionError::FormatError {
            field: "session date",
            value: session_date.to_string(),
        })?;

    Ok(NewWorkoutSession {
        activity_id,
        session_date,
        duration_hhmm: duration_hhmm.to_string(),
        duration_minutes,
        day_of_week: day_of_week(date),
        notes: coerce_optional("notes", form.notes.as_deref())?,
        sleep_quality_score: coerce_optional(
            "sleep_quality_score",
            form.sleep_quality_score.as_deref(),
        )?,
        meal_before: coerce_optional("meal_before", form.meal_before.as_deref())?,
        temperature_celsius: coerce_optional(
            "temperature_celsius",
            form.temperature_celsius.as_deref(),
        )?,
        avg_heart_rate_bpm: None,
        effort_score: coerce_optional("effort_score", form.effort_score.as_deref())?,
        post_workout_score: coerce_optional(
            "post_workout_score",
            form.post_workout_score.as_deref(),
        )?,
        distance_km: coerce_optional("distance_km", form.distance_km.as_deref())?,
        avg_pace_min_per_km: coerce_optional(
            "avg_pace_min_per_km",
            form.avg_pace_min_per_km.as_deref(),
        )?,
        trail_fatigue_score: coerce_optional(
            "trail_fatigue_score",
            form.trail_fatigue_score.as_deref(),
        )?,
        trail_safety_score: coerce_optional(
            "trail_safety_score",
            form.trail_safety_score.as_deref(),
        )?,
        trail_overall_score: coerce_optional(
            "trail_overall_score",
            form.trail_overall_score.as_deref(),
        )?,
        gym_plan_type: coerce_optional("gym_plan_type", form.gym_plan_type.as_deref())?,
        gym_total_weight_kg: coerce_optional(
            "gym_total_weight_kg",
            form.gym_total_weight_kg.as_deref(),
        )?,
    })
}

/// Validate, then persist. Nothing is written unless validation passes.
pub async fn submit(
    store: &dyn WorkoutStore,
    form: &NewTrainingForm,
) -> Result<i64, SubmissionError> {
    let session = build_session(form)?;
    debug!(
        activity_id = session.activity_id,
        session_date = %session.session_date,
        duration_minutes = session.duration_minutes,
        "submission validated"
    );
    store
        .insert_session(&session)
        .await
        .map_err(SubmissionError::PersistenceFailure)
}
