use serde::Deserialize;

/// Raw `POST /new-training` body. Every field is optional here so the
/// required-field check can report what is missing instead of failing
/// deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct NewTrainingForm {
    pub session_date: Option<String>,
    pub activity_id: Option<String>,
    pub duration_hhmm: Option<String>,

    pub sleep_quality_score: Option<String>,
    pub effort_score: Option<String>,
    pub post_workout_score: Option<String>,

    pub distance_km: Option<String>,
    pub avg_pace_min_per_km: Option<String>,

    pub trail_fatigue_score: Option<String>,
    pub trail_safety_score: Option<String>,
    pub trail_overall_score: Option<String>,

    pub gym_plan_type: Option<String>,
    pub gym_total_weight_kg: Option<String>,

    pub meal_before: Option<String>,
    pub temperature_celsius: Option<String>,
    pub notes: Option<String>,
}
