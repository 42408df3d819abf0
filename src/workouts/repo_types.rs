/// A validated workout ready to be written to `workout_sessions`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutSession {
    pub activity_id: i64,
    pub session_date: String,        // ISO 8601, YYYY-MM-DD
    pub duration_hhmm: String,       // as typed by the user
    pub duration_minutes: f64,       // derived from duration_hhmm
    pub day_of_week: i64,            // derived from session_date, Monday = 0
    pub notes: Option<String>,
    pub sleep_quality_score: Option<i64>,
    pub meal_before: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub avg_heart_rate_bpm: Option<i64>, // not collected yet, always None
    pub effort_score: Option<i64>,
    pub post_workout_score: Option<i64>,
    pub distance_km: Option<f64>,
    pub avg_pace_min_per_km: Option<f64>,
    pub trail_fatigue_score: Option<i64>,
    pub trail_safety_score: Option<i64>,
    pub trail_overall_score: Option<i64>,
    pub gym_plan_type: Option<String>,
    pub gym_total_weight_kg: Option<f64>,
}
