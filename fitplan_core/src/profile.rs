//! User profile input and its normalization.
//!
//! Profiles arrive loosely typed from a request body or the command line.
//! Normalization never fails: unknown levels fall back to beginner, unknown
//! goals to general, and the cadence snaps to one of the two supported
//! values. Callers rely on this permissive contract instead of handling
//! validation errors.

use crate::{DaysPerWeek, Goal, Level};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw profile fields as supplied by the caller
///
/// Deserialization is as forgiving as normalization: a field of the wrong
/// JSON type reads as missing instead of rejecting the whole body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient_text")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub goal: Option<String>,
    #[serde(default, alias = "daysPerWeek", deserialize_with = "lenient_days")]
    pub days_per_week: Option<i64>,
}

/// Strings are kept; any other JSON value reads as missing
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Numbers and numeric strings are rounded up to whole days
///
/// Rounding up keeps `> 3` comparisons intact, so 3.5 still trains five days.
fn lenient_days<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.ceil() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.ceil() as i64))
        }
        _ => None,
    };
    Ok(number)
}

/// Profile after coercion to known values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizedProfile {
    pub level: Level,
    pub goal: Goal,
    pub days_per_week: DaysPerWeek,
}

impl Profile {
    pub fn new(level: Option<&str>, goal: Option<&str>, days_per_week: Option<i64>) -> Self {
        Self {
            level: level.map(str::to_string),
            goal: goal.map(str::to_string),
            days_per_week,
        }
    }

    pub fn normalize(&self) -> NormalizedProfile {
        NormalizedProfile {
            level: Level::normalize(self.level.as_deref()),
            goal: Goal::normalize(self.goal.as_deref()),
            days_per_week: DaysPerWeek::normalize(self.days_per_week),
        }
    }
}

impl Level {
    /// Parse a level identifier, accepting English and French spellings
    pub fn parse(s: &str) -> Option<Level> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "debutant" => Some(Level::Beginner),
            "intermediaire" | "intermediate" => Some(Level::Intermediate),
            "avance" | "advanced" => Some(Level::Advanced),
            _ => None,
        }
    }

    pub fn normalize(raw: Option<&str>) -> Level {
        match raw.and_then(Level::parse) {
            Some(level) => level,
            None => {
                if let Some(raw) = raw {
                    tracing::debug!("Unknown level {:?}, using beginner", raw);
                }
                Level::Beginner
            }
        }
    }
}

impl Goal {
    pub fn parse(s: &str) -> Option<Goal> {
        match s.trim().to_lowercase().as_str() {
            "general" => Some(Goal::General),
            "prise_muscle" | "muscle_gain" => Some(Goal::PriseMuscle),
            "perte_poids" | "weight_loss" => Some(Goal::PertePoids),
            "endurance" => Some(Goal::Endurance),
            _ => None,
        }
    }

    pub fn normalize(raw: Option<&str>) -> Goal {
        match raw.and_then(Goal::parse) {
            Some(goal) => goal,
            None => {
                if let Some(raw) = raw {
                    tracing::debug!("Unknown goal {:?}, using general", raw);
                }
                Goal::General
            }
        }
    }
}

impl DaysPerWeek {
    /// Anything above three trains five days; everything else, three
    pub fn normalize(requested: Option<i64>) -> DaysPerWeek {
        match requested {
            Some(days) if days > 3 => DaysPerWeek::Five,
            _ => DaysPerWeek::Three,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_are_kept() {
        let profile = Profile::new(Some("intermediaire"), Some("prise_muscle"), Some(5));
        let normalized = profile.normalize();

        assert_eq!(normalized.level, Level::Intermediate);
        assert_eq!(normalized.goal, Goal::PriseMuscle);
        assert_eq!(normalized.days_per_week, DaysPerWeek::Five);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let profile = Profile::new(Some("expert"), Some("devenir_immortel"), Some(10));
        let normalized = profile.normalize();

        assert_eq!(normalized.level, Level::Beginner);
        assert_eq!(normalized.goal, Goal::General);
        assert_eq!(normalized.days_per_week, DaysPerWeek::Five);
    }

    #[test]
    fn test_empty_profile_uses_defaults() {
        let normalized = Profile::default().normalize();
        assert_eq!(normalized, NormalizedProfile::default());
        assert_eq!(normalized.days_per_week, DaysPerWeek::Three);
    }

    #[test]
    fn test_days_snap_to_supported_cadence() {
        assert_eq!(DaysPerWeek::normalize(Some(-2)), DaysPerWeek::Three);
        assert_eq!(DaysPerWeek::normalize(Some(0)), DaysPerWeek::Three);
        assert_eq!(DaysPerWeek::normalize(Some(3)), DaysPerWeek::Three);
        assert_eq!(DaysPerWeek::normalize(Some(4)), DaysPerWeek::Five);
        assert_eq!(DaysPerWeek::normalize(Some(7)), DaysPerWeek::Five);
        assert_eq!(DaysPerWeek::normalize(None), DaysPerWeek::Three);
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!(Level::parse(" Advanced "), Some(Level::Advanced));
        assert_eq!(Level::parse("DEBUTANT"), Some(Level::Beginner));
        assert_eq!(Goal::parse("Weight_Loss"), Some(Goal::PertePoids));
        assert_eq!(Goal::parse("muscle_gain"), Some(Goal::PriseMuscle));
        assert_eq!(Goal::parse(""), None);
    }

    #[test]
    fn test_profile_from_request_body() {
        let body = r#"{"level": "avance", "goal": "endurance", "daysPerWeek": 4}"#;
        let profile: Profile = serde_json::from_str(body).unwrap();
        let normalized = profile.normalize();

        assert_eq!(normalized.level, Level::Advanced);
        assert_eq!(normalized.goal, Goal::Endurance);
        assert_eq!(normalized.days_per_week, DaysPerWeek::Five);

        let empty: Profile = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Profile::default());
    }

    #[test]
    fn test_loosely_typed_body_is_coerced() {
        let parse = |body: &str| serde_json::from_str::<Profile>(body).unwrap();

        assert_eq!(parse(r#"{"daysPerWeek": "5"}"#).days_per_week, Some(5));
        assert_eq!(parse(r#"{"daysPerWeek": " 4 "}"#).days_per_week, Some(4));
        assert_eq!(parse(r#"{"daysPerWeek": 4.5}"#).days_per_week, Some(5));
        assert_eq!(parse(r#"{"daysPerWeek": "3.5"}"#).days_per_week, Some(4));
        assert_eq!(parse(r#"{"daysPerWeek": "five"}"#).days_per_week, None);
        assert_eq!(parse(r#"{"daysPerWeek": true}"#).days_per_week, None);
        assert_eq!(parse(r#"{"daysPerWeek": null}"#).days_per_week, None);

        let odd = parse(r#"{"level": 3, "goal": ["endurance"], "daysPerWeek": {}}"#);
        assert_eq!(odd, Profile::default());

        // Coerced values still normalize like the typed ones
        let normalized = parse(r#"{"level": 3, "daysPerWeek": "5"}"#).normalize();
        assert_eq!(normalized.level, Level::Beginner);
        assert_eq!(normalized.days_per_week, DaysPerWeek::Five);
        assert_eq!(parse(r#"{"daysPerWeek": 3.5}"#).normalize().days_per_week, DaysPerWeek::Five);
        assert_eq!(parse(r#"{"daysPerWeek": 3.0}"#).normalize().days_per_week, DaysPerWeek::Three);
    }
}
