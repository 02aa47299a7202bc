//! Built-in program templates.
//!
//! One template per goal, each with a 3-day and a 5-day arrangement.
//! Three-day weeks train Monday, Wednesday and Friday; five-day weeks
//! train Monday through Friday.

use crate::types::*;
use std::collections::HashMap;

use crate::types::FocusTag::*;

impl ProgramTemplate {
    /// Training days for the given cadence, in week order
    pub fn days_for(&self, days_per_week: DaysPerWeek) -> &[TrainingDay] {
        match days_per_week {
            DaysPerWeek::Three => &self.three_days,
            DaysPerWeek::Five => &self.five_days,
        }
    }
}

fn day(day: u8, title: &str, focus: &[FocusTag]) -> TrainingDay {
    TrainingDay {
        day,
        focus: focus.to_vec(),
        title: title.into(),
    }
}

/// Builds the default program templates keyed by goal
pub fn build_default_programs() -> HashMap<Goal, ProgramTemplate> {
    let mut programs = HashMap::new();

    programs.insert(
        Goal::General,
        ProgramTemplate {
            goal: Goal::General,
            title: "General Fitness".into(),
            description: "Balanced strength and conditioning across the whole body".into(),
            three_days: vec![
                day(1, "Full Body A", &[FullBody, Legs, Chest]),
                day(3, "Full Body B", &[FullBody, Back, Shoulders]),
                day(5, "Conditioning & Core", &[Cardio, Abs, Arms]),
            ],
            five_days: vec![
                day(1, "Upper Body", &[Chest, Back]),
                day(2, "Lower Body", &[Legs, Abs]),
                day(3, "Cardio & Core", &[Cardio, Abs]),
                day(4, "Shoulders & Arms", &[Shoulders, Arms]),
                day(5, "Full Body Finisher", &[FullBody, Legs, Cardio]),
            ],
        },
    );

    programs.insert(
        Goal::PriseMuscle,
        ProgramTemplate {
            goal: Goal::PriseMuscle,
            title: "Muscle Gain".into(),
            description: "Hypertrophy split with moderate reps and longer rests".into(),
            three_days: vec![
                day(1, "Push", &[Chest, Shoulders, Arms]),
                day(3, "Pull", &[Back, Arms]),
                day(5, "Legs & Core", &[Legs, Abs]),
            ],
            five_days: vec![
                day(1, "Chest & Triceps", &[Chest, Arms]),
                day(2, "Back & Core", &[Back, Abs]),
                day(3, "Legs", &[Legs]),
                day(4, "Shoulders & Core", &[Shoulders, Abs]),
                day(5, "Arms & Conditioning", &[Arms, Cardio]),
            ],
        },
    );

    programs.insert(
        Goal::PertePoids,
        ProgramTemplate {
            goal: Goal::PertePoids,
            title: "Weight Loss".into(),
            description: "Cardio-led sessions paired with compound strength work".into(),
            three_days: vec![
                day(1, "Metabolic Circuit", &[Cardio, FullBody, Abs]),
                day(3, "Lower Body Burn", &[Cardio, Legs, Back]),
                day(5, "Upper Body Burn", &[Cardio, Chest, Abs]),
            ],
            five_days: vec![
                day(1, "Cardio & Legs", &[Cardio, Legs]),
                day(2, "Cardio & Upper Body", &[Cardio, Chest, Back]),
                day(3, "Core Circuit", &[FullBody, Abs]),
                day(4, "Cardio & Arms", &[Cardio, Shoulders, Arms]),
                day(5, "Metabolic Finisher", &[Cardio, FullBody, Legs]),
            ],
        },
    );

    programs.insert(
        Goal::Endurance,
        ProgramTemplate {
            goal: Goal::Endurance,
            title: "Endurance".into(),
            description: "Aerobic base building with supporting strength".into(),
            three_days: vec![
                day(1, "Aerobic Base & Legs", &[Cardio, Legs]),
                day(3, "Tempo & Core", &[Cardio, Abs]),
                day(5, "Long Effort", &[Cardio, FullBody, Back]),
            ],
            five_days: vec![
                day(1, "Aerobic Base & Legs", &[Cardio, Legs]),
                day(2, "Intervals & Core", &[Cardio, Abs]),
                day(3, "Recovery & Back", &[Cardio, Back]),
                day(4, "Mixed Conditioning", &[Cardio, FullBody]),
                day(5, "Long Effort", &[Cardio, Legs, Abs]),
            ],
        },
    );

    programs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_goal_has_a_template() {
        let programs = build_default_programs();
        for goal in Goal::ALL {
            let template = programs.get(&goal).expect("template missing");
            assert_eq!(template.goal, goal);
        }
    }

    #[test]
    fn test_cadences_match_day_counts() {
        for template in build_default_programs().values() {
            assert_eq!(template.days_for(DaysPerWeek::Three).len(), 3);
            assert_eq!(template.days_for(DaysPerWeek::Five).len(), 5);
        }
    }

    #[test]
    fn test_three_day_weeks_skip_a_day_between_sessions() {
        for template in build_default_programs().values() {
            let days: Vec<u8> = template
                .days_for(DaysPerWeek::Three)
                .iter()
                .map(|d| d.day)
                .collect();
            assert_eq!(days, vec![1, 3, 5], "template {}", template.goal);
        }
    }
}
