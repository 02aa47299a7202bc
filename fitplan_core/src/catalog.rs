//! Default catalog of exercises and program templates.
//!
//! Exercises are grouped into buckets keyed by (level, focus tag). The
//! advanced tier has no full-body bucket; plans for that tier simply skip
//! full-body slots.

use crate::templates::build_default_programs;
use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::types::FocusTag::*;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with built-in exercises and program templates
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn reps(
    id: &str,
    name: &str,
    sets: u32,
    reps: &str,
    rest_seconds: u32,
    muscle_groups: &[FocusTag],
    description: &str,
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        sets,
        reps: reps.into(),
        description: description.into(),
        muscle_groups: muscle_groups.to_vec(),
        duration_minutes: 0,
        rest_seconds,
    }
}

fn timed(
    id: &str,
    name: &str,
    sets: u32,
    duration_minutes: u32,
    rest_seconds: u32,
    muscle_groups: &[FocusTag],
    description: &str,
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        sets,
        reps: format!("{} min", duration_minutes),
        description: description.into(),
        muscle_groups: muscle_groups.to_vec(),
        duration_minutes,
        rest_seconds,
    }
}

fn build_default_catalog_internal() -> Catalog {
    let mut exercises = HashMap::new();

    // ========================================================================
    // Beginner
    // ========================================================================

    exercises.insert(
        (Level::Beginner, Chest),
        vec![
            reps("knee_push_up", "Knee Push-up", 3, "8-10", 60, &[Chest, Arms], "Push-up from the knees, body straight from knees to head"),
            reps("incline_push_up", "Incline Push-up", 3, "10-12", 60, &[Chest, Shoulders], "Hands on a bench or table, lower the chest to the edge"),
            reps("db_floor_press", "Dumbbell Floor Press", 3, "10", 75, &[Chest, Arms], "Lying on the floor, press the dumbbells up until the arms lock out"),
        ],
    );
    exercises.insert(
        (Level::Beginner, Back),
        vec![
            reps("band_row", "Band Row", 3, "12", 60, &[Back, Arms], "Pull a resistance band to the ribs, squeezing the shoulder blades"),
            reps("superman_hold", "Superman", 3, "10", 45, &[Back], "Face down, lift arms and legs off the floor and hold one second"),
            reps("db_bent_row", "Dumbbell Bent-over Row", 3, "10", 60, &[Back, Arms], "Hinge at the hips and row the dumbbells toward the hips"),
        ],
    );
    exercises.insert(
        (Level::Beginner, Legs),
        vec![
            reps("bodyweight_squat", "Bodyweight Squat", 3, "12-15", 60, &[Legs], "Sit back and down until the thighs are parallel, then stand"),
            reps("glute_bridge", "Glute Bridge", 3, "12", 45, &[Legs, Abs], "Lying on the back, drive the hips up by squeezing the glutes"),
            reps("reverse_lunge", "Reverse Lunge", 3, "8 per leg", 60, &[Legs], "Step back and lower the rear knee toward the floor"),
            reps("wall_sit", "Wall Sit", 3, "30s", 45, &[Legs], "Back against a wall, knees at ninety degrees, hold"),
        ],
    );
    exercises.insert(
        (Level::Beginner, Shoulders),
        vec![
            reps("db_shoulder_press", "Seated Dumbbell Press", 3, "10", 60, &[Shoulders, Arms], "Seated, press the dumbbells overhead without arching the back"),
            reps("lateral_raise", "Lateral Raise", 3, "12", 45, &[Shoulders], "Raise light dumbbells out to the side up to shoulder height"),
            reps("pike_hold", "Pike Hold", 3, "20s", 45, &[Shoulders, Abs], "Hips high, hands and feet on the floor, push the floor away"),
        ],
    );
    exercises.insert(
        (Level::Beginner, Arms),
        vec![
            reps("db_curl", "Dumbbell Curl", 3, "12", 45, &[Arms], "Curl the dumbbells with elbows pinned to the sides"),
            reps("bench_dip", "Bench Dip", 3, "8-10", 60, &[Arms, Chest], "Hands on a bench behind you, bend the elbows to ninety degrees"),
            reps("band_pushdown", "Band Triceps Pushdown", 3, "15", 45, &[Arms], "Anchor the band high and extend the elbows fully"),
        ],
    );
    exercises.insert(
        (Level::Beginner, Abs),
        vec![
            reps("forearm_plank", "Forearm Plank", 3, "30s", 45, &[Abs], "Hold a straight line from shoulders to heels"),
            reps("dead_bug", "Dead Bug", 3, "10 per side", 45, &[Abs], "Lower opposite arm and leg while the lower back stays flat"),
            reps("crunch", "Crunch", 3, "15", 45, &[Abs], "Curl the shoulders off the floor, chin away from the chest"),
        ],
    );
    exercises.insert(
        (Level::Beginner, Cardio),
        vec![
            timed("brisk_walk", "Brisk Walk", 1, 20, 0, &[Cardio, Legs], "Steady walk at a pace that raises breathing"),
            timed("easy_cycling", "Easy Cycling", 1, 15, 0, &[Cardio, Legs], "Stationary or outdoor bike at a conversational pace"),
            timed("jumping_jacks", "Jumping Jacks", 3, 2, 60, &[Cardio, FullBody], "Continuous jacks with a soft landing"),
        ],
    );
    exercises.insert(
        (Level::Beginner, FullBody),
        vec![
            reps("squat_to_press", "Squat to Press", 3, "10", 60, &[FullBody, Legs, Shoulders], "Squat with dumbbells at the shoulders, press overhead on the way up"),
            reps("step_back_burpee", "Step-back Burpee", 3, "6", 75, &[FullBody, Cardio], "Burpee stepping the feet back and forward instead of jumping"),
            reps("bear_crawl", "Bear Crawl", 3, "20s", 60, &[FullBody, Abs], "Crawl on hands and feet with the knees just off the floor"),
        ],
    );

    // ========================================================================
    // Intermediate
    // ========================================================================

    exercises.insert(
        (Level::Intermediate, Chest),
        vec![
            reps("push_up", "Push-up", 4, "12-15", 60, &[Chest, Arms], "Full push-up, chest to a fist height from the floor"),
            reps("db_bench_press", "Dumbbell Bench Press", 4, "8-10", 90, &[Chest, Arms], "Press the dumbbells from chest level on a flat bench"),
            reps("db_fly", "Dumbbell Fly", 3, "12", 60, &[Chest], "Open the arms wide with soft elbows, then hug back up"),
            reps("decline_push_up", "Decline Push-up", 3, "10", 60, &[Chest, Shoulders], "Feet raised on a bench, full range push-up"),
        ],
    );
    exercises.insert(
        (Level::Intermediate, Back),
        vec![
            reps("inverted_row", "Inverted Row", 4, "10", 75, &[Back, Arms], "Under a bar or table, pull the chest up to it"),
            reps("one_arm_row", "One-arm Dumbbell Row", 4, "10 per side", 60, &[Back, Arms], "Knee on a bench, row the dumbbell to the hip"),
            reps("band_pull_apart", "Band Pull-apart", 3, "15", 45, &[Back, Shoulders], "Arms straight, pull the band apart to the chest"),
        ],
    );
    exercises.insert(
        (Level::Intermediate, Legs),
        vec![
            reps("goblet_squat", "Goblet Squat", 4, "10-12", 90, &[Legs, Abs], "Hold a dumbbell at the chest and squat below parallel"),
            reps("romanian_deadlift", "Romanian Deadlift", 4, "10", 90, &[Legs, Back], "Hinge with a flat back until a hamstring stretch, then stand"),
            reps("walking_lunge", "Walking Lunge", 3, "10 per leg", 75, &[Legs], "Alternate long lunges while moving forward"),
            reps("bulgarian_split_squat", "Bulgarian Split Squat", 3, "8 per leg", 90, &[Legs], "Rear foot on a bench, lower straight down"),
        ],
    );
    exercises.insert(
        (Level::Intermediate, Shoulders),
        vec![
            reps("standing_press", "Standing Dumbbell Press", 4, "8-10", 90, &[Shoulders, Arms], "Brace the core and press overhead to lockout"),
            reps("arnold_press", "Arnold Press", 3, "10", 75, &[Shoulders], "Rotate the palms from facing you to facing forward while pressing"),
            reps("rear_delt_fly", "Rear Delt Fly", 3, "12", 45, &[Shoulders, Back], "Bent over, raise light dumbbells out to the side"),
        ],
    );
    exercises.insert(
        (Level::Intermediate, Arms),
        vec![
            reps("hammer_curl", "Hammer Curl", 3, "10-12", 60, &[Arms], "Neutral grip curl, no swinging"),
            reps("diamond_push_up", "Diamond Push-up", 3, "8-10", 60, &[Arms, Chest], "Hands together under the chest, elbows close"),
            reps("overhead_extension", "Overhead Triceps Extension", 3, "12", 60, &[Arms], "Lower a dumbbell behind the head, extend fully"),
        ],
    );
    exercises.insert(
        (Level::Intermediate, Abs),
        vec![
            reps("side_plank", "Side Plank", 3, "30s per side", 45, &[Abs], "Hips high, body in one line, switch sides"),
            reps("bicycle_crunch", "Bicycle Crunch", 3, "20", 45, &[Abs], "Bring elbow to opposite knee in a controlled rhythm"),
            reps("hanging_knee_raise", "Hanging Knee Raise", 3, "10", 60, &[Abs, Arms], "Hang from a bar and bring the knees to the chest"),
        ],
    );
    exercises.insert(
        (Level::Intermediate, Cardio),
        vec![
            timed("interval_run", "Interval Run", 1, 20, 0, &[Cardio, Legs], "Alternate one minute fast and two minutes easy"),
            timed("jump_rope", "Jump Rope", 4, 3, 60, &[Cardio], "Steady skipping with a relaxed grip"),
            timed("rowing_machine", "Rowing Machine", 1, 15, 0, &[Cardio, Back], "Moderate pace, push with the legs first"),
        ],
    );
    exercises.insert(
        (Level::Intermediate, FullBody),
        vec![
            reps("burpee", "Burpee", 4, "10", 75, &[FullBody, Cardio], "Squat, jump the feet back, push-up, jump up"),
            reps("kettlebell_swing", "Kettlebell Swing", 4, "15", 75, &[FullBody, Legs, Back], "Hinge and snap the hips to swing the bell to chest height"),
            reps("thruster", "Dumbbell Thruster", 3, "10", 90, &[FullBody, Legs, Shoulders], "Front squat flowing straight into an overhead press"),
        ],
    );

    // ========================================================================
    // Advanced
    // ========================================================================

    exercises.insert(
        (Level::Advanced, Chest),
        vec![
            reps("barbell_bench_press", "Barbell Bench Press", 5, "5", 150, &[Chest, Arms], "Heavy press with shoulder blades retracted"),
            reps("weighted_dip", "Weighted Dip", 4, "6-8", 120, &[Chest, Arms], "Lean forward slightly to bias the chest"),
            reps("archer_push_up", "Archer Push-up", 4, "6 per side", 90, &[Chest, Arms], "Shift the weight to one arm while the other stays straight"),
        ],
    );
    exercises.insert(
        (Level::Advanced, Back),
        vec![
            reps("weighted_pull_up", "Weighted Pull-up", 5, "5", 150, &[Back, Arms], "Dead hang to chin over bar with added load"),
            reps("barbell_row", "Barbell Row", 4, "6-8", 120, &[Back, Arms], "Torso near parallel, row the bar to the lower chest"),
            reps("deadlift", "Deadlift", 5, "3-5", 180, &[Back, Legs], "Pull from the floor with a neutral spine"),
        ],
    );
    exercises.insert(
        (Level::Advanced, Legs),
        vec![
            reps("back_squat", "Barbell Back Squat", 5, "5", 180, &[Legs, Abs], "Heavy squat to depth, bar on the upper back"),
            reps("pistol_squat", "Pistol Squat", 4, "5 per leg", 120, &[Legs, Abs], "Single-leg squat with the other leg held out front"),
            reps("jump_lunge", "Jump Lunge", 4, "10 per leg", 90, &[Legs, Cardio], "Switch legs in the air, land softly"),
            reps("nordic_curl", "Nordic Hamstring Curl", 3, "5", 120, &[Legs], "Lower the body slowly with the heels anchored"),
        ],
    );
    exercises.insert(
        (Level::Advanced, Shoulders),
        vec![
            reps("push_press", "Push Press", 5, "5", 150, &[Shoulders, Legs], "Dip and drive with the legs to press the bar overhead"),
            reps("handstand_push_up", "Handstand Push-up", 4, "5-8", 120, &[Shoulders, Arms], "Against a wall, lower the head to the floor and press"),
            reps("face_pull", "Face Pull", 4, "15", 60, &[Shoulders, Back], "Pull the rope to the face with elbows high"),
        ],
    );
    exercises.insert(
        (Level::Advanced, Arms),
        vec![
            reps("chin_up", "Chin-up", 4, "8", 90, &[Arms, Back], "Supinated grip pull-up, full range"),
            reps("close_grip_bench", "Close-grip Bench Press", 4, "6-8", 120, &[Arms, Chest], "Hands shoulder width, elbows tucked"),
            reps("ez_bar_curl", "EZ-bar Curl", 4, "8-10", 75, &[Arms], "Strict curl with a controlled negative"),
        ],
    );
    exercises.insert(
        (Level::Advanced, Abs),
        vec![
            reps("hanging_leg_raise", "Hanging Leg Raise", 4, "10", 75, &[Abs], "Straight legs to the bar without swinging"),
            reps("ab_wheel", "Ab Wheel Rollout", 4, "10", 75, &[Abs, Shoulders], "Roll out until the hips extend, pull back with the core"),
            reps("dragon_flag", "Dragon Flag", 3, "5", 90, &[Abs], "Lower the straight body from the shoulders under control"),
        ],
    );
    exercises.insert(
        (Level::Advanced, Cardio),
        vec![
            timed("sprint_intervals", "Sprint Intervals", 1, 20, 0, &[Cardio, Legs], "Ten rounds of thirty second sprints with ninety seconds walking"),
            timed("tempo_run", "Tempo Run", 1, 30, 0, &[Cardio, Legs], "Comfortably hard pace held for the whole run"),
            timed("assault_bike", "Assault Bike Intervals", 6, 1, 90, &[Cardio, FullBody], "All-out effort for one minute each round"),
        ],
    );

    Catalog {
        exercises,
        programs: build_default_programs(),
    }
}

impl Catalog {
    /// Exercises for a level and focus tag, if the catalog has that bucket
    pub fn bucket(&self, level: Level, focus: FocusTag) -> Option<&[Exercise]> {
        self.exercises
            .get(&(level, focus))
            .map(Vec::as_slice)
            .filter(|bucket| !bucket.is_empty())
    }

    pub fn program(&self, goal: Goal) -> Option<&ProgramTemplate> {
        self.programs.get(&goal)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for ((level, focus), bucket) in &self.exercises {
            let mut seen = HashSet::new();
            for exercise in bucket {
                if exercise.id.is_empty() {
                    errors.push(format!("Exercise in {}/{} has empty ID", level, focus.as_str()));
                }
                if exercise.name.is_empty() {
                    errors.push(format!("Exercise '{}' has empty name", exercise.id));
                }
                if exercise.sets == 0 {
                    errors.push(format!("Exercise '{}' has zero sets", exercise.id));
                }
                if !seen.insert(exercise.id.as_str()) {
                    errors.push(format!(
                        "Exercise '{}' appears twice in {}/{}",
                        exercise.id,
                        level,
                        focus.as_str()
                    ));
                }
            }
        }

        for goal in Goal::ALL {
            let Some(template) = self.programs.get(&goal) else {
                errors.push(format!("Goal '{}' has no program template", goal));
                continue;
            };

            for days_per_week in [DaysPerWeek::Three, DaysPerWeek::Five] {
                let days = template.days_for(days_per_week);
                if days.len() != days_per_week.count() as usize {
                    errors.push(format!(
                        "Template '{}' has {} days for a {}-day week",
                        goal,
                        days.len(),
                        days_per_week
                    ));
                }

                for pair in days.windows(2) {
                    if pair[0].day >= pair[1].day {
                        errors.push(format!(
                            "Template '{}' days are not increasing: {} then {}",
                            goal, pair[0].day, pair[1].day
                        ));
                    }
                }

                for training_day in days {
                    if !(1..=7).contains(&training_day.day) {
                        errors.push(format!(
                            "Template '{}' has out of range day {}",
                            goal, training_day.day
                        ));
                    }

                    // Every day must yield at least one exercise at every level
                    for level in Level::ALL {
                        let covered = training_day
                            .focus
                            .iter()
                            .any(|focus| self.bucket(level, *focus).is_some());
                        if !covered {
                            errors.push(format!(
                                "Template '{}' day {} has no exercises for level {}",
                                goal, training_day.day, level
                            ));
                        }
                    }
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.exercises.len(), 23);
        assert_eq!(catalog.programs.len(), Goal::ALL.len());
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_advanced_has_no_full_body_bucket() {
        let catalog = get_default_catalog();
        assert!(catalog.bucket(Level::Advanced, FullBody).is_none());
        assert!(catalog.bucket(Level::Beginner, FullBody).is_some());
    }

    #[test]
    fn test_buckets_hold_enough_for_a_full_draw() {
        let catalog = build_default_catalog();
        for ((_, focus), bucket) in &catalog.exercises {
            assert!(
                bucket.len() >= focus.draw_count(),
                "bucket {} too small",
                focus.as_str()
            );
        }
    }

    #[test]
    fn test_timed_exercises_carry_duration() {
        let catalog = build_default_catalog();
        for level in Level::ALL {
            for exercise in catalog.bucket(level, Cardio).unwrap() {
                assert!(exercise.duration_minutes > 0, "{}", exercise.id);
            }
        }
    }

    #[test]
    fn test_validate_reports_uncovered_day() {
        let mut catalog = build_default_catalog();
        catalog.exercises.remove(&(Level::Advanced, Legs));

        let errors = catalog.validate();
        // Prise muscle 5-day week has a legs-only day
        assert!(errors
            .iter()
            .any(|e| e.contains("prise_muscle") && e.contains("level avance")));
    }

    #[test]
    fn test_validate_reports_missing_template() {
        let mut catalog = build_default_catalog();
        catalog.programs.remove(&Goal::Endurance);

        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("endurance")));
    }
}
