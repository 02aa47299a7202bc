use clap::{Parser, Subcommand};
use fitplan_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fitplan")]
#[command(about = "Weekly workout plan generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Act on behalf of this user instead of the configured one
    #[arg(long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the active plan, creating one if needed (default)
    Plan {
        /// Skill level (beginner, intermediaire, avance)
        #[arg(long)]
        level: Option<String>,

        /// Goal (general, prise_muscle, perte_poids, endurance)
        #[arg(long)]
        goal: Option<String>,

        /// Training days per week (snaps to 3 or 5)
        #[arg(long, allow_hyphen_values = true)]
        days: Option<i64>,

        /// Replace the active plan with a new one
        #[arg(long)]
        regenerate: bool,

        /// Seed the generator for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,

        /// Dry run - show a generated plan without saving it
        #[arg(long)]
        dry_run: bool,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// JSON request body (`-` reads stdin); flags override its fields
        #[arg(long, value_name = "JSON")]
        body: Option<String>,
    },

    /// Show the active plan and its progress
    Show {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark an exercise of the active plan done
    Done {
        /// Day of the week (1-7)
        #[arg(long)]
        day: u8,

        /// Position of the exercise within the day
        #[arg(long)]
        order: u32,

        /// Sets actually performed
        #[arg(long)]
        sets: Option<u32>,

        /// Reps actually performed
        #[arg(long)]
        reps: Option<String>,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },

    /// List all plans, active and superseded
    History,

    /// Show recent workout tracks
    Tracks {
        /// Window in days (defaults to the configured window)
        #[arg(long)]
        days: Option<i64>,
    },

    /// Roll up the track log to CSV
    Rollup {
        /// Clean up processed logs after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

/// On-disk layout under the data directory
struct DataPaths {
    plans: PathBuf,
    wal_dir: PathBuf,
    wal: PathBuf,
    csv: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        let wal_dir = data_dir.join("wal");
        Self {
            plans: data_dir.join("plans").join("plans.json"),
            wal: wal_dir.join("workout_tracks.wal"),
            wal_dir,
            csv: data_dir.join("workout_tracks.csv"),
        }
    }
}

fn main() -> Result<()> {
    fitplan_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);
    let owner = cli.user.unwrap_or_else(|| config.user.id.clone());
    tracing::debug!("Using data dir {:?} for {}", data_dir, owner);

    match cli.command {
        Some(Commands::Plan {
            level,
            goal,
            days,
            regenerate,
            seed,
            dry_run,
            json,
            body,
        }) => {
            let base = match body {
                Some(body) => read_request_body(&body)?,
                None => PlanRequest::default(),
            };
            cmd_plan(
                &paths,
                &owner,
                Profile {
                    level: level.or(base.profile.level),
                    goal: goal.or(base.profile.goal),
                    days_per_week: days.or(base.profile.days_per_week),
                },
                PlanFlags {
                    regenerate: regenerate || base.regenerate,
                    seed,
                    dry_run,
                    json,
                },
                &config,
            )
        }
        Some(Commands::Show { json }) => cmd_show(&paths, &owner, json),
        Some(Commands::Done {
            day,
            order,
            sets,
            reps,
            note,
        }) => cmd_done(
            &paths,
            &owner,
            Completion {
                day,
                order,
                actual_sets: sets,
                actual_reps: reps,
                note,
            },
        ),
        Some(Commands::History) => cmd_history(&paths, &owner),
        Some(Commands::Tracks { days }) => {
            cmd_tracks(&paths, &owner, days.unwrap_or(config.history.window_days))
        }
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&paths, cleanup),
        None => cmd_plan(
            &paths,
            &owner,
            Profile::default(),
            PlanFlags::default(),
            &config,
        ),
    }
}

#[derive(Default)]
struct PlanFlags {
    regenerate: bool,
    seed: Option<u64>,
    dry_run: bool,
    json: bool,
}

/// Parse a plan request body given inline or, for `-`, on stdin
fn read_request_body(body: &str) -> Result<PlanRequest> {
    let text = if body == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        body.to_string()
    };
    Ok(serde_json::from_str(&text)?)
}

fn validated_catalog() -> Result<&'static Catalog> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }
    Ok(catalog)
}

fn cmd_plan(
    paths: &DataPaths,
    owner: &str,
    requested: Profile,
    flags: PlanFlags,
    config: &Config,
) -> Result<()> {
    let catalog = validated_catalog()?;
    let profile = config.defaults.apply(requested);

    // Unknown values still produce a plan; tell the user what was used
    if let Some(level) = profile.level.as_deref() {
        if Level::parse(level).is_none() {
            eprintln!("Unknown level: {}. Using {}.", level, Level::default());
        }
    }
    if let Some(goal) = profile.goal.as_deref() {
        if Goal::parse(goal).is_none() {
            eprintln!("Unknown goal: {}. Using {}.", goal, Goal::default());
        }
    }

    let mut rng = match flags.seed.or(config.generator.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if flags.dry_run {
        let plan = generate_plan(catalog, &profile, &mut rng);
        if flags.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            display_plan(&plan, None);
            println!("\n[Dry run - plan not saved]");
        }
        return Ok(());
    }

    let request = PlanRequest {
        profile,
        regenerate: flags.regenerate,
    };
    let outcome = PlanBook::update(&paths.plans, |book| {
        request_plan(book, catalog, owner, &request, &mut rng)
    })?;

    if flags.json {
        println!("{}", serde_json::to_string_pretty(outcome.plan())?);
        return Ok(());
    }

    match &outcome {
        PlanOutcome::Existing(_) => {
            println!("Using your active plan (pass --regenerate for a new one).");
        }
        PlanOutcome::Created {
            superseded: Some(old),
            ..
        } => {
            println!("✓ New plan created (superseded {})", old);
        }
        PlanOutcome::Created {
            superseded: None, ..
        } => {
            println!("✓ New plan created");
        }
    }

    let stored = outcome.plan();
    display_plan(&stored.record.plan, Some(&PlanProgress::of(stored)));
    Ok(())
}

fn cmd_show(paths: &DataPaths, owner: &str, json: bool) -> Result<()> {
    let book = PlanBook::load(&paths.plans)?;

    let Some(plan) = book.active_plan(owner)? else {
        println!("No active plan. Run `fitplan plan` to create one.");
        return Ok(());
    };

    let progress = PlanProgress::of(&plan);
    if json {
        let value = serde_json::json!({ "plan": plan, "progress": progress });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Plan {} (generated {})", plan.id, plan.record.generated_at.format("%Y-%m-%d %H:%M"));
        display_plan(&plan.record.plan, Some(&progress));
    }
    Ok(())
}

fn cmd_done(paths: &DataPaths, owner: &str, completion: Completion) -> Result<()> {
    let mut sink = JsonlTrackSink::new(&paths.wal);
    let track = record_completion(&paths.plans, &mut sink, owner, completion)?;

    println!(
        "✓ Logged {} (day {}, #{})",
        track.exercise_id,
        track.day,
        track.order + 1
    );
    Ok(())
}

fn cmd_history(paths: &DataPaths, owner: &str) -> Result<()> {
    let book = PlanBook::load(&paths.plans)?;
    let plans = book.plans_for(owner)?;

    if plans.is_empty() {
        println!("No plans yet.");
        return Ok(());
    }

    for plan in plans {
        let progress = PlanProgress::of(&plan);
        let status = if plan.record.active {
            "active".to_string()
        } else {
            match plan.record.superseded_at {
                Some(at) => format!("superseded {}", at.format("%Y-%m-%d")),
                None => "inactive".to_string(),
            }
        };
        println!(
            "{}  {}  {:<30} {}/{} done  [{}]",
            plan.id,
            plan.record.generated_at.format("%Y-%m-%d"),
            plan.record.plan.title,
            progress.completed,
            progress.total,
            status
        );
    }
    Ok(())
}

fn cmd_tracks(paths: &DataPaths, owner: &str, days: i64) -> Result<()> {
    let tracks = load_recent_tracks(&paths.wal, &paths.csv, owner, days)?;

    if tracks.is_empty() {
        println!("No workouts logged in the last {} days.", days);
        return Ok(());
    }

    for track in &tracks {
        let mut line = format!(
            "{}  day {}  {}",
            track.date.format("%Y-%m-%d %H:%M"),
            track.day,
            track.exercise_id
        );
        if let Some(sets) = track.actual_sets {
            line.push_str(&format!("  {} sets", sets));
        }
        if let Some(ref reps) = track.actual_reps {
            line.push_str(&format!("  {} reps", reps));
        }
        if let Some(ref note) = track.note {
            line.push_str(&format!("  \"{}\"", note));
        }
        println!("{}", line);
    }
    Ok(())
}

fn cmd_rollup(paths: &DataPaths, cleanup: bool) -> Result<()> {
    if !paths.wal.exists() {
        println!("No track log found - nothing to roll up.");
        return Ok(());
    }

    let count = fitplan_core::csv_rollup::wal_to_csv_and_archive(&paths.wal, &paths.csv)?;

    println!("✓ Rolled up {} tracks to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = fitplan_core::csv_rollup::cleanup_processed_wals(&paths.wal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed logs", cleaned);
        }
    }

    Ok(())
}

fn display_plan(plan: &GeneratedPlan, progress: Option<&PlanProgress>) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", plan.title);
    println!("╰─────────────────────────────────────────╯");
    println!(
        "  Level: {} | Goal: {} | {} days/week",
        plan.level, plan.goal, plan.days_per_week
    );
    if let Some(progress) = progress {
        println!("  Progress: {}/{} exercises", progress.completed, progress.total);
    }

    for day in plan.training_days() {
        let exercises: Vec<&PlacedExercise> = plan.exercises_on(day).collect();
        let title = exercises.first().map(|e| e.day_title.as_str()).unwrap_or("");
        println!();
        println!("  Day {} - {}", day, title);

        for placed in exercises {
            let mark = if placed.completed { "✓" } else { " " };
            let exercise = &placed.exercise;
            println!(
                "   [{}] #{} {}: {} x {} (rest {}s)",
                mark,
                placed.order + 1,
                exercise.name,
                exercise.sets,
                exercise.reps,
                exercise.rest_seconds
            );
        }
    }

    println!();
}
