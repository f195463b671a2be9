use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use liftlog_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Gym progress tracking and progressive overload suggestions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a completed set
    Log {
        /// Exercise name
        exercise: String,

        /// Weight in kg (omit for bodyweight)
        #[arg(long)]
        weight: Option<f64>,

        /// Repetitions performed
        #[arg(long)]
        reps: Option<u32>,

        /// Mark as a warmup set (excluded from all stats)
        #[arg(long)]
        warmup: bool,

        /// Mark as cardio (excluded from strength rankings)
        #[arg(long)]
        cardio: bool,

        /// Session date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the progressive-overload suggestion for an exercise
    Suggest {
        /// Exercise name
        exercise: String,
    },

    /// Show session history, personal records, and goal progress
    Stats {
        /// Exercise name
        exercise: String,
    },

    /// Manage lifting goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Print the recent training summary (coaching context)
    Coach,

    /// Roll up the set log to the CSV archive
    Rollup {
        /// Clean up processed log files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(Subcommand)]
enum GoalAction {
    /// Add a target weight for an exercise
    Add {
        /// Exercise name
        exercise: String,

        /// Target weight in kg
        #[arg(long)]
        target: f64,

        /// Target reps at that weight
        #[arg(long)]
        reps: Option<u32>,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Free-form note
        #[arg(long)]
        notes: Option<String>,
    },

    /// List all goals with current progress
    List,
}

/// Resolved data file locations under the data directory
struct Paths {
    log: PathBuf,
    csv: PathBuf,
    goals: PathBuf,
}

impl Paths {
    fn new(data_dir: &PathBuf) -> Self {
        Self {
            log: data_dir.join("log").join("sets.jsonl"),
            csv: data_dir.join("sets.csv"),
            goals: data_dir.join("goals.json"),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    liftlog_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = Paths::new(&data_dir);

    match cli.command {
        Some(Commands::Log {
            exercise,
            weight,
            reps,
            warmup,
            cardio,
            date,
        }) => cmd_log(&paths, exercise, weight, reps, warmup, cardio, date),
        Some(Commands::Suggest { exercise }) => cmd_suggest(&paths, &exercise, &config),
        Some(Commands::Stats { exercise }) => cmd_stats(&paths, &exercise),
        Some(Commands::Goal { action }) => cmd_goal(&paths, action),
        Some(Commands::Coach) => cmd_coach(&paths, &config),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&paths, cleanup),
        None => cmd_coach(&paths, &config),
    }
}

fn cmd_log(
    paths: &Paths,
    exercise: String,
    weight: Option<f64>,
    reps: Option<u32>,
    warmup: bool,
    cardio: bool,
    date: Option<NaiveDate>,
) -> Result<()> {
    let now = Utc::now();
    let set = SetRecord {
        id: uuid::Uuid::new_v4(),
        exercise: exercise.trim().to_lowercase(),
        weight_kg: weight,
        reps,
        is_warmup: warmup,
        is_cardio: cardio,
        completed_at: now,
        session_date: date.unwrap_or_else(|| now.date_naive()),
    };

    let mut sink = JsonlSink::new(&paths.log);
    sink.append(&set)?;

    let weight_str = set
        .weight_kg
        .map(|w| format!("{} kg", format_kg(w)))
        .unwrap_or_else(|| "bodyweight".into());
    let kind = if set.is_warmup { " (warmup)" } else { "" };
    println!(
        "✓ Logged {}: {} × {}{}",
        set.exercise,
        weight_str,
        set.reps.unwrap_or(0),
        kind
    );

    Ok(())
}

fn cmd_suggest(paths: &Paths, exercise: &str, config: &Config) -> Result<()> {
    let all_sets = liftlog_core::history::load_all_sets(&paths.log, &paths.csv)?;
    let exercise_sets = liftlog_core::history::sets_for_exercise(&all_sets, exercise);

    // Summaries come back oldest-first; the advisor wants most-recent-first
    let mut summaries = aggregate_sessions(&exercise_sets);
    summaries.reverse();

    let suggestion = suggest(&summaries, &config.progression);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  SUGGESTION: {}", exercise);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", suggestion.message());
    if let Some(weight) = suggestion.suggested_weight() {
        println!("  → Weight: {} kg", format_kg(weight));
    }
    if let Some(reps) = suggestion.suggested_reps() {
        println!("  → Reps: {}", reps);
    }
    println!("  → Confidence: {:?}", suggestion.confidence());
    println!();

    Ok(())
}

fn cmd_stats(paths: &Paths, exercise: &str) -> Result<()> {
    let all_sets = liftlog_core::history::load_all_sets(&paths.log, &paths.csv)?;
    let exercise_sets = liftlog_core::history::sets_for_exercise(&all_sets, exercise);

    let summaries = aggregate_sessions(&exercise_sets);
    if summaries.is_empty() {
        println!("No history for '{}' yet.", exercise);
        return Ok(());
    }

    println!("\nSessions for {}:", exercise);
    for summary in &summaries {
        println!(
            "  {}  best {} kg × {}  e1RM {} kg  volume {} kg",
            summary.date,
            format_kg(summary.best_weight),
            summary.best_reps,
            format_kg(summary.estimated_1rm),
            format_kg(summary.total_volume)
        );
    }

    let records = compute_records(&summaries);
    if !records.is_empty() {
        println!("\nPersonal records:");
        for record in &records {
            match record.kind {
                RecordKind::Weight => println!(
                    "  Heaviest set: {} kg × {} ({})",
                    format_kg(record.value),
                    record.reps.unwrap_or(0),
                    record.date
                ),
                RecordKind::OneRepMax => {
                    println!("  Estimated 1RM: {} kg ({})", format_kg(record.value), record.date)
                }
                RecordKind::Volume => {
                    println!("  Session volume: {} kg ({})", format_kg(record.value), record.date)
                }
            }
        }
    }

    let book = GoalBook::load(&paths.goals)?;
    let progress = compute_goal_progress(&book.goals_for(exercise), &summaries);
    if !progress.is_empty() {
        println!("\nGoals:");
        for p in &progress {
            println!(
                "  {} kg target: {:.0}% there ({} kg to go)",
                format_kg(p.goal.target_weight_kg),
                p.progress,
                format_kg(p.remaining)
            );
        }
    }
    println!();

    Ok(())
}

fn cmd_goal(paths: &Paths, action: GoalAction) -> Result<()> {
    match action {
        GoalAction::Add {
            exercise,
            target,
            reps,
            date,
            notes,
        } => {
            let goal = Goal {
                id: uuid::Uuid::new_v4(),
                exercise: exercise.trim().to_lowercase(),
                target_weight_kg: target,
                target_reps: reps,
                target_date: date,
                achieved: false,
                notes,
            };

            GoalBook::update(&paths.goals, |book| {
                book.goals.push(goal.clone());
                Ok(())
            })?;

            println!("✓ Goal added: {} {} kg", goal.exercise, format_kg(target));
        }

        GoalAction::List => {
            let book = GoalBook::load(&paths.goals)?;
            if book.goals.is_empty() {
                println!("No goals set.");
                return Ok(());
            }

            let all_sets = liftlog_core::history::load_all_sets(&paths.log, &paths.csv)?;
            for goal in &book.goals {
                let exercise_sets =
                    liftlog_core::history::sets_for_exercise(&all_sets, &goal.exercise);
                let summaries = aggregate_sessions(&exercise_sets);
                let progress = compute_goal_progress(&[goal.clone()], &summaries);

                match progress.first() {
                    Some(p) => println!(
                        "  {}: {} kg target, {:.0}% ({} kg to go)",
                        goal.exercise,
                        format_kg(goal.target_weight_kg),
                        p.progress,
                        format_kg(p.remaining)
                    ),
                    None => println!(
                        "  {}: {} kg target, no sessions yet",
                        goal.exercise,
                        format_kg(goal.target_weight_kg)
                    ),
                }
            }
        }
    }

    Ok(())
}

fn cmd_coach(paths: &Paths, config: &Config) -> Result<()> {
    // Full history: the summarizer windows everything itself, but needs
    // all-time sets to report real record weights
    let sets = liftlog_core::history::load_all_sets(&paths.log, &paths.csv)?;
    let sessions = liftlog_core::summary::sessions_from_sets(&sets);
    let history = summarize_history(Utc::now().date_naive(), &sessions, &sets, &config.summary);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  TRAINING SUMMARY (last {} days)", config.summary.lookback_days);
    println!("╰─────────────────────────────────────────╯");

    if history.recent_workouts.is_empty() {
        println!("\n  No workouts in the window. Time to lift!\n");
        return Ok(());
    }

    println!("\nRecent workouts:");
    for workout in &history.recent_workouts {
        let duration = workout
            .duration_minutes
            .map(|m| format!(", {} min", m))
            .unwrap_or_default();
        let heaviest = workout
            .heaviest_set
            .as_deref()
            .map(|s| format!(" - top set {}", s))
            .unwrap_or_default();
        println!(
            "  {}  {} ({} exercises{}){}",
            workout.date, workout.label, workout.exercise_count, duration, heaviest
        );
    }

    if !history.top_exercises.is_empty() {
        println!("\nMost trained:");
        for exercise in &history.top_exercises {
            println!(
                "  {} ({}×): last {} kg × {} - {}",
                exercise.name,
                exercise.times_performed,
                format_kg(exercise.last_weight_kg),
                exercise.last_reps,
                exercise.suggestion
            );
        }
    }

    if !history.personal_records.is_empty() {
        println!("\nHeaviest lifts:");
        for lift in &history.personal_records {
            println!(
                "  {} {} kg × {}",
                lift.exercise,
                format_kg(lift.weight_kg),
                lift.reps
            );
        }
    }
    println!();

    Ok(())
}

fn cmd_rollup(paths: &Paths, cleanup: bool) -> Result<()> {
    if !paths.log.exists() {
        println!("No set log found - nothing to roll up.");
        return Ok(());
    }

    let count = liftlog_core::csv_rollup::log_to_csv_and_archive(&paths.log, &paths.csv)?;

    println!("✓ Rolled up {} sets to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        if let Some(log_dir) = paths.log.parent() {
            let cleaned = liftlog_core::csv_rollup::cleanup_processed_logs(log_dir)?;
            if cleaned > 0 {
                println!("✓ Cleaned up {} processed log files", cleaned);
            }
        }
    }

    Ok(())
}
