//! Kaiteki CLI - daily wellness tracking from the terminal.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kaiteki_coach::{CannedCoach, Coach, HttpCoach, MealSuggestionRequest, MealType};
use kaiteki_core::{DayKey, Pillar, ProfileDraft, UserId, UserProfile};
use kaiteki_engine::{
    compute_average, DayTracker, FinishGate, FinishOutcome, Routine, DEFAULT_FINISH_THRESHOLD,
};
use kaiteki_storage::{JsonStore, Store};
use tokio::sync::Mutex;
use tracing::Level;

#[derive(Parser)]
#[command(name = "kaiteki")]
#[command(about = "Daily wellness tracker: tea ritual, nutrition, movement", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, default_value = ".kaiteki")]
    data_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Complete onboarding
    Onboard {
        /// Display name
        #[arg(long)]
        name: String,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Current weight in kg
        #[arg(long)]
        weight: f32,
        /// Weight goal in kg
        #[arg(long)]
        goal: f32,
        /// Height in meters
        #[arg(long)]
        height: Option<f32>,
        /// Medication dose, when taking medication
        #[arg(long)]
        medication_dose: Option<String>,
        /// Personal dream
        #[arg(long)]
        dream: Option<String>,
    },
    /// Show profile and today's progress
    Show,
    /// Complete one tea ritual checklist item
    Ritual,
    /// Register one healthy meal
    Meal,
    /// Record movement (one exercise, or a whole routine)
    Move {
        /// Routine: morning, active or night
        routine: String,
        /// Mark the whole routine complete
        #[arg(long)]
        complete: bool,
    },
    /// Finish the day
    Finish {
        /// Weight change in kg since the last check-in
        #[arg(long, allow_hyphen_values = true)]
        weight_change: Option<f32>,
    },
    /// Show one day's record
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// List finished days for the calendar
    Calendar,
    /// Ask the coach for a meal suggestion
    Suggest {
        /// Meal: breakfast, lunch, dinner or snack
        meal_type: String,
    },
    /// Reset onboarding (profile data is kept)
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let store = Arc::new(Mutex::new(JsonStore::new(&cli.data_dir).await?));
    let user = resolve_user(&cli.data_dir).await?;
    let today = DayKey::today();

    match cli.command {
        Commands::Onboard {
            name,
            age,
            weight,
            goal,
            height,
            medication_dose,
            dream,
        } => {
            let draft = ProfileDraft {
                name,
                age,
                current_weight_kg: weight,
                weight_goal_kg: goal,
                height_m: height,
                takes_medication: medication_dose.is_some(),
                medication_dose,
                personal_dream: dream.unwrap_or_default(),
            };
            let profile = match draft.validate(chrono::Utc::now()) {
                Ok(profile) => profile,
                Err(e) => {
                    println!("Check your answers: {}", e);
                    return Ok(());
                }
            };
            store.lock().await.save_profile(user, &profile).await?;

            let mut tracker = DayTracker::open(store, user, today).await?;
            tracker.zero_init().await?;

            println!("Welcome, {}! Today's record is ready.", profile.name);
        }
        Commands::Show => {
            let Some(profile) = load_onboarded(&store, user).await? else {
                println!("Run `kaiteki onboard` first.");
                return Ok(());
            };
            let tracker = DayTracker::open(store, user, today).await?;
            let progress = tracker.progress();

            println!("{} | dream: {}", profile.name, profile.personal_dream);
            if let Some(bmi) = profile.bmi() {
                println!(
                    "  weight: {}kg (goal {}kg) | BMI {:.1}",
                    profile.current_weight_kg, profile.weight_goal_kg, bmi
                );
            } else {
                println!(
                    "  weight: {}kg (goal {}kg)",
                    profile.current_weight_kg, profile.weight_goal_kg
                );
            }
            println!("Today ({}):", today);
            for pillar in Pillar::ALL {
                println!("  {:<10} {:>3}%", pillar.to_string(), progress.score(pillar));
            }
            println!(
                "  average {:.1}% | {}",
                compute_average(progress),
                if progress.day_finished {
                    "day finished"
                } else {
                    "day open"
                }
            );
        }
        Commands::Ritual => {
            require_onboarded(&store, user).await?;
            let mut tracker = DayTracker::open(store, user, today).await?;
            let score = tracker.complete_ritual_step().await?;
            println!("Ritual at {}%", score);
        }
        Commands::Meal => {
            require_onboarded(&store, user).await?;
            let mut tracker = DayTracker::open(store, user, today).await?;
            let score = tracker.register_meal().await?;
            println!("Nutrition at {}%", score);
        }
        Commands::Move { routine, complete } => {
            require_onboarded(&store, user).await?;
            let routine: Routine = routine
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let mut tracker = DayTracker::open(store, user, today).await?;
            let score = if complete {
                tracker.complete_routine(routine).await?
            } else {
                tracker.complete_exercise(routine).await?
            };
            println!("{}: movement at {}%", routine, score);
        }
        Commands::Finish { weight_change } => {
            let Some(profile) = load_onboarded(&store, user).await? else {
                println!("Run `kaiteki onboard` first.");
                return Ok(());
            };
            let coach = make_coach();
            let mut tracker = DayTracker::open(store, user, today).await?;

            let outcome = tracker
                .finish_day(coach.as_ref(), &profile, weight_change, FinishGate::default())
                .await?;
            match outcome {
                FinishOutcome::Rejected { average } => {
                    println!(
                        "Not yet - today averages {:.1}%, keep going to reach {}%.",
                        average, DEFAULT_FINISH_THRESHOLD
                    );
                }
                FinishOutcome::AlreadyFinished => {
                    println!("Today is already finished. See you tomorrow!");
                }
                FinishOutcome::Finished {
                    affirmation: Some(message),
                } => {
                    println!("Day finished!");
                    println!("{}", message);
                }
                FinishOutcome::Finished { affirmation: None } => {
                    println!("Day finished! Well done.");
                }
            }
        }
        Commands::Day { date } => {
            let key: DayKey = date.parse()?;
            let tracker = DayTracker::open(store, user, today).await?;
            match tracker.get_day(key).await? {
                Some(progress) => {
                    println!("{}:", key);
                    for pillar in Pillar::ALL {
                        println!(
                            "  {:<10} {:>3}%",
                            pillar.to_string(),
                            progress.score(pillar)
                        );
                    }
                    println!(
                        "  {}",
                        if progress.day_finished {
                            "finished"
                        } else {
                            "open"
                        }
                    );
                }
                None => println!("No activity recorded for {}.", key),
            }
        }
        Commands::Calendar => {
            let tracker = DayTracker::open(store, user, today).await?;
            let finished = tracker.finished_days().await?;
            if finished.is_empty() {
                println!("No finished days yet.");
            } else {
                println!("Finished days ({}):", finished.len());
                for day in finished {
                    println!("  {}", day);
                }
            }
        }
        Commands::Suggest { meal_type } => {
            let Some(profile) = load_onboarded(&store, user).await? else {
                println!("Run `kaiteki onboard` first.");
                return Ok(());
            };
            let meal_type: MealType = meal_type
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let coach = make_coach();

            let suggestion = coach
                .meal_suggestion(&MealSuggestionRequest {
                    meal_type,
                    personal_dream: profile.personal_dream.clone(),
                })
                .await?;
            println!("{} - {}", suggestion.meal_name, suggestion.description);
            println!("Ingredients:");
            for ingredient in &suggestion.ingredients {
                println!("  - {}", ingredient);
            }
            println!("Instructions:");
            for (i, step) in suggestion.instructions.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!("Why it works: {}", suggestion.why_it_works);
        }
        Commands::Reset => {
            let mut guard = store.lock().await;
            match guard.load_profile(user).await? {
                Some(mut profile) => {
                    profile.reset_onboarding();
                    guard.save_profile(user, &profile).await?;
                    println!("Onboarding reset. Run `kaiteki onboard` to start over.");
                }
                None => println!("Nothing to reset."),
            }
        }
    }

    Ok(())
}

/// Load or create the local user identity.
async fn resolve_user(data_dir: &std::path::Path) -> Result<UserId> {
    let path = data_dir.join("user");
    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => Ok(contents.trim().parse()?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let user = UserId::new();
            tokio::fs::create_dir_all(data_dir).await?;
            tokio::fs::write(&path, user.to_string()).await?;
            Ok(user)
        }
        Err(e) => Err(e.into()),
    }
}

async fn load_onboarded(
    store: &Arc<Mutex<JsonStore>>,
    user: UserId,
) -> Result<Option<UserProfile>> {
    let profile = store.lock().await.load_profile(user).await?;
    Ok(profile.filter(|p| p.onboarded))
}

async fn require_onboarded(store: &Arc<Mutex<JsonStore>>, user: UserId) -> Result<()> {
    if load_onboarded(store, user).await?.is_none() {
        anyhow::bail!("not onboarded yet - run `kaiteki onboard` first");
    }
    Ok(())
}

fn make_coach() -> Box<dyn Coach> {
    match std::env::var("KAITEKI_COACH_URL") {
        Ok(url) if !url.trim().is_empty() => Box::new(HttpCoach::new(url.trim())),
        _ => Box::new(CannedCoach::new()),
    }
}
