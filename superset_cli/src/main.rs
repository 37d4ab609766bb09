use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process::ExitCode;
use superset_core::*;

#[derive(Parser)]
#[command(name = "superset")]
#[command(about = "Timed superset workout composer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Exercise catalog JSON file (overrides config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a workout close to the target duration
    Compose {
        /// Target duration in minutes
        #[arg(long, short)]
        minutes: Option<u32>,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Pick a replacement for one exercise of a workout
    Swap {
        /// Exercise ids of the current workout, in order
        #[arg(long, value_delimiter = ',', required = true)]
        workout: Vec<u32>,

        /// Id of the exercise to replace
        #[arg(long)]
        swap_out: u32,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the exercises in the active catalog
    Catalog {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Allowed muscle group (repeatable)
    #[arg(long = "muscle-group", short = 'g')]
    muscle_groups: Vec<MuscleGroup>,

    /// Available equipment (repeatable)
    #[arg(long, short)]
    equipment: Vec<String>,

    /// Intensity level from 1 (easy) to 5 (hard)
    #[arg(long, short, value_parser = clap::value_parser!(u8).range(1..=5))]
    intensity: Option<u8>,
}

#[derive(Args)]
struct OutputArgs {
    /// Seed for a reproducible result
    #[arg(long)]
    seed: Option<u64>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    // Initialize logging
    superset_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let catalog_path = cli.catalog.clone().or_else(|| config.catalog.path.clone());

    match cli.command {
        Commands::Compose {
            minutes,
            filters,
            output,
        } => cmd_compose(catalog_path, minutes, filters, output, &config),
        Commands::Swap {
            workout,
            swap_out,
            filters,
            output,
        } => cmd_swap(catalog_path, workout, swap_out, filters, output, &config),
        Commands::Catalog { json } => cmd_catalog(catalog_path, json),
    }
}

/// Fetch a fresh catalog snapshot from the configured source
fn load_catalog(path: Option<PathBuf>) -> Result<Catalog> {
    let exercises = match path {
        Some(path) => JsonCatalogFile::new(path).load_exercises()?,
        None => get_default_catalog().load_exercises()?,
    };
    Ok(Catalog { exercises })
}

/// Command-line filters win over configured defaults, field by field
fn resolve_filters(args: FilterArgs, config: &Config) -> ExerciseFilters {
    let mut filters = config.defaults.filters();
    if !args.muscle_groups.is_empty() {
        filters.muscle_groups = args.muscle_groups.into_iter().collect();
    }
    if !args.equipment.is_empty() {
        filters.equipment = args.equipment.into_iter().collect();
    }
    if let Some(level) = args.intensity {
        filters.intensity_level = level;
    }
    filters
}

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn cmd_compose(
    catalog_path: Option<PathBuf>,
    minutes: Option<u32>,
    filters: FilterArgs,
    output: OutputArgs,
    config: &Config,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    catalog.ensure_valid()?;
    let minutes = minutes.unwrap_or(config.defaults.duration_minutes);
    let request = ComposeRequest::new(minutes).with_filters(resolve_filters(filters, config));

    let mut rng = make_rng(output.seed);
    let workout = compose(&catalog.exercises, &request, &mut rng)?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&workout)?);
    } else {
        display_workout(&workout, minutes);
    }
    Ok(())
}

fn cmd_swap(
    catalog_path: Option<PathBuf>,
    workout: Vec<u32>,
    swap_out: u32,
    filters: FilterArgs,
    output: OutputArgs,
    config: &Config,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    catalog.ensure_valid()?;
    let request =
        SwapRequest::new(workout, swap_out).with_filters(resolve_filters(filters, config));

    let mut rng = make_rng(output.seed);
    let replacement = swap(&catalog.exercises, &request, &mut rng)?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&replacement)?);
    } else {
        let outgoing = catalog
            .find(swap_out)
            .map(|e| e.name.as_str())
            .unwrap_or("unknown exercise");
        println!("\n  {} → {}", outgoing, replacement.name);
        display_exercise(0, &replacement);
        println!();
    }
    Ok(())
}

fn cmd_catalog(catalog_path: Option<PathBuf>, json: bool) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for exercise in &catalog.exercises {
        println!(
            "{:>4}  {:<40} {:>3}s  {:<6}  {}",
            exercise.id,
            exercise.name,
            exercise.estimated_duration,
            exercise.intensity,
            join(&exercise.movement_types)
        );
    }

    let errors = catalog.validate();
    if errors.is_empty() {
        println!("\n✓ {} exercises, catalog valid", catalog.len());
        Ok(())
    } else {
        eprintln!("Catalog validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        Err(Error::CatalogValidation(format!(
            "{} problem(s) found",
            errors.len()
        )))
    }
}

fn display_workout(workout: &Workout, target_minutes: u32) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  SUPERSET WORKOUT");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} exercises × {} round(s)",
        workout.exercises.len(),
        workout.rounds
    );
    println!(
        "  Duration: ~{} min (target {} min, incl. 5 min warm-up)",
        workout.estimated_duration_minutes, target_minutes
    );
    println!();

    for (i, exercise) in workout.exercises.iter().enumerate() {
        display_exercise(i + 1, exercise);
    }
    println!();
}

fn display_exercise(position: usize, exercise: &Exercise) {
    let marker = if is_plane_exercise(exercise) { " ↻" } else { "" };
    if position > 0 {
        println!(
            "  {}. {} [#{}]{}",
            position, exercise.name, exercise.id, marker
        );
    } else {
        println!("  {} [#{}]{}", exercise.name, exercise.id, marker);
    }
    println!(
        "     → {}s · {} · {}",
        exercise.estimated_duration,
        exercise.intensity,
        join(&exercise.movement_types)
    );
    println!("     → Muscles: {}", join(&exercise.muscle_groups));
    if !exercise.equipment.is_empty() {
        println!("     → Equipment: {}", join(&exercise.equipment));
    }
}

fn join<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
