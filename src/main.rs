use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use uuid::Uuid;

use liftrs::catalog::{self, CatalogError, ProgramDefinition};
use liftrs::config::AppConfig;
use liftrs::display;
use liftrs::error::LiftrsError;
use liftrs::export::{self, ExportFormat, GeneratedProgram};
use liftrs::logging::{init_logging, LogLevel};
use liftrs::models::{CustomProgram, ProgramLength, ProgressionRule, RepMaxes};
use liftrs::progression::ProgressionCalculator;
use liftrs::recovery::{self, FatigueSnapshot};
use liftrs::repmax::MaxCalculator;
use liftrs::storage::Store;

/// liftrs - Strength Program Generation CLI
///
/// Generates periodized barbell programs from one-rep maxes and tracks
/// week-by-week progression through custom templates.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(version = "0.1.0")]
#[command(about = "Strength program generation and progression", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every program in the catalog
    List,

    /// Show one catalog program's details
    Show {
        /// Program key, e.g. "531"
        key: String,
    },

    /// Generate a week of training from your maxes
    Generate {
        /// Program key, e.g. "texas"
        key: String,

        /// Training week (defaults to your assignment, then week 1)
        #[arg(short, long)]
        week: Option<u32>,

        /// Squat 1RM, overriding the configured max
        #[arg(long)]
        squat: Option<Decimal>,

        /// Bench press 1RM, overriding the configured max
        #[arg(long)]
        bench: Option<Decimal>,

        /// Deadlift 1RM, overriding the configured max
        #[arg(long)]
        deadlift: Option<Decimal>,

        /// Overhead press 1RM, overriding the configured max
        #[arg(long)]
        ohp: Option<Decimal>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Estimate a one-rep max from a submaximal set
    Estimate {
        /// Weight lifted
        #[arg(short, long)]
        weight: Decimal,

        /// Reps performed
        #[arg(short, long)]
        reps: u32,
    },

    /// Assign yourself a catalog program starting at week 1
    Assign {
        /// Program key
        key: String,
    },

    /// Advance your assigned program by one week
    Advance,

    /// Manage custom programs built from your own templates
    Custom {
        #[command(subcommand)]
        command: CustomCommands,
    },

    /// Track bodyweight
    Bodyweight {
        #[command(subcommand)]
        command: BodyweightCommands,
    },

    /// Show training status and readiness
    Status,

    /// Export generated programs to files
    Export {
        /// Program key; exports the whole catalog when omitted
        key: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = "export")]
        output: PathBuf,

        /// Export format (json, csv)
        #[arg(short = 'f', long, default_value = "json")]
        format: String,

        /// Training week for a single-program export
        #[arg(short, long)]
        week: Option<u32>,
    },

    /// Configure application settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum CustomCommands {
    /// Create a custom program from a template file
    Create {
        /// Program name
        #[arg(short, long)]
        name: String,

        /// Template JSON file (array of exercises)
        #[arg(short, long)]
        file: PathBuf,

        /// Program length in weeks (4, 8 or 12)
        #[arg(short, long, default_value = "4")]
        weeks: u32,

        /// Progression rules JSON file
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Generate the current week's workout and advance the program
    StartWeek {
        /// Program id
        id: Uuid,
    },

    /// Rewind a program to week 1
    Reset {
        /// Program id
        id: Uuid,
    },

    /// Show a program's state and its upcoming week
    Show {
        /// Program id
        id: Uuid,
    },

    /// List your custom programs
    List,
}

#[derive(Subcommand)]
enum BodyweightCommands {
    /// Log a bodyweight entry
    Log {
        /// Bodyweight
        weight: Decimal,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show bodyweight history with a trend column
    Show {
        /// Number of entries
        #[arg(short, long, default_value = "30")]
        limit: u32,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,

    /// Get a configuration value
    Get {
        /// Dotted key, e.g. "athlete.maxes.squat"
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Dotted key, e.g. "athlete.maxes.squat"
        key: String,

        /// New value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    // Verbosity flags override the configured log level
    if cli.verbose > 0 {
        config.log.level = match cli.verbose {
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        eprintln!(
            "{}",
            format!("Log level: {}", config.log.level.to_filter()).dimmed()
        );
    }
    init_logging(&config.log)?;

    let config_path = cli.config.clone();
    if let Err(err) = run(cli.command, config_path, config) {
        tracing::error!(error = %err, "command failed");
        let message = match err.downcast_ref::<LiftrsError>() {
            Some(e) => e.user_message(),
            None => format!("{:#}", err),
        };
        eprintln!("{} {}", "✗".red().bold(), message.red());
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Commands, config_path: Option<PathBuf>, mut config: AppConfig) -> Result<()> {
    match command {
        Commands::List => {
            println!("{}", display::render_program_list(catalog::PROGRAMS));
        }

        Commands::Show { key } => {
            let program = find_program(&key)?;
            println!("{}", program.name.cyan().bold());
            println!("  Key:           {}", program.key);
            println!("  Level:         {}", program.level);
            println!("  Days per week: {}", program.days_per_week);
            match program.total_weeks {
                Some(weeks) => println!("  Length:        {} weeks", weeks),
                None => println!("  Length:        {}-week repeating cycle", program.cycle_weeks),
            }
            if program.weekly {
                println!("  Loading varies by week");
            } else {
                println!("  Same loading every week");
            }
            if program.uses_training_max {
                println!("  Percentages are taken off a 90% training max");
            }
        }

        Commands::Generate {
            key,
            week,
            squat,
            bench,
            deadlift,
            ohp,
            json,
        } => {
            let program = find_program(&key)?;
            let maxes = resolve_maxes(&config, squat, bench, deadlift, ohp)?;

            let requested = match week {
                Some(w) => w,
                None => {
                    let store = open_store(&config)?;
                    store
                        .load_assignment(&config.athlete.id)
                        .map_err(LiftrsError::from)?
                        .filter(|a| a.program_key.eq_ignore_ascii_case(&key))
                        .map(|a| a.current_week)
                        .unwrap_or(1)
                }
            };
            let week = if program.weekly {
                catalog::cycle_week(requested, program.cycle_weeks)
            } else {
                1
            };

            let generated = GeneratedProgram::new(program, &maxes, week);
            if json {
                println!("{}", serde_json::to_string_pretty(&generated)?);
            } else {
                if program.weekly {
                    println!(
                        "{}",
                        format!("{} - week {}", program.name, week).green().bold()
                    );
                } else {
                    println!("{}", program.name.green().bold());
                }
                println!();
                print!(
                    "{}",
                    display::render_workout_days(&generated.days, config.athlete.units)
                );
            }
        }

        Commands::Estimate { weight, reps } => {
            if weight <= Decimal::ZERO || reps == 0 {
                return Err(anyhow!("weight and reps must both be positive"));
            }
            let units = config.athlete.units;
            let estimate = MaxCalculator::estimate_one_rep_max(weight, reps);
            println!(
                "{}",
                format!("Estimated 1RM: {} {}", estimate.normalize(), units)
                    .green()
                    .bold()
            );
            println!(
                "  Training max (90%): {} {}",
                MaxCalculator::training_max(estimate).normalize(),
                units
            );
        }

        Commands::Assign { key } => {
            let program = find_program(&key)?;
            let mut store = open_store(&config)?;
            let assignment = store
                .assign_program(&config.athlete.id, program.key)
                .map_err(LiftrsError::from)?;
            println!(
                "{}",
                format!(
                    "✓ Assigned {} (week {})",
                    program.name, assignment.current_week
                )
                .green()
            );
        }

        Commands::Advance => {
            let mut store = open_store(&config)?;
            let current = store
                .load_assignment(&config.athlete.id)
                .map_err(LiftrsError::from)?
                .ok_or_else(|| anyhow!("no assigned program; run `liftrs assign <key>` first"))?;
            let cycle_weeks = catalog::find(&current.program_key)
                .map(|p| p.cycle_weeks)
                .unwrap_or(0);
            let advanced = store
                .advance_assignment(&config.athlete.id, cycle_weeks)
                .map_err(LiftrsError::from)?;
            println!(
                "{}",
                format!(
                    "✓ {} advanced to week {}",
                    advanced.program_key, advanced.current_week
                )
                .green()
            );
        }

        Commands::Custom { command } => run_custom(command, &config)?,

        Commands::Bodyweight { command } => run_bodyweight(command, &config)?,

        Commands::Status => {
            let store = open_store(&config)?;
            let workouts = store
                .recent_workouts(&config.athlete.id, 60)
                .map_err(LiftrsError::from)?;
            let loads = recovery::daily_loads(&workouts);
            let snapshot = FatigueSnapshot::compute(&loads, Local::now().date_naive());

            println!("{}", "Training status".cyan().bold());
            println!("  Readiness: {}", display::render_fatigue(&snapshot));

            if let Some(assignment) = store
                .load_assignment(&config.athlete.id)
                .map_err(LiftrsError::from)?
            {
                let name = catalog::find(&assignment.program_key)
                    .map(|p| p.name)
                    .unwrap_or(assignment.program_key.as_str());
                println!(
                    "  Assigned:  {} (week {})",
                    name, assignment.current_week
                );
            }

            let programs = store
                .list_programs(&config.athlete.id)
                .map_err(LiftrsError::from)?;
            for program in &programs {
                if program.is_complete() {
                    println!("  Custom:    {} ({})", program.name, "complete".yellow());
                } else {
                    println!(
                        "  Custom:    {} (week {} of {})",
                        program.name,
                        program.current_week,
                        program.length.weeks()
                    );
                }
            }
        }

        Commands::Export {
            key,
            output,
            format,
            week,
        } => {
            let format = ExportFormat::from_str(&format)?;
            let maxes = resolve_maxes(&config, None, None, None, None)?;
            match key {
                Some(key) => {
                    let program = find_program(&key)?;
                    let week = if program.weekly {
                        catalog::cycle_week(week.unwrap_or(1), program.cycle_weeks)
                    } else {
                        1
                    };
                    std::fs::create_dir_all(&output)
                        .with_context(|| format!("creating {}", output.display()))?;
                    let path = output.join(export::export_file_name(program, week, format));
                    let generated = GeneratedProgram::new(program, &maxes, week);
                    export::export_program(&generated, format, &path)?;
                    println!("{}", format!("✓ Exported {}", path.display()).yellow());
                }
                None => {
                    let written = export::export_full_catalog(&maxes, &output, format)?;
                    println!(
                        "{}",
                        format!(
                            "✓ Exported {} files to {}",
                            written.len(),
                            output.display()
                        )
                        .yellow()
                    );
                }
            }
        }

        Commands::Config { command } => match command {
            ConfigCommands::List => {
                for (key, value) in config.list_values() {
                    println!("{:<22} {}", key, value);
                }
            }
            ConfigCommands::Get { key } => match config.get_value(&key) {
                Some(value) => println!("{}", value),
                None => return Err(anyhow!("unknown config key '{}'", key)),
            },
            ConfigCommands::Set { key, value } => {
                config.set_value(&key, &value)?;
                let path = config_path.unwrap_or_else(AppConfig::default_config_path);
                config.save_to_file(&path)?;
                println!("{}", format!("✓ {} = {}", key, value).green());
            }
        },
    }

    Ok(())
}

fn run_custom(command: CustomCommands, config: &AppConfig) -> Result<()> {
    let owner = config.athlete.id.as_str();
    match command {
        CustomCommands::Create {
            name,
            file,
            weeks,
            rules,
        } => {
            let raw: serde_json::Value = serde_json::from_str(
                &std::fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?,
            )
            .with_context(|| format!("parsing {}", file.display()))?;
            let exercises = ProgressionCalculator::normalize_template_exercises(&raw);
            if exercises.is_empty() {
                return Err(anyhow!("template has no usable exercises"));
            }

            let length = ProgramLength::try_from(weeks).map_err(|e| anyhow!(e))?;
            let rules: Vec<ProgressionRule> = match rules {
                Some(path) => serde_json::from_str(
                    &std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?,
                )
                .with_context(|| format!("parsing {}", path.display()))?,
                None => Vec::new(),
            };

            let mut store = open_store(config)?;
            let template = store
                .store_template(owner, &name, &exercises)
                .map_err(LiftrsError::from)?;
            let program = CustomProgram::new(owner, template.id, name, length, rules);
            store.store_program(&program).map_err(LiftrsError::from)?;

            println!(
                "{}",
                format!("✓ Created '{}' ({})", program.name, program.id).green()
            );
            println!(
                "  {} weeks, {} exercises",
                length.weeks(),
                exercises.len()
            );
        }

        CustomCommands::StartWeek { id } => {
            let mut store = open_store(config)?;
            let started = store.start_next_week(owner, id)?;
            let template = store
                .load_template(owner, started.template_id)
                .map_err(LiftrsError::from)?;

            println!(
                "{}",
                format!("✓ Week {} started", started.week).green().bold()
            );
            print!(
                "{}",
                display::render_template(&template.exercises, config.athlete.units)
            );
            println!();
        }

        CustomCommands::Reset { id } => {
            let mut store = open_store(config)?;
            let program = store.reset_program(owner, id).map_err(LiftrsError::from)?;
            println!(
                "{}",
                format!("✓ '{}' reset to week {}", program.name, program.current_week).green()
            );
        }

        CustomCommands::Show { id } => {
            let store = open_store(config)?;
            let program = store.load_program(owner, id).map_err(LiftrsError::from)?;
            let template = store
                .load_template(owner, program.template_id)
                .map_err(LiftrsError::from)?;

            println!("{}", program.name.cyan().bold());
            println!(
                "  Week {} of {}",
                program.current_week.min(program.length.weeks()),
                program.length.weeks()
            );
            if program.is_complete() {
                println!("  {}", "Complete. Reset to run it again.".yellow());
            } else {
                let upcoming = ProgressionCalculator::build_progressed_exercises(
                    &template.exercises,
                    &program.rules,
                    program.current_week,
                );
                println!();
                print!(
                    "{}",
                    display::render_template(&upcoming, config.athlete.units)
                );
            }
        }

        CustomCommands::List => {
            let store = open_store(config)?;
            let programs = store.list_programs(owner).map_err(LiftrsError::from)?;
            if programs.is_empty() {
                println!("No custom programs yet. Create one with `liftrs custom create`.");
            } else {
                for program in &programs {
                    println!(
                        "{}  {}  week {} of {}",
                        program.id,
                        program.name,
                        program.current_week.min(program.length.weeks()),
                        program.length.weeks()
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_bodyweight(command: BodyweightCommands, config: &AppConfig) -> Result<()> {
    let owner = config.athlete.id.as_str();
    match command {
        BodyweightCommands::Log { weight, date } => {
            if weight <= Decimal::ZERO {
                return Err(anyhow!("bodyweight must be positive"));
            }
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let mut store = open_store(config)?;
            store
                .log_bodyweight(owner, date, weight)
                .map_err(LiftrsError::from)?;
            println!(
                "{}",
                format!(
                    "✓ Logged {} {} on {}",
                    weight.normalize(),
                    config.athlete.units,
                    date
                )
                .green()
            );
        }

        BodyweightCommands::Show { limit } => {
            let store = open_store(config)?;
            let entries = store
                .bodyweight_history(owner, limit)
                .map_err(LiftrsError::from)?;
            if entries.is_empty() {
                println!("No bodyweight entries yet.");
            } else {
                println!("{}", display::render_bodyweight(&entries));
            }
        }
    }
    Ok(())
}

fn find_program(key: &str) -> Result<&'static ProgramDefinition> {
    catalog::find(key).ok_or_else(|| {
        LiftrsError::from(CatalogError::UnknownProgram {
            key: key.to_string(),
        })
        .into()
    })
}

fn resolve_maxes(
    config: &AppConfig,
    squat: Option<Decimal>,
    bench: Option<Decimal>,
    deadlift: Option<Decimal>,
    ohp: Option<Decimal>,
) -> Result<RepMaxes> {
    let saved = &config.athlete.maxes;
    let pick = |flag: Option<Decimal>, saved: Option<Decimal>, lift: &str| {
        flag.or(saved).ok_or_else(|| {
            anyhow!("no {lift} max on file; pass --{lift} or set athlete.maxes.{lift}")
        })
    };
    Ok(RepMaxes {
        squat: pick(squat, saved.squat, "squat")?,
        bench: pick(bench, saved.bench, "bench")?,
        deadlift: pick(deadlift, saved.deadlift, "deadlift")?,
        ohp: pick(ohp, saved.ohp, "ohp")?,
    })
}

fn open_store(config: &AppConfig) -> Result<Store> {
    std::fs::create_dir_all(&config.settings.data_dir).with_context(|| {
        format!(
            "creating data directory {}",
            config.settings.data_dir.display()
        )
    })?;
    Ok(Store::open(config.database_path()).map_err(LiftrsError::from)?)
}
