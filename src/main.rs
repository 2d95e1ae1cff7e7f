//! lifesim - Lifestyle Risk Simulator
//!
//! Command-line front end for scoring habit profiles and running
//! what-if comparisons.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use lifesim::{
    parse_override, Condition, ConfigLocations, ConfigValidator, HabitCatalog, HabitProfile,
    LifesimConfig, LifesimError, LoadedConfig, RiskLevel, RiskScorer, SimulationSession,
};

#[derive(Parser)]
#[command(name = "lifesim")]
#[command(version = "0.1.0")]
#[command(about = "Lifestyle risk simulator with what-if habit comparisons", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory searched for lifesim.toml (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Explicit config file (overrides project and user config)
    #[arg(short, long, global = true, env = "LIFESIM_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List habits, their options and impact weights
    Habits {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a habit profile for one or all conditions
    Score {
        /// Condition to score: heart, diabetes, stroke, or thyroid (default: all)
        #[arg(long)]
        condition: Option<String>,

        /// Habit override as <habit>=<level>; repeatable
        #[arg(short, long = "set", value_name = "HABIT=LEVEL")]
        overrides: Vec<String>,

        /// Snap out-of-option levels to the nearest option instead of failing
        #[arg(long)]
        clamp: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank habits by the risk reduction from optimizing each one
    Rank {
        /// Habit override applied to the baseline as <habit>=<level>; repeatable
        #[arg(short, long = "set", value_name = "HABIT=LEVEL")]
        overrides: Vec<String>,

        /// Snap out-of-option levels to the nearest option instead of failing
        #[arg(long)]
        clamp: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare simulated habit changes against the baseline
    Simulate {
        /// Simulated habit change as <habit>=<level>; repeatable
        #[arg(short, long = "set", value_name = "HABIT=LEVEL")]
        overrides: Vec<String>,

        /// Snap out-of-option levels to the nearest option instead of failing
        #[arg(long)]
        clamp: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or validate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show configuration file paths
    Paths,
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "lifesim=debug,info"
    } else {
        "lifesim=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        let code = e
            .downcast_ref::<LifesimError>()
            .map_or(1, LifesimError::exit_code);
        std::process::exit(code);
    }
}

fn locations(cli: &Cli) -> ConfigLocations {
    let mut locations = ConfigLocations::new(&cli.project);
    if let Some(path) = &cli.config {
        locations = locations.with_explicit_path(path);
    }
    locations
}

fn load_config(locations: &ConfigLocations) -> anyhow::Result<(LifesimConfig, HabitCatalog)> {
    let loaded = LifesimConfig::load(locations).context("failed to load configuration")?;
    loaded
        .config
        .validate()
        .with_context(|| format!("invalid configuration from {}", loaded.origin()))?;
    let catalog = loaded.config.catalog()?;
    Ok((loaded.config, catalog))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let locations = locations(&cli);

    match cli.command {
        Commands::Config { action } => run_config(&action, &locations)?,

        Commands::Habits { json } => {
            let (_, catalog) = load_config(&locations)?;
            if json {
                println!("{}", serde_json::to_string_pretty(catalog.habits())?);
            } else {
                print_habits(&catalog);
            }
        }

        Commands::Score {
            condition,
            overrides,
            clamp,
            json,
        } => {
            let (config, catalog) = load_config(&locations)?;
            let scorer = RiskScorer::new(&catalog).with_thresholds(config.thresholds);
            let profile = build_profile(&catalog, &overrides, clamp)?;
            let conditions = match condition {
                Some(name) => vec![name.parse::<Condition>()?],
                None => Condition::ALL.to_vec(),
            };

            let scores: Vec<_> = conditions
                .iter()
                .map(|&c| {
                    let score = scorer.score(&profile, c);
                    (c, score, scorer.classify(score))
                })
                .collect();

            if json {
                let value: Vec<_> = scores
                    .iter()
                    .map(|(c, score, level)| {
                        serde_json::json!({
                            "condition": c,
                            "score": score,
                            "level": level,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("\n{}", "Risk Scores".bold());
                for (c, score, level) in &scores {
                    println!(
                        "   {:<14} {:>3}%  {}",
                        c.display_name(),
                        score,
                        colored_level(*level)
                    );
                }
                if conditions.len() == Condition::ALL.len() {
                    let aggregate = scorer.aggregate(&profile);
                    println!(
                        "   {:<14} {:>3}%  {}",
                        "Overall".bold(),
                        aggregate,
                        colored_level(scorer.classify(aggregate))
                    );
                }
            }
        }

        Commands::Rank {
            overrides,
            clamp,
            json,
        } => {
            let (config, catalog) = load_config(&locations)?;
            let scorer = RiskScorer::new(&catalog).with_thresholds(config.thresholds);
            let baseline = build_profile(&catalog, &overrides, clamp)?;
            let ranking = scorer.rank_habit_impact(&baseline);

            if json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                println!("\n{}", "Habit Priorities".bold());
                for (rank, entry) in ranking.iter().enumerate() {
                    let impact = format!("{:+}%", entry.impact);
                    let impact = if entry.is_improvement() {
                        impact.green()
                    } else if entry.impact > 0 {
                        impact.red()
                    } else {
                        impact.dimmed()
                    };
                    println!("   {}. {:<20} {}", rank + 1, entry.name, impact);
                }
            }
        }

        Commands::Simulate {
            overrides,
            clamp,
            json,
        } => {
            let (config, catalog) = load_config(&locations)?;
            let scorer = RiskScorer::new(&catalog).with_thresholds(config.thresholds);
            let mut session = SimulationSession::with_scorer(scorer);
            for raw in &overrides {
                let (habit, level) = parse_override(raw)?;
                if clamp {
                    session.simulate_clamped(&habit, level)?;
                } else {
                    session.simulate(&habit, level)?;
                }
            }
            let report = session.report();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn run_config(action: &ConfigAction, locations: &ConfigLocations) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show { json } => {
            let loaded: LoadedConfig =
                LifesimConfig::load(locations).context("failed to load configuration")?;
            let catalog = loaded
                .config
                .catalog()
                .with_context(|| format!("invalid habit table in {}", loaded.origin()))?;
            if *json {
                let value = serde_json::json!({
                    "source": loaded.source.as_ref().map(|s| s.path.display().to_string()),
                    "scale": loaded.config.scale,
                    "thresholds": loaded.config.thresholds,
                    "habits": catalog.habits(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                let (low, high) = catalog.scale().bounds();
                println!("{}", "Configuration".bold());
                println!("   Source:     {}", loaded.origin());
                println!(
                    "   Scale:      x{} + {} (scores {}-{}%)",
                    loaded.config.scale.factor, loaded.config.scale.offset, low, high
                );
                println!(
                    "   Thresholds: low < {}, moderate < {}",
                    loaded.config.thresholds.low_max, loaded.config.thresholds.moderate_max
                );
                println!("   Habits:     {}", catalog.len());
            }
        }

        ConfigAction::Validate => {
            let report = ConfigValidator::new(locations.clone()).validate();
            println!("{}", report.verbose_report());
            if !report.is_valid() {
                std::process::exit(report.exit_code());
            }
        }

        ConfigAction::Paths => {
            println!("{}", "Configuration paths (highest priority first)".bold());
            for candidate in locations.candidates() {
                let status = if candidate.exists() {
                    "found".green()
                } else {
                    "missing".dimmed()
                };
                println!(
                    "   [{:<8}] {} ({})",
                    candidate.level.to_string(),
                    candidate.path.display(),
                    status
                );
            }
        }
    }
    Ok(())
}

fn build_profile(
    catalog: &HabitCatalog,
    overrides: &[String],
    clamp: bool,
) -> lifesim::Result<HabitProfile> {
    let mut profile = HabitProfile::baseline(catalog);
    for raw in overrides {
        let (habit, level) = parse_override(raw)?;
        if clamp {
            let applied = profile.set_level_clamped(catalog, &habit, level)?;
            if applied != level {
                eprintln!(
                    "{} {} level {} snapped to {}",
                    "Note:".yellow(),
                    habit,
                    level,
                    applied
                );
            }
        } else {
            profile.set_level(catalog, &habit, level)?;
        }
    }
    Ok(profile)
}

fn colored_level(level: RiskLevel) -> colored::ColoredString {
    let text = level.to_string();
    match level {
        RiskLevel::Low => text.green(),
        RiskLevel::Moderate => text.yellow(),
        RiskLevel::High => text.red(),
    }
}

fn print_habits(catalog: &HabitCatalog) {
    println!("\n{}", "Habits".bold());
    for habit in catalog.habits() {
        println!(
            "\n   {} ({}) - {}",
            habit.name.bold(),
            habit.id,
            habit.polarity.to_string().dimmed()
        );
        println!(
            "     current {}  optimal {}",
            habit.current_level, habit.optimal_level
        );
        let options: Vec<_> = habit
            .options
            .iter()
            .map(|o| format!("{}={}", o.label, o.value))
            .collect();
        println!("     options: {}", options.join(", "));
        let weights: Vec<_> = Condition::ALL
            .iter()
            .map(|&c| format!("{} {:.2}", c, habit.weights.get(c)))
            .collect();
        println!("     weights: {}", weights.join(", "));
    }
}

fn print_report(report: &lifesim::SimulationReport) {
    let comparison = &report.comparison;
    let change = format!("{:+}%", comparison.risk_change);
    let change = if comparison.is_improvement() {
        change.green()
    } else {
        change.red()
    };

    println!("\n{}", "Lifestyle Simulation".bold());
    println!(
        "   Current risk:   {:>3}%  {}",
        comparison.total_baseline,
        colored_level(report.total_baseline_level)
    );
    println!(
        "   Simulated risk: {:>3}%  {}",
        comparison.total_simulated,
        colored_level(report.total_simulated_level)
    );
    println!("   Risk change:    {}  {}", change, report.verdict());

    println!("\n{}", "By Condition".bold());
    for row in &comparison.conditions {
        let delta = format!("{:+}%", row.change);
        let delta = if row.change <= 0 {
            delta.green()
        } else {
            delta.red()
        };
        println!(
            "   {:<14} {:>3}% -> {:>3}%  {}",
            row.condition.display_name(),
            row.baseline,
            row.simulated,
            delta
        );
    }

    let changed: Vec<_> = report.habits.iter().filter(|h| h.is_changed()).collect();
    if !changed.is_empty() {
        println!("\n{}", "Changed Habits".bold());
        for habit in changed {
            println!(
                "   {:<20} {} -> {}",
                habit.name,
                habit.baseline_label.as_deref().unwrap_or("custom"),
                habit
                    .simulated_label
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| habit.simulated.to_string())
            );
        }
    }

    if let Some(top) = report.top_priority() {
        println!(
            "\n{} Optimizing {} could reduce your overall risk by {}%",
            "Tip:".cyan().bold(),
            top.name,
            top.impact.abs()
        );
    }
}
