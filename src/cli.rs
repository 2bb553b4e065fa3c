//! The command line interface for ranking candidate sites.
use crate::log;
use crate::output::metadata::write_metadata;
use crate::output::{DataWriter, create_output_directory, get_output_dir};
use crate::scenario::Scenario;
use crate::settings::Settings;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for ranking candidate hydrogen sites.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the rank command
#[derive(Args, Default)]
pub struct RankOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Score and rank the candidate sites in a scenario.
    Rank {
        /// Path to the scenario directory.
        scenario_dir: PathBuf,
        /// Other rank options
        #[command(flatten)]
        opts: RankOpts,
    },
    /// Manage example scenarios.
    Example {
        /// The available subcommands for managing example scenarios.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Validate a scenario.
    Validate {
        /// The path to the scenario directory.
        scenario_dir: PathBuf,
    },
    /// Manage program settings.
    Settings {
        /// The subcommands for managing settings.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Rank { scenario_dir, opts } => handle_rank_command(&scenario_dir, &opts, None),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Validate { scenario_dir } => handle_validate_command(&scenario_dir, None),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start the program
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Used to generate the command line reference
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided
fn load_settings(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Handle the `rank` command.
pub fn handle_rank_command(
    scenario_path: &Path,
    opts: &RankOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = load_settings(settings)?;

    let output_path = match &opts.output_dir {
        Some(path) => path.clone(),
        None => get_output_dir(scenario_path)?,
    };
    let output_path = output_path.as_path();

    // Either the command line or settings.toml can permit overwriting
    let allow_overwrite = opts.overwrite || settings.overwrite;
    let overwrite = create_output_directory(output_path, allow_overwrite).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })?;

    // Log files are written alongside the results
    log::init(Some(&settings.log_level), Some(output_path))
        .context("Failed to initialise logging.")?;

    let scenario = Scenario::from_path(scenario_path).context("Failed to load scenario.")?;
    info!("Loaded scenario from {}", scenario_path.display());
    info!("Output folder: {}", output_path.display());

    // Only reported now that the logger exists
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let threshold = scenario.parameters.eligibility_threshold;
    let writer = DataWriter::new(output_path, threshold);
    write_metadata(output_path, scenario_path, &scenario).context("Failed to save metadata.")?;

    let ranking = scenario.rank()?;
    writer.write_ranking(None, &ranking)?;
    writer.write_failures(&ranking.failures)?;
    info!(
        "{} of {} ranked sites meet the eligibility threshold of {threshold}",
        ranking.eligible_count(threshold),
        ranking.sites.len()
    );
    if let Some(best) = ranking.best() {
        info!("Best site: {} ({}) with score {}", best.id, best.name, best.score());
    }

    for (name, ranking) in scenario.compare()? {
        let file_path = writer.write_ranking(Some(name), &ranking)?;
        info!(
            "Ranked sites with weight set {name}: {} eligible. Saved to {}",
            ranking.eligible_count(threshold),
            file_path.display()
        );
    }

    info!("Ranking complete!");

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(scenario_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = load_settings(settings)?;

    // Validation only logs to the console
    log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")?;

    let scenario = Scenario::from_path(scenario_path).context("Failed to validate scenario.")?;
    scenario.validate().context("Failed to validate scenario.")?;
    info!("Scenario validation successful!");

    Ok(())
}
