//! Bundled example scenarios and the `example` command for working with them.
//!
//! The scenarios under `demos/` are compiled into the binary, so they can be listed, extracted
//! and ranked without a copy of the source tree.
use super::{RankOpts, handle_rank_command};
use crate::settings::Settings;
use anyhow::{Context, Result, bail, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

static EXAMPLES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/demos");

/// Every example describes itself in a file with this name
const README_FILE_NAME: &str = "README.txt";

/// The available subcommands for managing example scenarios.
#[derive(Subcommand)]
pub enum ExampleSubcommands {
    /// List available examples.
    List,
    /// Describe an example.
    Info {
        /// The name of the example.
        name: String,
    },
    /// Copy an example's input files to a new directory.
    Extract {
        /// The name of the example to extract.
        name: String,
        /// The destination folder (defaults to the example's name).
        new_path: Option<PathBuf>,
    },
    /// Rank the sites in an example.
    Run {
        /// The name of the example to run.
        name: String,
        /// Other rank options
        #[command(flatten)]
        opts: RankOpts,
    },
}

impl ExampleSubcommands {
    /// Execute the supplied example subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => iter_example_names().for_each(|name| println!("{name}")),
            Self::Info { name } => println!("{}", example_readme(&name)?),
            Self::Extract { name, new_path } => {
                let dest = new_path.unwrap_or_else(|| PathBuf::from(&name));
                extract_example(&name, &dest)?;
            }
            Self::Run { name, opts } => handle_example_run_command(&name, &opts, None)?,
        }

        Ok(())
    }
}

/// Iterate over the names of the bundled examples
pub fn iter_example_names() -> impl Iterator<Item = &'static str> {
    EXAMPLES_DIR
        .dirs()
        .filter_map(|dir| dir.path().file_name()?.to_str())
}

fn get_example(name: &str) -> Result<&'static Dir<'static>> {
    EXAMPLES_DIR.get_dir(name).context("Example not found.")
}

/// The text of an example's README file
fn example_readme(name: &str) -> Result<&'static str> {
    let readme_path = get_example(name)?.path().join(README_FILE_NAME);
    EXAMPLES_DIR
        .get_file(readme_path)
        .with_context(|| format!("Example {name} has no {README_FILE_NAME}"))?
        .contents_utf8()
        .with_context(|| format!("{README_FILE_NAME} for {name} is not UTF-8 encoded"))
}

/// Write the input files for example `name` into a new directory at `new_path`
pub fn extract_example(name: &str, new_path: &Path) -> Result<()> {
    let example = get_example(name)?;
    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    fs::create_dir(new_path)
        .with_context(|| format!("Could not create directory {}", new_path.display()))?;
    for entry in example.entries() {
        let DirEntry::File(file) = entry else {
            bail!("Subdirectories in examples not supported");
        };
        let file_name = file
            .path()
            .file_name()
            .context("Example file has no name")?;
        let dest = new_path.join(file_name);
        fs::write(&dest, file.contents())
            .with_context(|| format!("Could not write {}", dest.display()))?;
    }

    Ok(())
}

/// Rank an example from a temporary copy of its input files
pub fn handle_example_run_command(
    name: &str,
    opts: &RankOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let scenario_path = temp_dir.path().join(name);
    extract_example(name, &scenario_path)?;
    handle_rank_command(&scenario_path, opts, settings)
}
