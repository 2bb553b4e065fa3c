//! The module responsible for writing output data to disk.
use crate::ranking::{Eligibility, Ranking, SiteFailure};
use crate::site::{ScoredSite, SiteID};
use crate::units::Dimensionless;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub mod metadata;

/// The root folder in which scenario-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "h2siting_results";

/// The output file name for the main ranking
const RANKED_SITES_FILE_NAME: &str = "ranked_sites.csv";

/// The output file name for sites which could not be scored
const SITE_FAILURES_FILE_NAME: &str = "site_failures.csv";

const RANKED_SITES_HEADER: [&str; 10] = [
    "rank",
    "site_id",
    "name",
    "latitude",
    "longitude",
    "renewable_score",
    "demand_score",
    "regulatory_score",
    "score",
    "eligibility",
];

const SITE_FAILURES_HEADER: [&str; 2] = ["site_id", "error"];

/// Get the default output directory for the scenario at the specified path
pub fn get_output_dir(scenario_dir: &Path) -> Result<PathBuf> {
    // Get the scenario name from the dir path. This ends up being convoluted because we need to
    // check for all possible errors.
    let scenario_dir = scenario_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to scenario")?;

    let scenario_name = scenario_dir
        .file_name()
        .context("Scenario cannot be in root folder")?
        .to_str()
        .context("Invalid chars in scenario dir name")?;

    // Construct path
    Ok([OUTPUT_DIRECTORY_ROOT, scenario_name].iter().collect())
}

/// Create a new output directory, replacing an existing one if permitted.
///
/// # Arguments
///
/// * `output_dir` - The folder to create
/// * `allow_overwrite` - Whether to delete the folder first if it exists and is not empty
///
/// # Returns
///
/// Whether an existing folder was overwritten, or an error.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwrite = if let Ok(mut entries) = fs::read_dir(output_dir) {
        if entries.next().is_none() {
            // already exists and is empty
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder {} already exists and is not empty. Please delete the folder or pass \
            the --overwrite command-line option.",
            output_dir.display()
        );

        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Represents a row in a ranked sites CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct RankedSiteRow {
    rank: usize,
    site_id: SiteID,
    name: String,
    latitude: f64,
    longitude: f64,
    renewable_score: f64,
    demand_score: f64,
    regulatory_score: f64,
    score: f64,
    eligibility: String,
}

impl RankedSiteRow {
    /// Create a new [`RankedSiteRow`]. Ranks start at 1.
    fn new(rank: usize, site: &ScoredSite, eligibility: Eligibility) -> Self {
        Self {
            rank,
            site_id: site.id.clone(),
            name: site.name.clone(),
            latitude: site.location.latitude,
            longitude: site.location.longitude,
            renewable_score: site.breakdown.renewable.into(),
            demand_score: site.breakdown.demand.into(),
            regulatory_score: site.breakdown.regulatory.into(),
            score: site.score().into(),
            eligibility: eligibility.to_string(),
        }
    }
}

/// Represents a row in the site failures CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SiteFailureRow {
    site_id: SiteID,
    error: String,
}

impl From<&SiteFailure> for SiteFailureRow {
    fn from(failure: &SiteFailure) -> Self {
        Self {
            site_id: failure.site_id.clone(),
            error: failure.error.to_string(),
        }
    }
}

/// Get the file name for a ranking, which depends on the weight set used (if any)
pub fn ranked_sites_file_name(weight_set: Option<&str>) -> String {
    match weight_set {
        None => RANKED_SITES_FILE_NAME.to_string(),
        Some(name) => format!("ranked_sites_{name}.csv"),
    }
}

/// Open a CSV file for writing, writing the header immediately so it is present even if there
/// are no rows
fn new_writer(file_path: &Path, header: &[&str]) -> Result<csv::Writer<File>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(file_path)
        .with_context(|| format!("Could not create {}", file_path.display()))?;
    writer.write_record(header)?;

    Ok(writer)
}

/// An object for writing rankings and failures to file
pub struct DataWriter {
    output_path: PathBuf,
    eligibility_threshold: Dimensionless,
}

impl DataWriter {
    /// Create a new [`DataWriter`]
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    /// * `eligibility_threshold` - The minimum score for a site to be eligible
    pub fn new(output_path: &Path, eligibility_threshold: Dimensionless) -> Self {
        Self {
            output_path: output_path.to_path_buf(),
            eligibility_threshold,
        }
    }

    /// Write ranked sites to a CSV file.
    ///
    /// # Arguments
    ///
    /// * `weight_set` - The name of the weight set used, or `None` for the main ranking
    /// * `ranking` - The ranking to write
    ///
    /// # Returns
    ///
    /// The path to the file written.
    pub fn write_ranking(&self, weight_set: Option<&str>, ranking: &Ranking) -> Result<PathBuf> {
        let file_path = self.output_path.join(ranked_sites_file_name(weight_set));
        let mut writer = new_writer(&file_path, &RANKED_SITES_HEADER)?;
        for (index, (site, eligibility)) in ranking
            .classify(self.eligibility_threshold)
            .enumerate()
        {
            writer.serialize(RankedSiteRow::new(index + 1, site, eligibility))?;
        }
        writer.flush()?;

        Ok(file_path)
    }

    /// Write sites which could not be scored to a CSV file
    pub fn write_failures(&self, failures: &[SiteFailure]) -> Result<PathBuf> {
        let file_path = self.output_path.join(SITE_FAILURES_FILE_NAME);
        let mut writer = new_writer(&file_path, &SITE_FAILURES_HEADER)?;
        for failure in failures {
            writer.serialize(SiteFailureRow::from(failure))?;
        }
        writer.flush()?;

        Ok(file_path)
    }
}
