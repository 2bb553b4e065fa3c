//! Records how and where a ranking was produced, saved as `metadata.toml` next to the results.
use crate::scenario::Scenario;
use anyhow::{Context, Result, anyhow};
use chrono::Local;
use platform_info::{PlatformInfo, PlatformInfoAPI, UNameAPI};
use serde::Serialize;
use std::fs;
use std::path::Path;

const METADATA_FILE_NAME: &str = "metadata.toml";

/// Build details generated by the `built` build script
mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Serialize)]
struct RunMetadata<'a> {
    run: RunInfo<'a>,
    scenario: ScenarioSummary<'a>,
    build: BuildInfo,
    platform: PlatformSummary,
}

/// When the ranking was run and on what input
#[derive(Serialize)]
struct RunInfo<'a> {
    scenario_path: &'a Path,
    started: String,
}

/// The size and configuration of the ranked scenario
#[derive(Serialize)]
struct ScenarioSummary<'a> {
    candidate_sites: usize,
    renewable_sources: usize,
    demand_centres: usize,
    regulatory_zones: usize,
    eligibility_threshold: f64,
    /// Names of the extra weight sets, in the order they were ranked
    weight_sets: Vec<&'a str>,
}

impl<'a> ScenarioSummary<'a> {
    fn from_scenario(scenario: &'a Scenario) -> Self {
        let reference = &scenario.reference;
        Self {
            candidate_sites: scenario.candidates.len(),
            renewable_sources: reference.renewables.len(),
            demand_centres: reference.demand_centres.len(),
            regulatory_zones: reference.zones.len(),
            eligibility_threshold: scenario.parameters.eligibility_threshold.into(),
            weight_sets: scenario
                .parameters
                .weight_sets
                .keys()
                .map(String::as_str)
                .collect(),
        }
    }
}

/// The program build which produced the results
#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
    target: &'static str,
    debug: bool,
    rustc: &'static str,
    built_at: &'static str,
    /// Short commit hash, suffixed with `-dirty` for uncommitted changes
    commit: String,
}

impl BuildInfo {
    fn current() -> Self {
        let commit = match built_info::GIT_COMMIT_HASH_SHORT {
            Some(hash) if built_info::GIT_DIRTY == Some(true) => format!("{hash}-dirty"),
            Some(hash) => hash.to_string(),
            None => "unknown".to_string(),
        };

        Self {
            name: built_info::PKG_NAME,
            version: built_info::PKG_VERSION,
            target: built_info::TARGET,
            debug: built_info::DEBUG,
            rustc: built_info::RUSTC_VERSION,
            built_at: built_info::BUILT_TIME_UTC,
            commit,
        }
    }
}

/// The machine the ranking ran on, as reported by `uname`
#[derive(Serialize)]
struct PlatformSummary {
    os: String,
    kernel: String,
    kernel_version: String,
    machine: String,
    host: String,
}

impl PlatformSummary {
    fn detect() -> Result<Self> {
        let info = PlatformInfo::new()
            .map_err(|err| anyhow!("{err}"))
            .context("Unable to determine platform info")?;
        let text = |value: &std::ffi::OsStr| value.to_string_lossy().into_owned();

        Ok(Self {
            os: text(info.osname()),
            kernel: text(info.sysname()),
            kernel_version: format!("{} {}", text(info.release()), text(info.version())),
            machine: text(info.machine()),
            host: text(info.nodename()),
        })
    }
}

/// Save a description of this run to `metadata.toml` in `output_path`
pub fn write_metadata(
    output_path: &Path,
    scenario_path: &Path,
    scenario: &Scenario,
) -> Result<()> {
    let metadata = RunMetadata {
        run: RunInfo {
            scenario_path,
            started: Local::now().to_rfc3339(),
        },
        scenario: ScenarioSummary::from_scenario(scenario),
        build: BuildInfo::current(),
        platform: PlatformSummary::detect()?,
    };

    let file_path = output_path.join(METADATA_FILE_NAME);
    let contents = toml::to_string(&metadata).context("Could not serialise run metadata")?;
    fs::write(&file_path, contents)
        .with_context(|| format!("Could not write {}", file_path.display()))
}
