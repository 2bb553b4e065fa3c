//! Code for reading candidate sites from a CSV file.
use super::*;
use crate::geo::Coordinate;
use crate::id::collect_unique_by_id;
use crate::site::{CandidateSite, SiteID};
use indexmap::IndexMap;
use serde::Deserialize;

const CANDIDATE_SITES_FILE_NAME: &str = "candidate_sites.csv";

#[derive(Debug, PartialEq, Deserialize)]
struct CandidateSiteRaw {
    id: SiteID,
    name: String,
    latitude: f64,
    longitude: f64,
}

/// Read candidate sites from a CSV file.
///
/// Coordinates are not range-checked here, as invalid coordinates are reported per site when
/// ranking.
///
/// # Arguments
///
/// * `scenario_dir` - Folder containing scenario configuration files
///
/// # Returns
///
/// The candidate sites in the order they appear in the file, or an error.
pub fn read_candidate_sites(scenario_dir: &Path) -> Result<Vec<CandidateSite>> {
    let file_path = scenario_dir.join(CANDIDATE_SITES_FILE_NAME);
    let sites_csv = read_csv(&file_path)?;
    read_candidate_sites_from_iter(sites_csv).with_context(|| input_err_msg(&file_path))
}

fn read_candidate_sites_from_iter<I>(iter: I) -> Result<Vec<CandidateSite>>
where
    I: Iterator<Item = CandidateSiteRaw>,
{
    let sites = iter
        .map(|raw| {
            ensure!(!raw.id.0.is_empty(), "Site IDs cannot be empty");
            Ok(CandidateSite::new(
                raw.id,
                raw.name,
                Coordinate::new(raw.latitude, raw.longitude),
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    let sites: IndexMap<SiteID, _> = collect_unique_by_id(sites)?;

    Ok(sites.into_values().collect())
}
