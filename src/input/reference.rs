//! Code for reading renewable sources and demand centres from CSV files.
use super::*;
use crate::geo::Coordinate;
use crate::id::collect_unique_by_id;
use crate::reference::{DemandCentre, DemandCentreID, RenewableSource, SourceID};
use indexmap::IndexMap;
use serde::Deserialize;

const RENEWABLE_SOURCES_FILE_NAME: &str = "renewable_sources.csv";
const DEMAND_CENTRES_FILE_NAME: &str = "demand_centres.csv";

#[derive(Debug, PartialEq, Deserialize)]
struct RenewableSourceRaw {
    id: SourceID,
    name: String,
    latitude: f64,
    longitude: f64,
    technology: Option<String>,
}

#[derive(Debug, PartialEq, Deserialize)]
struct DemandCentreRaw {
    id: DemandCentreID,
    name: String,
    latitude: f64,
    longitude: f64,
}

/// Read renewable sources from a CSV file.
///
/// Unlike candidate sites, every source must have a valid location.
///
/// # Arguments
///
/// * `scenario_dir` - Folder containing scenario configuration files
///
/// # Returns
///
/// The renewable sources in file order, or an error.
pub fn read_renewable_sources(scenario_dir: &Path) -> Result<Vec<RenewableSource>> {
    let file_path = scenario_dir.join(RENEWABLE_SOURCES_FILE_NAME);
    let sources_csv = read_csv(&file_path)?;
    read_renewable_sources_from_iter(sources_csv).with_context(|| input_err_msg(&file_path))
}

fn read_renewable_sources_from_iter<I>(iter: I) -> Result<Vec<RenewableSource>>
where
    I: Iterator<Item = RenewableSourceRaw>,
{
    let sources = iter
        .map(|raw| {
            let location = Coordinate::new(raw.latitude, raw.longitude);
            location
                .validate()
                .with_context(|| format!("Invalid location for renewable source {}", raw.id))?;

            Ok(RenewableSource {
                id: raw.id,
                name: raw.name,
                location,
                technology: raw.technology.filter(|tech| !tech.is_empty()),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let sources: IndexMap<SourceID, _> = collect_unique_by_id(sources)?;

    Ok(sources.into_values().collect())
}

/// Read demand centres from a CSV file.
///
/// # Arguments
///
/// * `scenario_dir` - Folder containing scenario configuration files
///
/// # Returns
///
/// The demand centres in file order, or an error.
pub fn read_demand_centres(scenario_dir: &Path) -> Result<Vec<DemandCentre>> {
    let file_path = scenario_dir.join(DEMAND_CENTRES_FILE_NAME);
    let centres_csv = read_csv(&file_path)?;
    read_demand_centres_from_iter(centres_csv).with_context(|| input_err_msg(&file_path))
}

fn read_demand_centres_from_iter<I>(iter: I) -> Result<Vec<DemandCentre>>
where
    I: Iterator<Item = DemandCentreRaw>,
{
    let centres = iter
        .map(|raw| {
            let location = Coordinate::new(raw.latitude, raw.longitude);
            location
                .validate()
                .with_context(|| format!("Invalid location for demand centre {}", raw.id))?;

            Ok(DemandCentre {
                id: raw.id,
                name: raw.name,
                location,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let centres: IndexMap<DemandCentreID, _> = collect_unique_by_id(centres)?;

    Ok(centres.into_values().collect())
}
