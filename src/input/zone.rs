//! Code for reading regulatory zones and their boundaries from CSV files.
use super::*;
use crate::geo::Coordinate;
use crate::id::{IDCollection, collect_unique_by_id};
use crate::polygon::Polygon;
use crate::zone::{RegulatoryZone, ZoneCategory, ZoneID};
use indexmap::IndexMap;
use serde::Deserialize;

const REGULATORY_ZONES_FILE_NAME: &str = "regulatory_zones.csv";
const ZONE_VERTICES_FILE_NAME: &str = "zone_vertices.csv";

#[derive(Debug, PartialEq, Deserialize)]
struct RegulatoryZoneRaw {
    id: ZoneID,
    name: String,
    category: String,
    priority: Option<u32>,
}

#[derive(Debug, PartialEq, Deserialize)]
struct ZoneVertexRaw {
    zone_id: String,
    latitude: f64,
    longitude: f64,
}

/// Read regulatory zones and their boundaries.
///
/// Zones are optional: if the zones file is absent, no zones are returned. If it is present, the
/// vertices file must be too. Vertices are assigned to zones in the order they appear in the
/// file. A zone with fewer than three vertices is accepted here, but can never contain a site.
///
/// # Arguments
///
/// * `scenario_dir` - Folder containing scenario configuration files
///
/// # Returns
///
/// The zones in file order, or an error.
pub fn read_regulatory_zones(scenario_dir: &Path) -> Result<Vec<RegulatoryZone>> {
    let zones_path = scenario_dir.join(REGULATORY_ZONES_FILE_NAME);
    let vertices_path = scenario_dir.join(ZONE_VERTICES_FILE_NAME);
    if !zones_path.exists() {
        ensure!(
            !vertices_path.exists(),
            "{ZONE_VERTICES_FILE_NAME} was provided without {REGULATORY_ZONES_FILE_NAME}"
        );
        return Ok(Vec::new());
    }

    let zones_csv = read_csv(&zones_path)?;
    let mut zones = read_zones_from_iter(zones_csv).with_context(|| input_err_msg(&zones_path))?;

    let vertices_csv = read_csv(&vertices_path)?;
    read_zone_vertices_from_iter(vertices_csv, &mut zones)
        .with_context(|| input_err_msg(&vertices_path))?;

    Ok(zones.into_values().collect())
}

fn read_zones_from_iter<I>(iter: I) -> Result<IndexMap<ZoneID, RegulatoryZone>>
where
    I: Iterator<Item = RegulatoryZoneRaw>,
{
    let zones = iter
        .map(|raw| {
            ensure!(
                !raw.category.is_empty(),
                "Zone {} has an empty category",
                raw.id
            );

            Ok(RegulatoryZone {
                id: raw.id,
                name: raw.name,
                category: ZoneCategory::from(raw.category.as_str()),
                priority: raw.priority,
                boundary: Polygon::default(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    collect_unique_by_id(zones)
}

fn read_zone_vertices_from_iter<I>(
    iter: I,
    zones: &mut IndexMap<ZoneID, RegulatoryZone>,
) -> Result<()>
where
    I: Iterator<Item = ZoneVertexRaw>,
{
    let mut rings: IndexMap<ZoneID, Vec<Coordinate>> = IndexMap::new();
    for raw in iter {
        let zone_id = zones.get_id_by_str(&raw.zone_id)?;
        let vertex = Coordinate::new(raw.latitude, raw.longitude);
        vertex
            .validate()
            .with_context(|| format!("Invalid vertex for zone {zone_id}"))?;
        rings.entry(zone_id).or_default().push(vertex);
    }

    for (zone_id, ring) in rings {
        zones[&zone_id].boundary = Polygon::new(ring);
    }

    Ok(())
}
