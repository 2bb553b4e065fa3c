//! Fixtures for tests

use crate::geo::Coordinate;
use crate::polygon::Polygon;
use crate::reference::{DemandCentre, ReferenceData, RenewableSource};
use crate::site::CandidateSite;
use crate::zone::{RegulatoryZone, ZoneCategory};
use log::{Level, LevelFilter, Log, Metadata, Record};
use rstest::fixture;
use std::cell::RefCell;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

thread_local! {
    static WARNINGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Records warnings and errors logged on the current thread
struct WarningRecorder;

impl Log for WarningRecorder {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            WARNINGS.with_borrow_mut(|warnings| warnings.push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static WARNING_RECORDER: WarningRecorder = WarningRecorder;

/// Run `f`, returning its result along with the warnings it logged
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    // Tests never install the program logger, so this is the only one
    let _ = log::set_logger(&WARNING_RECORDER);
    log::set_max_level(LevelFilter::Warn);

    WARNINGS.with_borrow_mut(Vec::clear);
    let result = f();
    (result, WARNINGS.with_borrow_mut(std::mem::take))
}

/// An unscored candidate site at the given location
pub fn candidate(id: &str, latitude: f64, longitude: f64) -> CandidateSite {
    CandidateSite::new(
        id.into(),
        format!("Site {id}"),
        Coordinate::new(latitude, longitude),
    )
}

/// A zone whose boundary is given as (latitude, longitude) pairs
pub fn zone(
    id: &str,
    category: &str,
    priority: Option<u32>,
    points: &[(f64, f64)],
) -> RegulatoryZone {
    RegulatoryZone {
        id: id.into(),
        name: format!("Zone {id}"),
        category: ZoneCategory::from(category),
        priority,
        boundary: points
            .iter()
            .map(|&(lat, lon)| Coordinate::new(lat, lon))
            .collect::<Polygon>(),
    }
}

/// A square zone spanning `min` to `max` in both latitude and longitude
pub fn square_zone(id: &str, category: &str, min: f64, max: f64) -> RegulatoryZone {
    zone(
        id,
        category,
        None,
        &[(min, min), (min, max), (max, max), (max, min)],
    )
}

/// Reference data around Delhi.
///
/// There is a renewable source exactly at (28.61, 77.22) and a permitted zone which contains that
/// point but not (28.70, 77.50).
#[fixture]
pub fn reference_data() -> ReferenceData {
    ReferenceData {
        renewables: vec![RenewableSource {
            id: "yamuna_solar".into(),
            name: "Yamuna Solar Park".into(),
            location: Coordinate::new(28.61, 77.22),
            technology: Some("solar".into()),
        }],
        demand_centres: vec![DemandCentre {
            id: "okhla".into(),
            name: "Okhla Industrial Area".into(),
            location: Coordinate::new(28.62, 77.23),
        }],
        zones: vec![zone(
            "central_permitted",
            "permitted",
            None,
            &[(28.55, 77.15), (28.55, 77.30), (28.65, 77.30), (28.65, 77.15)],
        )],
    }
}
