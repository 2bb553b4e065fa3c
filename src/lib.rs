//! Scoring and ranking of candidate sites for green hydrogen production.
//!
//! Candidate sites are scored on their proximity to renewable energy sources and demand centres,
//! and on whether the regulatory zone they lie in permits development. The weighted scores are
//! then used to rank the sites.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod error;
pub mod geo;
pub mod id;
pub mod input;
pub mod log;
pub mod output;
pub mod polygon;
pub mod ranking;
pub mod reference;
pub mod scenario;
pub mod scoring;
pub mod settings;
pub mod site;
pub mod units;
pub mod weights;
pub mod zone;

#[cfg(test)]
mod fixture;

/// Get the directory in which program configuration files are stored
pub fn get_h2siting_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No config dir on this platform, so fall back to the current directory
        return PathBuf::from(".h2siting");
    };
    config_dir.push("h2siting");

    config_dir
}
