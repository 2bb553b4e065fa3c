//! Candidate sites for hydrogen infrastructure and their scores.
use crate::geo::Coordinate;
use crate::id::{define_id_getter, define_id_type};
use crate::units::Dimensionless;

define_id_type! {SiteID}

/// The individual criteria which make up a site's score, along with the weighted total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Proximity to the nearest renewable source, in (0, 1]
    pub renewable: Dimensionless,
    /// Proximity to the nearest demand centre, in (0, 1]
    pub demand: Dimensionless,
    /// 1 if the governing zone permits development, otherwise 0
    pub regulatory: Dimensionless,
    /// The weighted sum of the above
    pub total: Dimensionless,
}

/// Whether a site has been scored yet
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SiteScore {
    /// The site has not been scored
    #[default]
    Unscored,
    /// The site has been scored
    Scored(ScoreBreakdown),
}

/// A location being considered for hydrogen infrastructure
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSite {
    /// A unique identifier for the site
    pub id: SiteID,
    /// A human-readable name for the site
    pub name: String,
    /// Where the site is
    pub location: Coordinate,
    /// The site's score, if it has been scored
    pub score: SiteScore,
}
define_id_getter! {CandidateSite, SiteID}

impl CandidateSite {
    /// Create a new unscored site
    pub fn new(id: SiteID, name: String, location: Coordinate) -> Self {
        Self {
            id,
            name,
            location,
            score: SiteScore::Unscored,
        }
    }

    /// The total score, if the site has been scored
    pub fn total_score(&self) -> Option<Dimensionless> {
        match self.score {
            SiteScore::Unscored => None,
            SiteScore::Scored(breakdown) => Some(breakdown.total),
        }
    }
}

/// A site along with its computed score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSite {
    /// A unique identifier for the site
    pub id: SiteID,
    /// A human-readable name for the site
    pub name: String,
    /// Where the site is
    pub location: Coordinate,
    /// How the site scored
    pub breakdown: ScoreBreakdown,
}
define_id_getter! {ScoredSite, SiteID}

impl ScoredSite {
    /// Attach a score to a copy of `site`
    pub fn new(site: &CandidateSite, breakdown: ScoreBreakdown) -> Self {
        Self {
            id: site.id.clone(),
            name: site.name.clone(),
            location: site.location,
            breakdown,
        }
    }

    /// The weighted total score
    pub fn score(&self) -> Dimensionless {
        self.breakdown.total
    }
}

impl From<ScoredSite> for CandidateSite {
    fn from(site: ScoredSite) -> Self {
        Self {
            id: site.id,
            name: site.name,
            location: site.location,
            score: SiteScore::Scored(site.breakdown),
        }
    }
}
