//! Board score and rank tiers.

use crate::classify::CellClassification;
use crate::template::ObjectFamily;
use std::fmt;

/// Per-category tally of the scorable cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Breakdown {
    pub buoys: u32,
    pub lighthouses: u32,
    pub empty: u32,
}

impl Breakdown {
    pub const EMPTY_POINTS: u32 = 1;
    pub const BUOY_POINTS: u32 = 2;
    pub const LIGHTHOUSE_POINTS: u32 = 3;

    /// Counts categories; the beacon headquarters tallies as a lighthouse.
    pub fn from_classifications(cells: &[CellClassification]) -> Self {
        let mut out = Self::default();
        for cell in cells {
            match cell.category.as_ref().map(|c| c.kind.family()) {
                Some(ObjectFamily::Buoy) => out.buoys += 1,
                Some(ObjectFamily::Lighthouse) => out.lighthouses += 1,
                None => out.empty += 1,
            }
        }
        out
    }

    pub fn total(&self) -> u32 {
        self.empty * Self::EMPTY_POINTS
            + self.buoys * Self::BUOY_POINTS
            + self.lighthouses * Self::LIGHTHOUSE_POINTS
    }
}

/// Named tier a score falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Novices,
    Sailors,
    Captains,
    Navigators,
    Cartographers,
}

impl Rank {
    pub const ALL: [Rank; 5] = [
        Rank::Novices,
        Rank::Sailors,
        Rank::Captains,
        Rank::Navigators,
        Rank::Cartographers,
    ];

    /// Maps a score onto its tier. Upper bounds are inclusive.
    pub fn for_score(score: u32) -> Self {
        match score {
            0..=25 => Rank::Novices,
            26..=35 => Rank::Sailors,
            36..=45 => Rank::Captains,
            46..=55 => Rank::Navigators,
            _ => Rank::Cartographers,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Novices => "Novices",
            Rank::Sailors => "Sailors",
            Rank::Captains => "Captains",
            Rank::Navigators => "Navigators",
            Rank::Cartographers => "Cartographers",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Rank::Novices => "The sea is still a mystery to your crew. Keep trying!",
            Rank::Sailors => "Your crew is beginning to learn the ropes!",
            Rank::Captains => "The wind is at your back and the charts are filling in.",
            Rank::Navigators => "Reading the waves has become second nature to you.",
            Rank::Cartographers => "Harbours far and wide tell stories of your prowess.",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Total score, tier and tally of one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreCard {
    pub score: u32,
    pub rank: Rank,
    pub breakdown: Breakdown,
}

impl ScoreCard {
    pub fn from_classifications(cells: &[CellClassification]) -> Self {
        let breakdown = Breakdown::from_classifications(cells);
        let score = breakdown.total();
        Self {
            score,
            rank: Rank::for_score(score),
            breakdown,
        }
    }
}
