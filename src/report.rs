//! User-facing rejection reasons and the stage that produced them.

use std::fmt;
use thiserror::Error;

/// Pipeline stage a rejection is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureStage {
    SizeCheck,
    ColorCheck,
    ArrowCheck,
    Decode,
    Scoring,
}

impl FailureStage {
    /// Stable tag used in serialized results.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureStage::SizeCheck => "size_check",
            FailureStage::ColorCheck => "color_check",
            FailureStage::ArrowCheck => "arrow_check",
            FailureStage::Decode => "decode",
            FailureStage::Scoring => "scoring",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which size bound an image violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeLimit {
    TooSmall,
    TooLarge,
}

impl SizeLimit {
    fn message(self) -> &'static str {
        match self {
            SizeLimit::TooSmall => "Image too small - please upload a clearer photo",
            SizeLimit::TooLarge => "Image too large - please upload a smaller file",
        }
    }
}

/// Why a board image was turned down. `Display` is the message shown to the
/// player.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Rejection {
    #[error("{}", .limit.message())]
    Size {
        limit: SizeLimit,
        width: u32,
        height: u32,
    },
    #[error("This does not look like a Beacon Patrol board")]
    Color { blue_fraction: f32 },
    /// Carries the orientation summary verbatim.
    #[error("{message}")]
    Orientation {
        message: String,
        correct: usize,
        incorrect: usize,
    },
    #[error("Error: Not a valid image file")]
    Decode { reason: String },
    #[error("Could not score this board")]
    Scoring { reason: String },
}

impl Rejection {
    pub fn too_small(width: u32, height: u32) -> Self {
        Rejection::Size {
            limit: SizeLimit::TooSmall,
            width,
            height,
        }
    }

    pub fn too_large(width: u32, height: u32) -> Self {
        Rejection::Size {
            limit: SizeLimit::TooLarge,
            width,
            height,
        }
    }

    pub fn stage(&self) -> FailureStage {
        match self {
            Rejection::Size { .. } => FailureStage::SizeCheck,
            Rejection::Color { .. } => FailureStage::ColorCheck,
            Rejection::Orientation { .. } => FailureStage::ArrowCheck,
            Rejection::Decode { .. } => FailureStage::Decode,
            Rejection::Scoring { .. } => FailureStage::Scoring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FailureStage, Rejection};

    #[test]
    fn stages_have_stable_tags() {
        assert_eq!(Rejection::too_small(10, 10).stage().as_str(), "size_check");
        assert_eq!(
            Rejection::Color { blue_fraction: 0.0 }.stage(),
            FailureStage::ColorCheck
        );
        assert_eq!(FailureStage::ArrowCheck.to_string(), "arrow_check");
    }

    #[test]
    fn size_messages_name_the_direction() {
        assert!(Rejection::too_small(10, 10).to_string().contains("too small"));
        assert!(Rejection::too_large(5000, 10).to_string().contains("too large"));
    }
}
