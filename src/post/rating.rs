//! General enum for rating posts found on the website
//! # Post Rating
//! Danbooru classifies posts considering how explicit they are
//!
//! Posts are usually classified into 4 special tags:
//! * `General`: Posts that don't involve nothing suggestive. Usually normal fanart.
//! * `Sensitive`: Posts that involve mildly suggestive art that *might* not be safe for viewing close to other people or at work.
//! * `Questionable`: Posts that involve nude/seminude characters or stronger suggestive themes.
//! * `Explicit`: Posts that are explicitly pornographic or have other sensitive content such as gore, etc.
//!
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Rating {
    /// Represents posts that don't involve anything suggestive or sensitive.
    General,
    /// Represents posts that have some degree of suggestive elements.
    Sensitive,
    /// Represents posts that have a higher degree of nudity or sexually suggestive elements.
    Questionable,
    /// Represents posts that have explicit elements of pornography, gore, death, etc.
    Explicit,
    /// Represents a failure to parse the `rating` tag into one of the above.
    #[default]
    Unknown,
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "General"),
            Self::Sensitive => write!(f, "Sensitive"),
            Self::Questionable => write!(f, "Questionable"),
            Self::Explicit => write!(f, "Explicit"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Rating {
    /// Guess the variant according to the rating tag present in the post
    pub fn from_rating_str(s: &str) -> Self {
        match s {
            "g" | "general" => Self::General,
            "s" | "sensitive" | "safe" => Self::Sensitive,
            "q" | "questionable" => Self::Questionable,
            "e" | "explicit" => Self::Explicit,
            _ => Self::Unknown,
        }
    }

    /// Name of the subdirectory where posts with this rating are saved.
    pub fn subfolder(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Sensitive => "sensitive",
            Self::Questionable => "questionable",
            Self::Explicit => "explicit",
            Self::Unknown => "unknown",
        }
    }
}
