//! Resolved configuration for one invocation of the downloader.
//!
//! Everything the concurrent tasks need is read from CLI/env once, frozen
//! inside a [`RunOptions`] and shared behind an `Arc`. No component reads
//! ambient process state after startup.
use std::path::PathBuf;

use crate::post::rating::Rating;

/// Login name and API key pair used for authenticated requests.
///
/// Only ever constructed when both values are present.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub api_key: String,
}

/// Options for a single run, constructed before any network activity.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Tags to search for, in the order the user supplied them.
    pub tags: Vec<String>,
    /// Directory where the rating subfolders are created.
    pub output: PathBuf,
    pub general: bool,
    pub sensitive: bool,
    pub questionable: bool,
    pub explicit: bool,
    /// Account credentials, when both login and API key were supplied.
    pub auth: Option<Credentials>,
}

impl RunOptions {
    /// Merge all tags into the URL format the site expects.
    ///
    /// Each tag is percent-encoded individually and the list is joined with
    /// a literal `+`, which the server reads as the tag separator.
    pub fn tag_string(&self) -> String {
        self.tags
            .iter()
            .map(|t| urlencoding::encode(t).into_owned())
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Whether posts with the given rating should be kept.
    ///
    /// Posts with an unrecognized rating are always kept.
    pub fn allows(&self, rating: Rating) -> bool {
        match rating {
            Rating::General => self.general,
            Rating::Sensitive => self.sensitive,
            Rating::Questionable => self.questionable,
            Rating::Explicit => self.explicit,
            Rating::Unknown => true,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            output: PathBuf::from("output"),
            general: true,
            sensitive: true,
            questionable: true,
            explicit: true,
            auth: None,
        }
    }
}
