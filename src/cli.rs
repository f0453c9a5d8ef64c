use std::path::PathBuf;

use clap::Parser;

use crate::config::{Credentials, RunOptions};

#[derive(Parser, Debug)]
#[clap(name = "danbooru-downloader", author, version, about, long_about = None)]
pub struct Cli {
    /// Tags to search. A single argument may also hold a "+" or space separated tag list
    #[clap(value_parser, required = true)]
    pub tags: Vec<String>,

    /// Where to save downloaded files
    #[clap(
        short,
        long,
        value_name = "PATH",
        default_value = "output",
        help_heading = "SAVE"
    )]
    pub output: PathBuf,

    /// Filter out posts rated General
    #[clap(short = 'g', long = "general", action, help_heading = "FILTER")]
    pub exclude_general: bool,

    /// Filter out posts rated Sensitive
    #[clap(short = 's', long = "sensitive", action, help_heading = "FILTER")]
    pub exclude_sensitive: bool,

    /// Filter out posts rated Questionable
    #[clap(short = 'q', long = "questionable", action, help_heading = "FILTER")]
    pub exclude_questionable: bool,

    /// Filter out posts rated Explicit (clearly 18+ images)
    #[clap(short = 'e', long = "explicit", action, help_heading = "FILTER")]
    pub exclude_explicit: bool,

    /// Number of simultaneous downloads [default: 3x the CPU core count]
    #[clap(short = 'd', long, value_name = "NUMBER", help_heading = "DOWNLOAD")]
    pub simultaneous_downloads: Option<usize>,

    /// Account login name for authenticated requests
    #[clap(long, env = "LOGIN_NAME", help_heading = "GENERAL")]
    pub login: Option<String>,

    /// Account API key for authenticated requests
    #[clap(long, env = "API_KEY", hide_env_values = true, help_heading = "GENERAL")]
    pub api_key: Option<String>,
}

impl Cli {
    /// Freeze the parsed arguments into the options shared by all tasks.
    ///
    /// Credentials are only formed when both the login and the API key were
    /// supplied; a lone value is ignored.
    pub fn run_options(&self) -> RunOptions {
        let tags = self
            .tags
            .iter()
            .flat_map(|t| t.split(|c: char| c == '+' || c == ' '))
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        let auth = match (&self.login, &self.api_key) {
            (Some(login), Some(api_key)) => Some(Credentials {
                login: login.clone(),
                api_key: api_key.clone(),
            }),
            _ => None,
        };

        RunOptions {
            tags,
            output: self.output.clone(),
            general: !self.exclude_general,
            sensitive: !self.exclude_sensitive,
            questionable: !self.exclude_questionable,
            explicit: !self.exclude_explicit,
            auth,
        }
    }

    /// Cap on simultaneous downloads, defaulting to a small multiple of the
    /// core count.
    pub fn simultaneous_downloads(&self) -> usize {
        self.simultaneous_downloads
            .unwrap_or_else(|| num_cpus::get() * 3)
    }
}
