//! # Danbooru Downloader
//!
//! danbooru_downloader is a CLI utility to bulk download images from Danbooru
//! tag searches.
//!
//! This utility aims to be fast and lightweight while offering simultaneous
//! downloads, rating filters and more.
pub mod auth;
pub mod cli;
pub mod config;
pub mod danbooru;
pub mod post;
mod progress_bars;
pub mod queue;
pub mod rate_limit;

// Export main downloader interface
pub use danbooru::DanbooruExtractor;

// Export main worker queue
pub use queue::DownloadQueue;

pub use config::RunOptions;

pub use post::rating::Rating;

pub use post::Post;
