//! Queue used to download and save posts found by the [extractor](crate::danbooru::DanbooruExtractor).
//!
//! # Example usage
//!
//! ```no_run
//! use danbooru_downloader::{DownloadQueue, Post, Rating};
//! use reqwest::Client;
//! use std::path::Path;
//!
//! async fn download_posts(posts: Vec<Post>, client: Client) {
//!     let sd = 10; // Number of simultaneous downloads.
//!
//!     let queue = DownloadQueue::new(posts, sd, client);
//!
//!     let summary = queue.download(Path::new("./output")).await.unwrap();
//!
//!     println!("{} new files", summary.downloaded);
//! }
//! ```
use crate::post::{DownloadOutcome, Post};
use crate::progress_bars::ProgressCounter;
use log::debug;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::create_dir_all;
use tokio::sync::Semaphore;

pub mod error;

use self::error::QueueError;

/// Counts of what the queue did with its post list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadSummary {
    /// Files fetched and written during this run.
    pub downloaded: u64,
    /// Posts whose file was already present on disk.
    pub skipped: u64,
}

/// Struct where all the downloading will take place
#[derive(Debug)]
pub struct DownloadQueue {
    list: Vec<Post>,
    sim_downloads: usize,
    client: Client,
}

impl DownloadQueue {
    /// Set up the queue for download.
    ///
    /// Posts are processed newest-first; `sim_downloads` caps how many
    /// transfers are in flight at once.
    pub fn new(posts: Vec<Post>, sim_downloads: usize, client: Client) -> Self {
        let mut list = posts;
        list.sort();
        list.reverse();

        Self {
            list,
            sim_downloads,
            client,
        }
    }

    /// Starts the download of all posts collected by the extractor.
    ///
    /// One task is spawned per post; each must take a slot from the
    /// admission semaphore before any network I/O, and the slot is returned
    /// on every exit path. The progress bar advances exactly once per post,
    /// downloaded, skipped or failed alike.
    pub async fn download(self, output: &Path) -> Result<DownloadSummary, QueueError> {
        debug!("Target dir: {}", output.display());
        create_dir_all(output).await?;

        let counters = ProgressCounter::initialize(self.list.len() as u64);
        let semaphore = Arc::new(Semaphore::new(self.sim_downloads));

        debug!("Downloading {} posts", self.list.len());

        let mut task_pool = Vec::with_capacity(self.list.len());
        for post in self.list {
            let client = self.client.clone();
            let output = output.to_path_buf();
            let counter = counters.clone();
            let semaphore = semaphore.clone();

            let task = tokio::task::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };

                match post.get(&client, &output, counter.clone()).await {
                    Ok(DownloadOutcome::Downloaded) => {
                        *counter.downloaded_mtx.lock().unwrap() += 1;
                    }
                    Ok(DownloadOutcome::Skipped) => {
                        *counter.skipped_mtx.lock().unwrap() += 1;
                    }
                    Err(e) => {
                        debug!("Failed to download post {}: {}", post.id, e);
                    }
                }

                counter.main.inc(1);
            });
            task_pool.push(task);
        }

        for task in task_pool {
            let _ = task.await;
        }

        counters.main.finish_and_clear();

        let downloaded = *counters.downloaded_mtx.lock().unwrap();
        let skipped = *counters.skipped_mtx.lock().unwrap();

        Ok(DownloadSummary {
            downloaded,
            skipped,
        })
    }
}
