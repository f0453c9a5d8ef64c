//! Main representation of a Danbooru post
//!
//! # Post
//! A [`Post` struct](Post) holds the minimal set of info needed to identify,
//! download and save one file from a tag search.
use crate::progress_bars::ProgressCounter;
use bytesize::ByteSize;
use futures::StreamExt;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, path::Path, sync::Arc};
use tokio::{
    fs::{create_dir_all, OpenOptions},
    io::AsyncWriteExt,
    io::BufWriter,
};

use self::error::PostError;
use self::rating::Rating;

pub mod error;
pub mod rating;

/// What happened to a single post once the download routine looked at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// File was fetched and written to disk.
    Downloaded,
    /// File was already present at its destination path; no request was made.
    Skipped,
}

/// Catchall model for the necessary parts of a post to properly identify, download and save it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// ID number of the post given by the imageboard
    pub id: u64,
    /// Score of the post. Used as a filename prefix so files sort by popularity.
    pub score: i64,
    /// Rating of the post. Decides the destination subfolder.
    pub rating: Rating,
    /// The original file extension provided by the imageboard.
    pub extension: String,
    /// Direct URL of the original file located inside the imageboard's server
    pub url: String,
    /// URL of the larger/alternate variant, when the imageboard provides one.
    pub large_url: Option<String>,
}

impl Ord for Post {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Post {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Post {}

impl Post {
    /// Main routine to download a single post.
    ///
    /// Makes sure the rating subfolder exists and skips the download entirely
    /// if the destination file is already present.
    pub async fn get(
        &self,
        client: &Client,
        output: &Path,
        counters: Arc<ProgressCounter>,
    ) -> Result<DownloadOutcome, PostError> {
        let subfolder = output.join(self.rating.subfolder());
        create_dir_all(&subfolder).await?;

        let output = subfolder.join(self.file_name());

        if output.exists() {
            debug!("File {} already exists. Skipping.", output.display());
            return Ok(DownloadOutcome::Skipped);
        }

        let (url, _) = self.source();
        self.fetch(client, counters, &output, url).await?;
        Ok(DownloadOutcome::Downloaded)
    }

    /// Effective download source for this post.
    ///
    /// Some animated posts are reported with a `zip` extension while the
    /// large variant is the actual `webm` video. In that case the large
    /// variant URL wins and the extension is corrected in memory.
    pub fn source(&self) -> (&str, &str) {
        match &self.large_url {
            Some(large) if self.extension == "zip" && large.contains(".webm") => (large, "webm"),
            _ => (&self.url, &self.extension),
        }
    }

    #[inline]
    pub fn file_name(&self) -> String {
        let (_, extension) = self.source();
        format!("{}_{}.{}", self.score, self.id, extension)
    }

    async fn fetch(
        &self,
        client: &Client,
        counters: Arc<ProgressCounter>,
        output: &Path,
        url: &str,
    ) -> Result<(), PostError> {
        debug!("Fetching {}", url);
        let res = client.get(url).send().await?;

        if res.status().is_client_error() {
            debug!(
                "Image source returned status {}. Skipping download.",
                res.status()
            );
            return Err(PostError::RemoteFileNotFound);
        }

        let size = res.content_length().unwrap_or_default();

        debug!("Remote file is {}", ByteSize::b(size).to_string_as(true));

        let pb = counters.add_download_bar(size);

        debug!("Creating {:?}", &output);
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(output)
            .await?;

        let mut bw = BufWriter::new(file);

        // Download the file chunk by chunk.
        debug!("Retrieving chunks...");
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            // Retrieve chunk.
            let mut chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    return Err(PostError::ChunkDownloadFail {
                        message: e.to_string(),
                    })
                }
            };
            pb.inc(chunk.len() as u64);

            // Write to file.
            bw.write_all_buf(&mut chunk).await?;
        }
        bw.flush().await?;

        pb.finish_and_clear();
        Ok(())
    }
}
