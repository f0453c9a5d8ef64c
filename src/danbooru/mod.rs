//! Post extractor for `https://danbooru.donmai.us`
//!
//! The extractor resolves how many result pages exist for a tag selection,
//! then scans all pages concurrently under the site's request budget and
//! returns the merged, rating-filtered post list.
use crate::config::RunOptions;
use crate::post::{rating::Rating, Post};
use crate::progress_bars::fetch_progress_bar;
use crate::rate_limit::RateLimiter;
use log::{debug, warn};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::{Arc, Mutex};

use self::error::ExtractorError;
use self::models::DanbooruItem;

pub mod error;
pub mod models;

pub const DANBOORU_BASE: &str = "https://danbooru.donmai.us";
pub const DANBOORU_UA: &str = "Danbooru Downloader/0.1.0 (by danbooru user toast)";

/// Fields requested from the posts endpoint. Keeps page payloads small.
const POST_FIELDS: &str = "rating,file_url,id,score,file_ext,large_file_url";

/// Anonymous accounts get 10 page requests per second.
const BASE_RATE_LIMIT: u32 = 10;
/// Gold and higher tiers can go up to 20 without the API erroring out.
const GOLD_RATE_LIMIT: u32 = 20;

const NO_POSTS_MARKER: &str = "No posts found.";

/// Main object to scan tag searches and collect posts
#[derive(Debug, Clone)]
pub struct DanbooruExtractor {
    client: Client,
    options: Arc<RunOptions>,
    tag_string: String,
    base_url: String,
}

impl DanbooruExtractor {
    pub fn new(client: Client, options: Arc<RunOptions>) -> Self {
        Self::with_base_url(client, options, DANBOORU_BASE)
    }

    /// Same as [`new`](Self::new) but pointed at a different server. Used by
    /// the integration tests.
    pub fn with_base_url(
        client: Client,
        options: Arc<RunOptions>,
        base_url: impl Into<String>,
    ) -> Self {
        let tag_string = options.tag_string();
        debug!("Tag List: {}", tag_string);

        Self {
            client,
            options,
            tag_string,
            base_url: base_url.into(),
        }
    }

    /// Get the total amount of result pages for the tag selection.
    ///
    /// Scrapes the HTML listing page: the pagination control at the bottom
    /// carries the highest page number. A listing without a pagination
    /// control has exactly one page of results.
    pub async fn total_pages(&self) -> Result<u64, ExtractorError> {
        let url = format!(
            "{}/posts?tags={}&limit=200",
            self.base_url, self.tag_string
        );

        let request = if let Some(auth) = &self.options.auth {
            self.client
                .get(url)
                .query(&[("login", &auth.login), ("api_key", &auth.api_key)])
        } else {
            self.client.get(url)
        };

        let body = request.send().await?.text().await?;
        parse_total_pages(&body)
    }

    /// Scans pages `1..=total_pages` concurrently and returns every post that
    /// passes the rating filters.
    ///
    /// Each page runs as its own task gated by the shared [`RateLimiter`];
    /// a failed page only loses its own posts. All tasks are joined before
    /// returning, so the result is complete once this resolves.
    pub async fn fetch_all(&self, total_pages: u64, gold_account: bool) -> Vec<Post> {
        let rate = if gold_account {
            GOLD_RATE_LIMIT
        } else {
            BASE_RATE_LIMIT
        };
        debug!("Page request budget: {} req/s", rate);

        let limiter = Arc::new(RateLimiter::new(rate));
        let bar = fetch_progress_bar(total_pages);
        let posts = Arc::new(Mutex::new(Vec::new()));

        let mut tasks = Vec::with_capacity(total_pages as usize);
        for page in 1..=total_pages {
            let extractor = self.clone();
            let limiter = limiter.clone();
            let posts = posts.clone();
            let bar = bar.clone();

            tasks.push(tokio::spawn(async move {
                limiter.acquire().await;

                match extractor.fetch_page(page).await {
                    Ok(mut list) => {
                        debug!("Page {} yielded {} posts", page, list.len());
                        posts.lock().unwrap().append(&mut list);
                    }
                    Err(e) => warn!("Failed to fetch page {}: {}", page, e),
                }

                bar.inc(1);
            }));
        }

        for task in tasks {
            let _ = task.await;
        }
        bar.finish_and_clear();

        let mut list = posts.lock().unwrap();
        std::mem::take(&mut *list)
    }

    async fn fetch_page(&self, page: u64) -> Result<Vec<Post>, ExtractorError> {
        let url = format!("{}/posts.json?tags={}", self.base_url, self.tag_string);

        debug!("Fetching posts from page {}", page);
        let request = self.client.get(url).query(&[
            ("page", &page.to_string()),
            ("limit", &200.to_string()),
            ("only", &POST_FIELDS.to_string()),
        ]);

        let request = if let Some(auth) = &self.options.auth {
            request.query(&[("login", &auth.login), ("api_key", &auth.api_key)])
        } else {
            request
        };

        let items = request.send().await?.json::<Vec<DanbooruItem>>().await?;

        let posts = items
            .into_iter()
            .filter_map(Self::map_item)
            .filter(|post| self.options.allows(post.rating))
            .collect();

        Ok(posts)
    }

    /// Posts without a direct file URL (takedowns, login-walled content)
    /// can't be downloaded and are dropped here.
    fn map_item(item: DanbooruItem) -> Option<Post> {
        let url = item.file_url.filter(|u| !u.is_empty())?;

        Some(Post {
            id: item.id?,
            score: item.score.unwrap_or_default(),
            rating: Rating::from_rating_str(item.rating.as_deref().unwrap_or_default()),
            extension: item.file_ext.unwrap_or_default(),
            url,
            large_url: item.large_file_url,
        })
    }
}

/// Extracts the page count from the HTML post listing.
fn parse_total_pages(html: &str) -> Result<u64, ExtractorError> {
    let document = Html::parse_document(html);

    let no_posts = Selector::parse("#posts > div > p").expect("Invalid selector");
    if document
        .select(&no_posts)
        .any(|p| p.text().collect::<String>().trim() == NO_POSTS_MARKER)
    {
        return Err(ExtractorError::ZeroPosts);
    }

    let paginator = Selector::parse(".paginator-page.desktop-only").expect("Invalid selector");
    match document.select(&paginator).last() {
        None => Ok(1),
        Some(element) => element
            .text()
            .collect::<String>()
            .trim()
            .parse::<u64>()
            .map_err(|_| ExtractorError::InvalidServerResponse),
    }
}
