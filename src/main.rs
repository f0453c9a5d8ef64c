use anyhow::Error;
use clap::Parser;
use colored::Colorize;
use danbooru_downloader::auth::is_gold_account;
use danbooru_downloader::cli::Cli;
use danbooru_downloader::danbooru::{DANBOORU_BASE, DANBOORU_UA};
use danbooru_downloader::queue::DownloadSummary;
use danbooru_downloader::{DanbooruExtractor, DownloadQueue};
use log::debug;
use reqwest::Client;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    env_logger::builder().format_timestamp(None).init();

    let options = Arc::new(args.run_options());

    // One client for every request in the run. The download phase keeps many
    // connections to the same host open, so the idle pool must match.
    let client = Client::builder()
        .user_agent(DANBOORU_UA)
        .pool_max_idle_per_host(args.simultaneous_downloads())
        .build()?;

    let extractor = DanbooruExtractor::new(client.clone(), options.clone());

    let total_pages = match extractor.total_pages().await {
        Ok(pages) => pages,
        Err(e) => {
            debug!("Page count resolution failed: {}", e);
            println!("{}", "No posts found for tag selection!".bold());
            return Ok(());
        }
    };
    debug!("{} pages for tag list {:?}", total_pages, options.tags);

    let gold_account = match &options.auth {
        Some(auth) => is_gold_account(&client, DANBOORU_BASE, auth).await,
        None => false,
    };

    let posts = extractor.fetch_all(total_pages, gold_account).await;

    if posts.is_empty() {
        println!("{}", "No posts left after rating filters!".bold());
        return Ok(());
    }

    let queue = DownloadQueue::new(posts, args.simultaneous_downloads(), client);
    let summary = queue.download(&options.output).await?;

    print_results(summary);

    Ok(())
}

fn print_results(summary: DownloadSummary) {
    println!(
        "{} {} {}",
        summary.downloaded.to_string().bold().blue(),
        "files".bold().blue(),
        "downloaded".bold()
    );

    if summary.skipped > 0 {
        println!(
            "{} {}",
            summary.skipped.to_string().bold().green(),
            "files were already present and were not downloaded again.".bold()
        );
    }
}
