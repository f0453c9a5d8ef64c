use indicatif::{
    HumanBytes, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle,
};
use std::{
    fmt::Write,
    sync::{Arc, Mutex},
    time::Duration,
};

const PROGRESS_CHARS: &str = "━━";

pub struct BarTemplates {
    pub main: &'static str,
    pub download: &'static str,
}

impl Default for BarTemplates {
    fn default() -> Self {
        Self {
            main: "{spinner:.green.bold} {elapsed_precise:.bold} {wide_bar:.green/white.dim} {percent:.bold}  {pos:.green} ({msg:.bold.blue} | eta. {eta:.blue})",
            download: "{spinner:.green.bold} {bar:40.green/white.dim} {percent:.bold} | {byte_progress:.green} @ {bytes_per_sec:>13.red} (eta. {eta:.blue})",
        }
    }
}

/// Progress bar pair shared by all download tasks, plus the run counters.
///
/// The main usage for this is to pass references of the progress bars across
/// multiple tasks while downloading.
pub struct ProgressCounter {
    pub main: Arc<ProgressBar>,
    pub multi: Arc<MultiProgress>,
    pub downloaded_mtx: Mutex<u64>,
    pub skipped_mtx: Mutex<u64>,
}

impl ProgressCounter {
    pub fn initialize(len: u64) -> Arc<Self> {
        let templates = BarTemplates::default();
        let bar = ProgressBar::new(len).with_style(master_progress_style(&templates));
        bar.set_message("Downloading posts");
        bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(60));
        bar.enable_steady_tick(Duration::from_millis(100));

        // Initialize the bars
        let multi = Arc::new(MultiProgress::new());
        let main = Arc::new(multi.add(bar));

        Arc::new(Self {
            main,
            multi,
            downloaded_mtx: Mutex::new(0),
            skipped_mtx: Mutex::new(0),
        })
    }

    /// Adds a per-file bar below the main one, sized by the remote file length.
    pub fn add_download_bar(&self, len: u64) -> ProgressBar {
        let templates = BarTemplates::default();
        let bar = ProgressBar::new(len).with_style(download_progress_style(&templates));
        bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(60));

        self.multi.add(bar)
    }
}

/// Single bar used while scanning result pages.
pub fn fetch_progress_bar(total_pages: u64) -> ProgressBar {
    let templates = BarTemplates::default();
    let bar = ProgressBar::new(total_pages).with_style(master_progress_style(&templates));
    bar.set_message("Fetching posts");
    bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(60));
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub fn master_progress_style(templates: &BarTemplates) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(templates.main)
        .unwrap()
        .with_key("pos", |state: &ProgressState, w: &mut dyn Write| {
            write!(w, "{}/{}", state.pos(), state.len().unwrap()).unwrap();
        })
        .with_key("percent", |state: &ProgressState, w: &mut dyn Write| {
            write!(w, "{:>3.0}%", state.fraction() * 100_f32).unwrap();
        })
        .progress_chars(PROGRESS_CHARS)
}

pub fn download_progress_style(templates: &BarTemplates) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(templates.download)
        .unwrap()
        .with_key("percent", |state: &ProgressState, w: &mut dyn Write| {
            write!(w, "{:>3.0}%", state.fraction() * 100_f32).unwrap();
        })
        .with_key(
            "byte_progress",
            |state: &ProgressState, w: &mut dyn Write| {
                write!(
                    w,
                    "{}/{}",
                    HumanBytes(state.pos()),
                    HumanBytes(state.len().unwrap())
                )
                .unwrap();
            },
        )
        .progress_chars(PROGRESS_CHARS)
}
