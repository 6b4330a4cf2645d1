use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub mod args;
pub mod clean;
pub mod download;
pub mod info;

pub use args::{CleanCliArgs, Cli, CliCommand, DownloadCliArgs, InfoCliArgs};
pub use clean::handle_clean_command;
pub use download::handle_download_command;
pub use info::handle_info_command;

use crate::extractor::{SubtitleExtractor, VideoInfo};

/// Create a spinner on stderr, or nothing when progress is disabled.
pub(crate) fn create_spinner(show: bool, message: &'static str) -> Result<Option<ProgressBar>> {
    if !show {
        return Ok(None);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(Some(pb))
}

/// Fetch metadata behind an "Analyzing video metadata..." spinner.
pub(crate) async fn fetch_video_info(
    extractor: &dyn SubtitleExtractor,
    url: &str,
    show_progress: bool,
) -> Result<VideoInfo> {
    let pb = create_spinner(show_progress, "Analyzing video metadata...")?;

    match extractor.fetch_info(url).await {
        Ok(info) => {
            if let Some(pb) = pb {
                pb.finish_with_message("Analysis Complete!");
            }
            Ok(info)
        }
        Err(err) => {
            if let Some(pb) = pb {
                pb.abandon_with_message("Analysis failed");
            }
            Err(err.into())
        }
    }
}
