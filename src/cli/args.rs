use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "subpro")]
#[command(about = "Download video subtitles as files or clean transcripts", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Show video details and the available subtitle tracks
    Info(InfoCliArgs),
    /// Download a subtitle track as a clean transcript or raw subtitle file
    Download(DownloadCliArgs),
    /// Clean a local WebVTT/SRT file into a plain transcript
    Clean(CleanCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct InfoCliArgs {
    /// Video URL
    pub url: String,
    /// Cookies file for private or age-gated videos (overrides config)
    #[arg(long)]
    pub cookies: Option<PathBuf>,
    /// Print video details and tracks as JSON
    #[arg(long)]
    pub json: bool,
    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct DownloadCliArgs {
    /// Video URL
    pub url: String,
    /// Language code of the track to download (e.g. en, de, en-orig)
    #[arg(short, long)]
    pub lang: Option<String>,
    /// Download the auto-generated track for --lang instead of the manual one
    #[arg(long, requires = "lang")]
    pub auto: bool,
    /// Save the subtitle file as-is instead of a clean transcript
    #[arg(long)]
    pub raw: bool,
    /// Cookies file for private or age-gated videos (overrides config)
    #[arg(long)]
    pub cookies: Option<PathBuf>,
    /// Directory to save the file in (default: config output.directory, then cwd)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Print the result to stdout instead of saving a file
    #[arg(long)]
    pub stdout: bool,
    /// Copy the result to the clipboard
    #[arg(long)]
    pub copy: bool,
    /// Disable progress spinners
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct CleanCliArgs {
    /// Path to a .vtt or .srt file
    pub file: PathBuf,
    /// Write the transcript to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Copy the transcript to the clipboard
    #[arg(long)]
    pub copy: bool,
}
