use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};
use which::which;

use crate::config::ExtractorConfig;
use crate::extractor::{DownloadRequest, ExtractorError, SubtitleExtractor, VideoInfo};

/// Base name yt-dlp writes subtitles under; it appends `.<lang>.<ext>`.
const OUTPUT_STEM: &str = "downloaded_sub";

/// Runs the yt-dlp executable as a subprocess.
/// - Metadata comes from `-J` (single JSON document on stdout)
/// - Subtitles are written into a caller-owned directory
/// - Each invocation is killed once the timeout elapses
pub struct YtDlpExtractor {
    program: String,
    leading_args: Vec<String>,
    cookies_file: Option<PathBuf>,
    sub_format: String,
    timeout: Duration,
}

impl YtDlpExtractor {
    /// Build an extractor from config; `cookies_override` wins over `cookies_file`.
    pub fn from_config(config: &ExtractorConfig, cookies_override: Option<&Path>) -> Result<Self> {
        let (program, leading_args) = match config.command.split_first() {
            Some((program, rest)) if !program.trim().is_empty() => {
                (program.clone(), rest.to_vec())
            }
            _ => bail!("extractor.command is empty; expected e.g. [\"yt-dlp\"]"),
        };

        let cookies_file = cookies_override
            .map(Path::to_path_buf)
            .or_else(|| config.cookies_file.clone());

        if let Some(path) = &cookies_file {
            if !path.is_file() {
                bail!("Cookies file not found: {}", path.display());
            }
            info!("Using cookies from {}", path.display());
        }

        Ok(Self {
            program,
            leading_args,
            cookies_file,
            sub_format: config.sub_format.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    fn cookie_args(&self) -> Vec<String> {
        match &self.cookies_file {
            Some(path) => vec!["--cookies".to_string(), path.to_string_lossy().into_owned()],
            None => Vec::new(),
        }
    }

    fn info_args(&self, url: &str) -> Vec<String> {
        let mut args: Vec<String> = ["-J", "--skip-download", "--no-playlist", "--no-warnings"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        args.extend(self.cookie_args());
        args.push(url.to_string());
        args
    }

    fn download_args(&self, request: &DownloadRequest<'_>, dest_dir: &Path) -> Vec<String> {
        let write_flag = if request.track.kind.is_auto() {
            "--write-auto-subs"
        } else {
            "--write-subs"
        };

        let mut args: Vec<String> = vec![
            "--skip-download".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            write_flag.to_string(),
            "--sub-langs".to_string(),
            request.track.code.clone(),
            "--sub-format".to_string(),
            self.sub_format.clone(),
        ];
        if request.convert_to_srt {
            args.push("--convert-subs".to_string());
            args.push("srt".to_string());
        }
        args.extend(self.cookie_args());
        args.push("-o".to_string());
        args.push(dest_dir.join(OUTPUT_STEM).to_string_lossy().into_owned());
        args.push(request.url.to_string());
        args
    }

    async fn run(&self, args: &[String]) -> Result<Vec<u8>, ExtractorError> {
        let program =
            which(&self.program).map_err(|_| ExtractorError::NotInstalled(self.program.clone()))?;

        debug!("Running {} {:?} {:?}", self.program, self.leading_args, args);

        let child = Command::new(&program)
            .args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExtractorError::ExtractionFailed(format!("failed to start {}: {}", self.program, e))
            })?;

        // kill_on_drop reaps the child if the timeout wins
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ExtractorError::ExtractionFailed(format!(
                    "{} did not complete: {}",
                    self.program, e
                )))
            }
            Err(_) => {
                return Err(ExtractorError::ExtractionFailed(format!(
                    "{} timed out after {}s",
                    self.program,
                    self.timeout.as_secs()
                )))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} exited with {}", self.program, output.status));
            return Err(ExtractorError::ExtractionFailed(message));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl SubtitleExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn fetch_info(&self, url: &str) -> Result<VideoInfo, ExtractorError> {
        info!("Fetching video metadata for {}", url);
        let stdout = self.run(&self.info_args(url)).await?;

        serde_json::from_slice(&stdout).map_err(|e| {
            ExtractorError::ExtractionFailed(format!("failed to parse yt-dlp metadata: {}", e))
        })
    }

    async fn download_subtitle(
        &self,
        request: &DownloadRequest<'_>,
        dest_dir: &Path,
    ) -> Result<(), ExtractorError> {
        info!(
            "Downloading {} subtitles ({}) for {}",
            request.track.code,
            request.track.kind.label(),
            request.url
        );
        self.run(&self.download_args(request, dest_dir)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{SubtitleTrack, TrackKind};
    use tempfile::TempDir;

    fn config_for(command: Vec<String>) -> ExtractorConfig {
        ExtractorConfig {
            command,
            ..ExtractorConfig::default()
        }
    }

    fn track(code: &str, kind: TrackKind) -> SubtitleTrack {
        SubtitleTrack {
            code: code.to_string(),
            name: code.to_string(),
            kind,
        }
    }

    /// Extractor that runs `sh <script>` in place of yt-dlp.
    fn fake_extractor(dir: &TempDir, script: &str, timeout_seconds: u64) -> YtDlpExtractor {
        let script_path = dir.path().join("fake-yt-dlp.sh");
        std::fs::write(&script_path, script).unwrap();

        let mut config = config_for(vec![
            "sh".to_string(),
            script_path.to_string_lossy().into_owned(),
        ]);
        config.timeout_seconds = timeout_seconds;
        YtDlpExtractor::from_config(&config, None).unwrap()
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(YtDlpExtractor::from_config(&config_for(Vec::new()), None).is_err());
        assert!(YtDlpExtractor::from_config(&config_for(vec![" ".to_string()]), None).is_err());
    }

    #[test]
    fn test_missing_cookies_file_is_rejected() {
        let result = YtDlpExtractor::from_config(
            &ExtractorConfig::default(),
            Some(Path::new("/nonexistent/cookies.txt")),
        );

        let err = result.err().unwrap();
        assert!(err.to_string().contains("Cookies file not found"));
    }

    #[test]
    fn test_info_args() {
        let extractor = YtDlpExtractor::from_config(&ExtractorConfig::default(), None).unwrap();

        assert_eq!(
            extractor.info_args("https://youtu.be/abc"),
            vec![
                "-J",
                "--skip-download",
                "--no-playlist",
                "--no-warnings",
                "https://youtu.be/abc"
            ]
        );
    }

    #[test]
    fn test_info_args_with_cookies() {
        let cookies = tempfile::NamedTempFile::new().unwrap();
        let extractor =
            YtDlpExtractor::from_config(&ExtractorConfig::default(), Some(cookies.path())).unwrap();

        let args = extractor.info_args("https://youtu.be/abc");
        let pos = args.iter().position(|a| a == "--cookies").unwrap();
        assert_eq!(args[pos + 1], cookies.path().to_string_lossy());
        assert_eq!(args.last().unwrap(), "https://youtu.be/abc");
    }

    #[test]
    fn test_download_args_manual_raw() {
        let extractor = YtDlpExtractor::from_config(&ExtractorConfig::default(), None).unwrap();
        let track = track("en", TrackKind::Manual);
        let request = DownloadRequest {
            url: "https://youtu.be/abc",
            track: &track,
            convert_to_srt: true,
        };

        let args = extractor.download_args(&request, Path::new("/tmp/subs"));

        assert!(args.contains(&"--write-subs".to_string()));
        assert!(!args.contains(&"--write-auto-subs".to_string()));
        assert!(args.windows(2).any(|w| w == ["--sub-langs", "en"]));
        assert!(args.windows(2).any(|w| w == ["--convert-subs", "srt"]));
        assert!(args.windows(2).any(|w| w == ["-o", "/tmp/subs/downloaded_sub"]));
    }

    #[test]
    fn test_download_args_auto_clean() {
        let extractor = YtDlpExtractor::from_config(&ExtractorConfig::default(), None).unwrap();
        let track = track("en-orig", TrackKind::Auto);
        let request = DownloadRequest {
            url: "https://youtu.be/abc",
            track: &track,
            convert_to_srt: false,
        };

        let args = extractor.download_args(&request, Path::new("/tmp/subs"));

        assert!(args.contains(&"--write-auto-subs".to_string()));
        assert!(!args.contains(&"--convert-subs".to_string()));
        assert!(args.windows(2).any(|w| w == ["--sub-format", "vtt/srt/best"]));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_info_parses_stdout() {
        let dir = TempDir::new().unwrap();
        let script = "cat <<'JSON'\n{\"title\": \"Demo\", \"subtitles\": {\"en\": [{\"ext\": \"vtt\", \"name\": \"English\"}]}}\nJSON\n";
        let extractor = fake_extractor(&dir, script, 30);

        let info = extractor.fetch_info("https://youtu.be/abc").await.unwrap();

        assert_eq!(info.display_title(), "Demo");
        assert_eq!(info.tracks().len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_info_reports_last_stderr_line() {
        let dir = TempDir::new().unwrap();
        let script = "echo 'WARNING: something' >&2\necho 'ERROR: [youtube] abc: Video unavailable' >&2\nexit 1\n";
        let extractor = fake_extractor(&dir, script, 30);

        let err = extractor.fetch_info("https://youtu.be/abc").await.unwrap_err();

        match err {
            ExtractorError::ExtractionFailed(message) => {
                assert_eq!(message, "ERROR: [youtube] abc: Video unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_info_invalid_json() {
        let dir = TempDir::new().unwrap();
        let extractor = fake_extractor(&dir, "echo 'not json'\n", 30);

        let err = extractor.fetch_info("https://youtu.be/abc").await.unwrap_err();

        assert!(matches!(err, ExtractorError::ExtractionFailed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let dir = TempDir::new().unwrap();
        let extractor = fake_extractor(&dir, "sleep 5\n", 1);

        let err = extractor.fetch_info("https://youtu.be/abc").await.unwrap_err();

        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_missing_program_is_not_installed() {
        let extractor = YtDlpExtractor::from_config(
            &config_for(vec!["subpro-definitely-missing-binary".to_string()]),
            None,
        )
        .unwrap();

        let err = extractor.fetch_info("https://youtu.be/abc").await.unwrap_err();

        assert!(matches!(err, ExtractorError::NotInstalled(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_writes_into_directory() {
        let dir = TempDir::new().unwrap();
        let script = r#"out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; fi
  shift
done
printf 'WEBVTT\n\nHello\n' > "$out.en.vtt"
"#;
        let extractor = fake_extractor(&dir, script, 30);
        let dest = TempDir::new().unwrap();
        let track = track("en", TrackKind::Manual);
        let request = DownloadRequest {
            url: "https://youtu.be/abc",
            track: &track,
            convert_to_srt: false,
        };

        extractor.download_subtitle(&request, dest.path()).await.unwrap();

        let written = dest.path().join("downloaded_sub.en.vtt");
        assert_eq!(std::fs::read_to_string(written).unwrap(), "WEBVTT\n\nHello\n");
    }
}
