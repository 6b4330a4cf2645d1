use anyhow::Result;
use regex::Regex;
use tracing::debug;

use crate::normalizer::TranscriptNormalizer;

/// Normalizer for WebVTT and SubRip payloads.
///
/// Strips the header block, cue timing lines, inline markup and cue indices,
/// leaving one spoken line per line of output. Both caption formats go
/// through the same ordered list of removals: the timing patterns expect the
/// header to be gone already, and blank lines are only collapsed once every
/// line-level removal has run.
pub struct CaptionTextNormalizer {
    header_regex: Regex,
    vtt_timing_regex: Regex,
    srt_timing_regex: Regex,
    markup_regex: Regex,
    cue_index_regex: Regex,
    newline_run_regex: Regex,
}

impl CaptionTextNormalizer {
    pub fn new() -> Result<Self> {
        // Leading WEBVTT line plus any metadata lines up to the first blank line.
        // Both repetitions are lazy: a header that never reaches a blank line
        // removes nothing, and a bare "WEBVTT\n\n" does not swallow the first cue.
        let header_regex = Regex::new(r"(?s)\AWEBVTT[^\n]*\n(?:.*?\n)??\n")?;

        // Matches cue timings like 00:00:01.000 --> 00:00:02.000 align:start position:0%
        let vtt_timing_regex =
            Regex::new(r"\d{1,2}:\d{2}:\d{2}\.\d{3} --> \d{1,2}:\d{2}:\d{2}\.\d{3}.*?\n")?;

        // Matches cue timings like 00:00:01,000 --> 00:00:02,000
        let srt_timing_regex =
            Regex::new(r"\d{1,2}:\d{2}:\d{2},\d{3} --> \d{1,2}:\d{2}:\d{2},\d{3}.*?\n")?;

        // <c>, </i>, <00:00:01.480> and friends; a tag never spans lines
        let markup_regex = Regex::new(r"<[^>\n]*>")?;

        let cue_index_regex = Regex::new(r"(?m)^[ \t]*\d+\s*$")?;
        let newline_run_regex = Regex::new(r"\n+")?;

        Ok(Self {
            header_regex,
            vtt_timing_regex,
            srt_timing_regex,
            markup_regex,
            cue_index_regex,
            newline_run_regex,
        })
    }
}

impl TranscriptNormalizer for CaptionTextNormalizer {
    fn normalize(&self, raw_captions: &str) -> String {
        debug!("Normalizing caption payload");

        let text = raw_captions.replace("\r\n", "\n").replace('\r', "\n");
        // A leading byte order mark would hide both the WEBVTT marker and an
        // SRT file's first cue index from the anchored patterns.
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);

        let text = self.header_regex.replace_all(&text, "");
        let text = self.vtt_timing_regex.replace_all(&text, "");
        let text = self.srt_timing_regex.replace_all(&text, "");
        let text = self.markup_regex.replace_all(&text, "");
        let text = self.cue_index_regex.replace_all(&text, "");
        let text = self.newline_run_regex.replace_all(&text, "\n");

        let result = text.trim().to_string();
        debug!(
            "Normalized {} chars to {} chars",
            raw_captions.len(),
            result.len()
        );

        result
    }

    fn name(&self) -> &'static str {
        "CaptionTextNormalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(input: &str) -> String {
        CaptionTextNormalizer::new().unwrap().normalize(input)
    }

    #[test]
    fn test_removes_webvtt_header() {
        let input = "WEBVTT\nKind: captions\nLanguage: en\n\nHello world\n";

        assert_eq!(normalize(input), "Hello world");
    }

    #[test]
    fn test_bare_header_keeps_first_cue() {
        let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:02.000 --> 00:00:03.000\nWorld\n";

        assert_eq!(normalize(input), "Hello\nWorld");
    }

    #[test]
    fn test_header_with_title_and_bom() {
        let input = "\u{FEFF}WEBVTT - Episode 1\nKind: captions\n\nHello\n";

        assert_eq!(normalize(input), "Hello");
    }

    #[test]
    fn test_srt_with_bom_drops_first_cue_index() {
        let input = "\u{FEFF}1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,000 --> 00:00:03,000\nWorld\n";

        assert_eq!(normalize(input), "Hello\nWorld");
    }

    #[test]
    fn test_marker_inside_dialogue_is_not_a_header() {
        let input = "Hello\nWEBVTT\nis a format\n\nWorld";

        assert_eq!(normalize(input), "Hello\nWEBVTT\nis a format\nWorld");
    }

    #[test]
    fn test_header_without_blank_line_is_kept() {
        let input = "WEBVTT\nKind: captions\nHello\nWorld";

        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_removes_vtt_cue_timings() {
        let input = "00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:02.000 --> 00:00:03.000\nWorld\n";

        assert_eq!(normalize(input), "Hello\nWorld");
    }

    #[test]
    fn test_removes_vtt_cue_settings_with_timing() {
        let input = "0:00:01.000 --> 0:00:02.000 align:start position:0%\nHello\n";

        assert_eq!(normalize(input), "Hello");
    }

    #[test]
    fn test_removes_srt_cues() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,000 --> 00:00:03,000\nWorld\n";

        assert_eq!(normalize(input), "Hello\nWorld");
    }

    #[test]
    fn test_mixed_timing_styles_are_both_removed() {
        let input = "00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:02,000 --> 00:00:03,000\nWorld\n";

        assert_eq!(normalize(input), "Hello\nWorld");
    }

    #[test]
    fn test_strips_markup_keeps_text() {
        assert_eq!(normalize("<b>Hello</b> <i>World</i>"), "Hello World");
    }

    #[test]
    fn test_strips_karaoke_timing_tags() {
        let input = "hello<00:00:00.480><c> everyone</c><00:00:01.120><c> welcome</c>";

        assert_eq!(normalize(input), "hello everyone welcome");
    }

    #[test]
    fn test_markup_does_not_span_lines() {
        let input = "a < b\nc > d";

        assert_eq!(normalize(input), "a < b\nc > d");
    }

    #[test]
    fn test_removes_cue_index_lines_only() {
        let input = "42\nHello\n  7  \n42 people\n";

        assert_eq!(normalize(input), "Hello\n42 people");
    }

    #[test]
    fn test_collapses_blank_runs_and_trims() {
        let input = "\n\n\nHello\n\n\n\nWorld\n\n\n";

        assert_eq!(normalize(input), "Hello\nWorld");
    }

    #[test]
    fn test_handles_crlf_line_endings() {
        let input = "WEBVTT\r\nKind: captions\r\n\r\n00:00:01.000 --> 00:00:02.000\r\nHello\r\n";

        assert_eq!(normalize(input), "Hello");
    }

    #[test]
    fn test_clean_text_is_unchanged() {
        let input = "Hello there\nGeneral Kenobi";

        assert_eq!(normalize(input), input);
    }
}
