use crate::normalizer::TranscriptNormalizer;

/// Normalizer used when the raw subtitle file is requested.
///
/// The payload is handed back byte for byte so the saved file stays a valid
/// subtitle file for players and editors.
pub struct PassthroughNormalizer;

impl Default for PassthroughNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PassthroughNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptNormalizer for PassthroughNormalizer {
    fn normalize(&self, raw_captions: &str) -> String {
        raw_captions.to_string()
    }

    fn name(&self) -> &'static str {
        "PassthroughNormalizer"
    }
}
