/// Trait for turning a downloaded caption payload into the text that gets saved
pub trait TranscriptNormalizer: Send + Sync {
    /// Normalize the raw caption payload
    fn normalize(&self, raw_captions: &str) -> String;

    /// Get the name of this normalizer for logging
    fn name(&self) -> &'static str;
}
