//! Decoder settings.

/// Upper bound on the decompressed header size. Real headers are a few
/// megabytes at most.
pub const DEFAULT_MAX_HEADER_SIZE: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Decompressed bytes the header may inflate to before decoding fails.
    pub max_header_size: u64,
    /// Fail with `UnmappedCode` instead of falling back to an `Unknown` label.
    pub strict_codes: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            strict_codes: false,
        }
    }
}

impl DecoderConfig {
    pub fn with_max_header_size(mut self, max_header_size: u64) -> Self {
        self.max_header_size = max_header_size;
        self
    }

    pub fn with_strict_codes(mut self, strict_codes: bool) -> Self {
        self.strict_codes = strict_codes;
        self
    }
}
