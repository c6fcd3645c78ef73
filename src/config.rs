use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    pub imem_words: usize, // instruction memory of the target CPU
    /// Reject immediates/targets outside 0..=15 instead of wrapping them.
    pub strict_ranges: bool,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            imem_words: 16,
            strict_ranges: false,
        }
    }
}
