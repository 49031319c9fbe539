use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for compressing a document file.
///
/// Missing fields fall back to [`DriverConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Document to read
    pub input_path: PathBuf,
    /// Report to write; replaced on every run
    pub output_path: PathBuf,
    /// How many encoded bits to show in the per-block log preview
    pub preview_chars: usize,
    /// Whether to log the descending frequency listing of each block
    pub log_frequencies: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/input.dat"),
            output_path: PathBuf::from("data/output.dat"),
            preview_chars: 100,
            log_frequencies: true,
        }
    }
}

impl DriverConfig {
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn with_log_frequencies(mut self, log_frequencies: bool) -> Self {
        self.log_frequencies = log_frequencies;
        self
    }
}
