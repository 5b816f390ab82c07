use crate::Strategy;

use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "./image.png";
pub const DEFAULT_OUTPUT: &str = "output.png";
pub const DEFAULT_LOG: &str = "crop-image.log";

/// Paths and strategy for one cropping run.
///
/// The binary always runs with `Config::default()`; the setters exist for
/// library callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// PNG file to read
    pub input: PathBuf,

    /// PNG file the cropped image is written to, replaced if present
    pub output: PathBuf,

    /// Log file, appended to and created when missing
    pub log_path: PathBuf,

    pub strategy: Strategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            log_path: PathBuf::from(DEFAULT_LOG),
            strategy: Strategy::Refined,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    pub fn set_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn set_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn set_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}
