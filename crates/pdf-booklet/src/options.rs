use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Booklet job configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub orientation: Orientation,
}

impl BookletOptions {
    pub fn new(
        input_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
        orientation: Orientation,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: output_file.into(),
            orientation,
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(BookletError::Config("No input file specified".to_string()));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(BookletError::Config("No output file specified".to_string()));
        }
        if self.output_file.file_name().is_none() {
            return Err(BookletError::Config(format!(
                "Output path {} does not name a file",
                self.output_file.display()
            )));
        }
        Ok(())
    }
}
