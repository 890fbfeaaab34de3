//! Codec negotiation configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use typeshare::typeshare;

use crate::codec::CodecRegistry;
use crate::error::{CodecError, Result};

/// Codec configuration
#[typeshare]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodecConfig {
    /// Allowed codec identifiers; empty allows every codec
    pub codecs: Vec<String>,
    /// Codec identifiers to disable
    pub disabled: Vec<String>,
    /// Bit rate in kbit/s for codecs that support it
    pub bit_rate: Option<u32>,
}

impl CodecConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CodecError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bit_rate == Some(0) {
            return Err(CodecError::Config("bit_rate must be positive".to_string()));
        }
        Ok(())
    }

    /// Apply enabled state to every codec kind of a registry
    ///
    /// Unknown identifiers are rejected before any codec is touched.
    pub fn apply(&self, registry: &CodecRegistry) -> Result<()> {
        self.validate()?;
        for identifier in self.codecs.iter().chain(&self.disabled) {
            if registry.get(identifier).is_none() {
                return Err(CodecError::Config(format!("Unknown codec: {}", identifier)));
            }
        }

        for entry in registry.entries() {
            let allowed = self.codecs.is_empty()
                || self
                    .codecs
                    .iter()
                    .any(|id| id.eq_ignore_ascii_case(entry.identifier()));
            let disabled = self
                .disabled
                .iter()
                .any(|id| id.eq_ignore_ascii_case(entry.identifier()));
            entry.set_enabled(allowed && !disabled);
        }

        info!(
            "Codec configuration applied: {} enabled",
            registry.entries().iter().filter(|e| e.enabled()).count()
        );
        Ok(())
    }
}
