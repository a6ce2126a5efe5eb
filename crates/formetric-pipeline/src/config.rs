//! Pipeline configuration.

use std::path::PathBuf;

use formetric_agents::AgentConfig;
use serde::{Deserialize, Serialize};

/// Complete pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Reference library settings
    pub library: LibraryConfig,

    /// Narrative agent settings
    pub narrative: NarrativeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Directory of JSON reference entries
    pub reference_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Whether completed runs get coach feedback attached
    pub enabled: bool,

    /// Agent generation settings
    pub agent: AgentConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            library: LibraryConfig {
                reference_dir: PathBuf::from("references"),
            },
            narrative: NarrativeConfig {
                enabled: true,
                agent: AgentConfig::default(),
            },
        }
    }
}

impl PipelineConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("FORMETRIC"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("FORMETRIC"))
            .build()?;

        settings.try_deserialize()
    }
}
