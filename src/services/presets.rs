use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::error::ValidationError;
use crate::models::PreferenceProfile;

/// Presets compiled into the binary, used when no catalog path is configured
const BUILTIN_PRESETS: &str = include_str!("../../config/presets.toml");

/// Errors that can occur loading or reading the preset catalog
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Preset {name} is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error("Preset {0} is defined more than once")]
    DuplicateName(String),

    #[error("Preset catalog is empty")]
    Empty,

    #[error("Preset not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default)]
    preset: Vec<PresetEntry>,
}

#[derive(Debug, Deserialize)]
struct PresetEntry {
    name: String,
    profile: PreferenceProfile,
}

/// Named, validated preference profiles in sorted name order
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: BTreeMap<String, PreferenceProfile>,
}

impl PresetCatalog {
    /// Catalog shipped with the service
    pub fn builtin() -> Result<Self, PresetError> {
        Self::from_toml_str(BUILTIN_PRESETS)
    }

    /// Load a catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PresetError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded {} presets from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Parse a catalog; every preset must be a complete profile
    pub fn from_toml_str(contents: &str) -> Result<Self, PresetError> {
        let file: PresetFile = toml::from_str(contents)?;

        let mut presets = BTreeMap::new();
        for entry in file.preset {
            entry.profile.validate().map_err(|source| PresetError::Invalid {
                name: entry.name.clone(),
                source,
            })?;
            if presets.contains_key(&entry.name) {
                return Err(PresetError::DuplicateName(entry.name));
            }
            presets.insert(entry.name, entry.profile);
        }

        if presets.is_empty() {
            return Err(PresetError::Empty);
        }
        Ok(Self { presets })
    }

    pub fn names(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&PreferenceProfile, PresetError> {
        self.presets
            .get(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Preset that seeds new sessions
    pub fn first(&self) -> Option<&PreferenceProfile> {
        self.presets.values().next()
    }
}
