//! # Profile File Loading
//!
//! Loads audit profiles from TOML or YAML files.
//!
//! Supports automatic format detection based on file extension.

use crate::profile::AuditProfile;
use std::path::Path;
use validator::Validate;

/// Profile file loading error.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Profile file has no extension")]
    NoExtension,

    #[error("Unsupported profile file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid profile: {0}")]
    Invalid(#[from] validator::ValidationErrors)
}

/// Load an audit profile from a TOML file.
///
/// ## Example
/// ```toml
/// [target]
/// uri_variable = "MONGODB_ATLAS_URI"
/// database = "pandal-navigator"
///
/// [[checks]]
/// name = "MONGODB_ATLAS_URI"
/// description = "MongoDB Atlas connection string"
///
/// [[checks]]
/// name = "PORT"
/// required = false
/// sensitive = false
/// ```
pub fn load_from_toml(path: &Path) -> Result<AuditProfile, ProfileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ProfileError::FileNotFound(path.display().to_string()))?;

    let profile: AuditProfile =
        toml::from_str(&contents).map_err(|e| ProfileError::TomlParse(e.to_string()))?;

    profile.validate()?;
    Ok(profile)
}

/// Load an audit profile from a YAML file.
pub fn load_from_yaml(path: &Path) -> Result<AuditProfile, ProfileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ProfileError::FileNotFound(path.display().to_string()))?;

    let profile: AuditProfile =
        serde_yaml::from_str(&contents).map_err(|e| ProfileError::YamlParse(e.to_string()))?;

    profile.validate()?;
    Ok(profile)
}

/// Load an audit profile, detecting the format from the extension.
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml` / `.yml`: YAML format
pub fn load_from_file(path: &Path) -> Result<AuditProfile, ProfileError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ProfileError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        other => Err(ProfileError::UnsupportedFormat(other.to_string()))
    }
}
