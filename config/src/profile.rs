//! # Audit Profile
//!
//! Describes which environment variables the migration audit inspects and
//! which of them is the connection string for the migration target.
//!
//! All profile structures:
//! - Use `serde` for deserialization from TOML/YAML profile files
//! - Use `validator` for input validation
//! - Default to the built-in Pandal Navigator profile

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

/// Connection-string variable for the MongoDB Atlas cluster.
pub const ATLAS_URI_VAR: &str = "MONGODB_ATLAS_URI";

/// Connection-string variable for the database currently in use.
pub const LEGACY_URI_VAR: &str = "MONGODB_URI";

/// Maps API key used by the pandal locator.
pub const MAPS_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Clerk backend secret used for sign-in.
pub const AUTH_SECRET_VAR: &str = "CLERK_SECRET_KEY";

/// Scheme expected for Atlas SRV connection strings.
pub const ATLAS_SCHEME: &str = "mongodb+srv://";

/// Database the application data is migrated into.
pub const TARGET_DATABASE: &str = "pandal-navigator";

/// Setup guide referenced when configuration is incomplete.
pub const SETUP_GUIDE: &str = "ATLAS_SETUP.md";

/// Complete audit profile.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Lists the checks to run (in display order) and the migration target used
/// by the connection-string checks and the connectivity probe.
///
/// ## Usage
/// ```rust,no_run
/// use config::AuditProfile;
///
/// let profile = AuditProfile::default();
/// assert_eq!(profile.checks.len(), 4);
/// println!("Target variable: {}", profile.target.uri_variable);
/// ```
///
/// ## Validation Rules
/// - `checks`: at least one entry, names unique
/// - `target.uri_variable` must be listed as a required check
/// - every check and the target must validate on their own
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_checks"))]
pub struct AuditProfile {
    /// Migration target settings
    #[serde(default)]
    #[validate(nested)]
    pub target: MigrationTarget,

    /// Checks in display order
    #[serde(default = "default_checks")]
    #[validate(length(min = 1), nested)]
    pub checks: Vec<CheckDefinition>
}

impl Default for AuditProfile {
    fn default() -> Self {
        Self {
            target: MigrationTarget::default(),
            checks: default_checks()
        }
    }
}

impl AuditProfile {
    /// Definition of the check named by `target.uri_variable`, if listed.
    pub fn target_check(&self) -> Option<&CheckDefinition> {
        self.checks
            .iter()
            .find(|c| c.name == self.target.uri_variable)
    }
}

fn validate_checks(profile: &AuditProfile) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for check in &profile.checks {
        if !seen.insert(check.name.as_str()) {
            let mut err = ValidationError::new("duplicate_check");
            err.message = Some(format!("check '{}' is listed more than once", check.name).into());
            return Err(err);
        }
    }

    match profile.target_check() {
        Some(check) if check.required => Ok(()),
        Some(_) => {
            let mut err = ValidationError::new("optional_target_check");
            err.message = Some(
                format!("target variable '{}' must be a required check", profile.target.uri_variable)
                    .into()
            );
            Err(err)
        }
        None => {
            let mut err = ValidationError::new("missing_target_check");
            err.message = Some(
                format!("target variable '{}' is not listed in checks", profile.target.uri_variable)
                    .into()
            );
            Err(err)
        }
    }
}

/// A single environment-variable check.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct CheckDefinition {
    /// Environment variable name
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Whether absence blocks the migration
    #[serde(default = "default_true")]
    pub required: bool,

    /// Whether the value may only be shown as a redacted preview
    #[serde(default = "default_true")]
    pub sensitive: bool,

    /// Human-readable label
    #[serde(default)]
    pub description: String
}

impl CheckDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            sensitive: true,
            description: description.into()
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn public(mut self) -> Self {
        self.sensitive = false;
        self
    }
}

/// Migration target configuration.
///
/// ## Fields
/// - `uri_variable`: variable holding the target connection string
///   (default: "MONGODB_ATLAS_URI")
/// - `scheme`: expected connection-string scheme (default: "mongodb+srv://")
/// - `database`: database name the string must reference (default:
///   "pandal-navigator")
/// - `setup_guide`: document to point operators at (default:
///   "ATLAS_SETUP.md")
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct MigrationTarget {
    #[serde(default = "default_uri_variable")]
    #[validate(length(min = 1, max = 255))]
    pub uri_variable: String,

    #[serde(default = "default_scheme")]
    #[validate(length(min = 1))]
    pub scheme: String,

    #[serde(default = "default_database")]
    #[validate(length(min = 1, max = 63))]
    pub database: String,

    #[serde(default = "default_setup_guide")]
    #[validate(length(min = 1))]
    pub setup_guide: String
}

impl Default for MigrationTarget {
    fn default() -> Self {
        Self {
            uri_variable: default_uri_variable(),
            scheme: default_scheme(),
            database: default_database(),
            setup_guide: default_setup_guide()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_uri_variable() -> String {
    ATLAS_URI_VAR.to_string()
}

fn default_scheme() -> String {
    ATLAS_SCHEME.to_string()
}

fn default_database() -> String {
    TARGET_DATABASE.to_string()
}

fn default_setup_guide() -> String {
    SETUP_GUIDE.to_string()
}

fn default_checks() -> Vec<CheckDefinition> {
    vec![
        CheckDefinition::new(ATLAS_URI_VAR, "MongoDB Atlas connection string"),
        CheckDefinition::new(LEGACY_URI_VAR, "Current MongoDB connection string"),
        CheckDefinition::new(MAPS_KEY_VAR, "Google Maps API key"),
        CheckDefinition::new(AUTH_SECRET_VAR, "Clerk secret key")
    ]
}
