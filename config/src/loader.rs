//! # Environment Snapshot
//!
//! Captures the process environment, optionally merged with a dotenv file,
//! into an immutable map that the audit and the probe read from.
//!
//! Variables already present in the process environment win over values
//! from the dotenv file, matching the usual dotenv semantics. The process
//! environment itself is never modified.

use errors::EnvironmentError;
use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use tracing::debug;

/// Dotenv file looked up in the working directory when none is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Immutable name → value view of the configuration environment.
///
/// Empty values are indistinguishable from absent ones for every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>
}

impl EnvSnapshot {
    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect()
        }
    }

    /// Snapshot of the current process environment only.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let mut skipped = 0usize;
        let pairs: Vec<(String, String)> = env::vars_os()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                _ => {
                    skipped += 1;
                    None
                }
            })
            .collect();

        if skipped > 0 {
            debug!(skipped, "Ignored non-UTF-8 environment variables");
        }
        Self::from_pairs(pairs)
    }

    /// Value of `name`, or `None` when unset or empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Fill in variables from `pairs` that the snapshot does not already
    /// hold a non-empty value for.
    fn merge_missing<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>
    {
        for (key, value) in pairs {
            if !self.is_set(&key) {
                self.vars.insert(key, value);
            }
        }
    }
}

/// Capture the process environment merged with a dotenv file.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Builds the [`EnvSnapshot`] the CLI hands to the audit and the probe.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_snapshot;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let snapshot = load_snapshot(None)?;
///     println!("Atlas configured: {}", snapshot.is_set("MONGODB_ATLAS_URI"));
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// - `env_file = None`: reads `.env` from the working directory if it
///   exists; a missing file is not an error, a malformed one is.
/// - `env_file = Some(path)`: the file must exist and parse.
pub fn load_snapshot(env_file: Option<&Path>) -> Result<EnvSnapshot, EnvironmentError> {
    let mut snapshot = EnvSnapshot::from_process();

    let (path, explicit) = match env_file {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_ENV_FILE), false)
    };

    if !path.exists() {
        if explicit {
            return Err(EnvironmentError::FileNotFound {
                path: path.display().to_string()
            });
        }
        debug!("No {} file found, using process environment only", DEFAULT_ENV_FILE);
        return Ok(snapshot);
    }

    let pairs = read_env_file(path)?;
    debug!(
        path = %path.display(),
        entries = pairs.len(),
        "Loaded environment file"
    );
    snapshot.merge_missing(pairs);

    Ok(snapshot)
}

fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, EnvironmentError> {
    let display = path.display().to_string();
    let iter = dotenvy::from_path_iter(path).map_err(|e| EnvironmentError::Io {
        path: display.clone(),
        reason: e.to_string()
    })?;

    iter.map(|item| {
        item.map_err(|e| match e {
            dotenvy::Error::Io(io) => EnvironmentError::Io {
                path: display.clone(),
                reason: io.to_string()
            },
            other => EnvironmentError::Malformed {
                path: display.clone(),
                reason: other.to_string()
            }
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_treats_empty_as_unset() {
        let snapshot = EnvSnapshot::from_pairs([("A", "value"), ("B", "")]);
        assert_eq!(snapshot.get("A"), Some("value"));
        assert_eq!(snapshot.get("B"), None);
        assert_eq!(snapshot.get("C"), None);
        assert!(!snapshot.is_set("B"));
    }

    #[test]
    fn test_merge_missing_keeps_existing_values() {
        let mut snapshot = EnvSnapshot::from_pairs([("A", "process"), ("B", "")]);
        snapshot.merge_missing(vec![
            ("A".to_string(), "file".to_string()),
            ("B".to_string(), "file".to_string()),
            ("C".to_string(), "file".to_string())
        ]);
        assert_eq!(snapshot.get("A"), Some("process"));
        assert_eq!(snapshot.get("B"), Some("file"));
        assert_eq!(snapshot.get("C"), Some("file"));
    }

    #[test]
    #[serial]
    fn test_load_snapshot_reads_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PANDAL_TEST_FROM_FILE=from-file").unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "PANDAL_TEST_QUOTED=\"quoted value\"").unwrap();

        let snapshot = load_snapshot(Some(file.path())).unwrap();
        assert_eq!(snapshot.get("PANDAL_TEST_FROM_FILE"), Some("from-file"));
        assert_eq!(snapshot.get("PANDAL_TEST_QUOTED"), Some("quoted value"));
        assert!(std::env::var("PANDAL_TEST_FROM_FILE").is_err());
    }

    #[test]
    #[serial]
    fn test_process_environment_wins_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PANDAL_TEST_PRECEDENCE=from-file").unwrap();

        unsafe {
            env::set_var("PANDAL_TEST_PRECEDENCE", "from-process");
        }
        let snapshot = load_snapshot(Some(file.path())).unwrap();
        unsafe {
            env::remove_var("PANDAL_TEST_PRECEDENCE");
        }

        assert_eq!(snapshot.get("PANDAL_TEST_PRECEDENCE"), Some("from-process"));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_load_snapshot_skips_non_utf8_variables() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let garbled = OsStr::from_bytes(&[0x66, 0xff, 0x6f]);
        unsafe {
            env::set_var("PANDAL_TEST_NON_UTF8", garbled);
            env::set_var("PANDAL_TEST_UTF8", "readable");
        }
        let result = std::panic::catch_unwind(|| load_snapshot(None));
        unsafe {
            env::remove_var("PANDAL_TEST_NON_UTF8");
            env::remove_var("PANDAL_TEST_UTF8");
        }

        let snapshot = result
            .expect("non-UTF-8 variable must not abort the snapshot")
            .unwrap();
        assert_eq!(snapshot.get("PANDAL_TEST_NON_UTF8"), None);
        assert_eq!(snapshot.get("PANDAL_TEST_UTF8"), Some("readable"));
    }

    #[test]
    fn test_load_snapshot_missing_explicit_file() {
        let result = load_snapshot(Some(Path::new("/tmp/nonexistent_pandal_test.env")));
        assert!(matches!(result, Err(EnvironmentError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_snapshot_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "NOT A VALID LINE").unwrap();

        let result = load_snapshot(Some(file.path()));
        assert!(matches!(result, Err(EnvironmentError::Malformed { .. })));
    }
}
