//! # Settings Cache
//!
//! The only thing Drillsheet persists is the last-used
//! [`WorksheetSettings`]. Problems are never written to disk; a worksheet
//! is regenerated from its settings.
//!
//! - **Atomic saves**: JSON goes to `<file>.tmp`, is synced, then renamed
//!   over the target.
//! - **Lock file**: [`SettingsLock`] holds an OS lock and writes a
//!   `<file>.lock` with the holder's details so two front ends do not
//!   interleave writes.
//! - **Versioned envelope**: `{ "version", "saved_at", "settings" }`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use drill_core::file_io::{load_settings, save_settings, SettingsLock};
//! use drill_core::settings::WorksheetSettings;
//! use std::path::Path;
//!
//! let path = Path::new("drillsheet.json");
//! let lock = SettingsLock::acquire(path)?;
//! save_settings(&WorksheetSettings::default(), path)?;
//! drop(lock);
//!
//! let settings = load_settings(path)?;
//! assert_eq!(settings.problem_count, 20);
//! # Ok::<(), drill_core::errors::DrillError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{DrillError, DrillResult};
use crate::settings::WorksheetSettings;

/// Schema version written into every settings file
pub const SETTINGS_SCHEMA_VERSION: &str = "0.1.0";

/// Hours after which an abandoned lock file is ignored
const STALE_LOCK_HOURS: i64 = 24;

/// On-disk envelope around the settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub settings: WorksheetSettings,
}

impl SettingsFile {
    pub fn new(settings: WorksheetSettings) -> Self {
        SettingsFile {
            version: SETTINGS_SCHEMA_VERSION.to_string(),
            saved_at: Utc::now(),
            settings,
        }
    }
}

/// Contents of a `.lock` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    pub user: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    fn current() -> Self {
        LockInfo {
            user: env_first(&["USER", "USERNAME"]).unwrap_or_else(|| "unknown".to_string()),
            machine: machine_name(),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Whether the holder is gone or the lock is too old to trust.
    fn is_stale(&self) -> bool {
        self.is_stale_on(&machine_name())
    }

    /// Staleness as seen from `machine`. Liveness of the pid is only known
    /// when the lock was written on the same machine.
    fn is_stale_on(&self, machine: &str) -> bool {
        if Utc::now() - self.locked_at > chrono::Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        if self.machine != machine {
            return false;
        }
        !process_alive(self.pid)
    }
}

fn env_first(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| std::env::var(key).ok())
}

/// Host name as recorded in lock files; "unknown" when no variable is set.
fn machine_name() -> String {
    env_first(&["HOSTNAME", "HOST", "COMPUTERNAME"]).unwrap_or_else(|| "unknown".to_string())
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Sibling path with `suffix` appended to the file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn lock_path_for(path: &Path) -> PathBuf {
    sibling(path, ".lock")
}

fn read_lock_info(lock_path: &Path) -> DrillResult<LockInfo> {
    let contents = fs::read_to_string(lock_path).map_err(|e| {
        DrillError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;
    serde_json::from_str(&contents).map_err(DrillError::serialization)
}

/// Exclusive hold on a settings file; released on drop.
#[derive(Debug)]
pub struct SettingsLock {
    lock_path: PathBuf,
    _handle: File,
    pub info: LockInfo,
}

impl SettingsLock {
    /// Take the lock, failing with [`DrillError::FileLocked`] if a live
    /// holder exists.
    pub fn acquire(path: &Path) -> DrillResult<Self> {
        let lock_path = lock_path_for(path);

        if let Some(holder) = Self::check(path) {
            return Err(DrillError::file_locked(
                path.display().to_string(),
                format!("{} ({}, pid {})", holder.user, holder.machine, holder.pid),
                holder.locked_at.to_rfc3339(),
            ));
        }

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                DrillError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        handle.try_lock_exclusive().map_err(|_| {
            DrillError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let info = LockInfo::current();
        let json = serde_json::to_string_pretty(&info).map_err(DrillError::serialization)?;
        handle
            .write_all(json.as_bytes())
            .and_then(|_| handle.sync_all())
            .map_err(|e| {
                DrillError::file_error("write lock", lock_path.display().to_string(), e.to_string())
            })?;

        debug!(path = %lock_path.display(), pid = info.pid, "Settings lock acquired");
        Ok(SettingsLock {
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Current live holder of the lock, if any.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        match read_lock_info(&lock_path) {
            Ok(info) if !info.is_stale() => Some(info),
            Ok(info) => {
                warn!(path = %lock_path.display(), holder = %info.user, "Ignoring stale settings lock");
                None
            }
            Err(_) => None,
        }
    }
}

impl Drop for SettingsLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Write settings atomically.
pub fn save_settings(settings: &WorksheetSettings, path: &Path) -> DrillResult<()> {
    let envelope = SettingsFile::new(settings.clone());
    let json = serde_json::to_string_pretty(&envelope).map_err(DrillError::serialization)?;

    let tmp_path = sibling(path, ".tmp");
    let mut tmp = File::create(&tmp_path).map_err(|e| {
        DrillError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.sync_all())
        .map_err(|e| {
            DrillError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DrillError::file_error("rename", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), "Settings saved");
    Ok(())
}

/// Read and validate a settings file.
pub fn load_settings(path: &Path) -> DrillResult<WorksheetSettings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| DrillError::file_error("read", path.display().to_string(), e.to_string()))?;
    let envelope: SettingsFile = serde_json::from_str(&contents).map_err(|e| {
        DrillError::serialization(format!("Invalid settings file {}: {}", path.display(), e))
    })?;
    validate_version(&envelope.version)?;
    envelope.settings.validate()?;
    debug!(path = %path.display(), saved_at = %envelope.saved_at, "Settings loaded");
    Ok(envelope.settings)
}

/// Load settings, or defaults when the file does not exist yet.
pub fn load_settings_or_default(path: &Path) -> DrillResult<WorksheetSettings> {
    if path.exists() {
        load_settings(path)
    } else {
        debug!(path = %path.display(), "No settings file; using defaults");
        Ok(WorksheetSettings::default())
    }
}

/// Accept files from the same major version; in 0.x the minor must not be
/// newer than ours.
fn validate_version(file_version: &str) -> DrillResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let theirs = parse(file_version);
    let ours = parse(SETTINGS_SCHEMA_VERSION);
    let mismatch = || DrillError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SETTINGS_SCHEMA_VERSION.to_string(),
    };

    match (theirs.as_slice(), ours.as_slice()) {
        ([their_major, ..], [our_major, ..]) if their_major != our_major => Err(mismatch()),
        ([0, their_minor, ..], [0, our_minor, ..]) if their_minor > our_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;
    use crate::pattern::CalculationPattern;
    use crate::problem::ProblemType;
    use std::env::temp_dir;

    fn temp_settings_path(name: &str) -> PathBuf {
        temp_dir().join(format!("drillsheet_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_sibling_paths() {
        let path = Path::new("/tmp/drillsheet.json");
        assert_eq!(lock_path_for(path), Path::new("/tmp/drillsheet.json.lock"));
        assert_eq!(sibling(path, ".tmp"), Path::new("/tmp/drillsheet.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_settings_path("roundtrip");
        let settings = WorksheetSettings {
            grade: Grade::new(5).unwrap(),
            problem_type: ProblemType::WordEn,
            calculation_pattern: Some(CalculationPattern::SpeedTime),
            problem_count: 8,
            title: Some("Speed practice".to_string()),
            ..Default::default()
        };
        save_settings(&settings, &path).unwrap();
        assert!(!sibling(&path, ".tmp").exists());

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_settings_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(load_settings_or_default(&path).unwrap(), WorksheetSettings::default());
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_unknown_pattern_loads_as_none() {
        let path = temp_settings_path("unknown_pattern");
        let json = r#"{
            "version": "0.1.0",
            "saved_at": "2025-04-01T09:00:00Z",
            "settings": {
                "grade": 2,
                "problem_type": "basic",
                "operation": "subtraction",
                "calculation_pattern": "long-division-deluxe",
                "problem_count": 10
            }
        }"#;
        fs::write(&path, json).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.calculation_pattern, None);
        assert_eq!(loaded.problem_count, 10);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let path = temp_settings_path("bad_json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_acquire_and_release() {
        let path = temp_settings_path("lock");
        let lock = SettingsLock::acquire(&path).unwrap();
        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());
        assert_eq!(lock.info.pid, std::process::id());

        drop(lock);
        assert!(!lock_path.exists());
        assert!(SettingsLock::check(&path).is_none());
    }

    #[test]
    fn test_stale_lock_is_ignored() {
        let path = temp_settings_path("stale");
        let old = LockInfo {
            user: "someone".into(),
            machine: "elsewhere".into(),
            pid: 1,
            locked_at: Utc::now() - chrono::Duration::hours(48),
        };
        fs::write(lock_path_for(&path), serde_json::to_string(&old).unwrap()).unwrap();
        assert!(SettingsLock::check(&path).is_none());
        let lock = SettingsLock::acquire(&path).unwrap();
        drop(lock);
    }

    #[cfg(unix)]
    fn dead_pid() -> u32 {
        (4_000_000..4_100_000)
            .find(|pid| !process_alive(*pid))
            .unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_dead_holder_on_this_machine_is_stale() {
        let path = temp_settings_path("dead_holder");
        let orphan = LockInfo {
            user: "someone".into(),
            machine: machine_name(),
            pid: dead_pid(),
            locked_at: Utc::now(),
        };
        fs::write(lock_path_for(&path), serde_json::to_string(&orphan).unwrap()).unwrap();
        assert!(SettingsLock::check(&path).is_none());
        let lock = SettingsLock::acquire(&path).unwrap();
        drop(lock);
    }

    #[cfg(unix)]
    #[test]
    fn test_unnamed_host_lock_checks_the_pid() {
        let orphan = LockInfo {
            user: "someone".into(),
            machine: "unknown".into(),
            pid: dead_pid(),
            locked_at: Utc::now(),
        };
        assert!(orphan.is_stale_on("unknown"));

        let live = LockInfo {
            pid: std::process::id(),
            ..orphan.clone()
        };
        assert!(!live.is_stale_on("unknown"));
        assert!(!orphan.is_stale_on("build-host"));
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SETTINGS_SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.9").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
