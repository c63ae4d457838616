//! Runtime configuration for the toggle core.
//!
//! Defaults match the device layout: the record lives at `/NAND:/BOOTSEL`
//! and button presses closer than 500 ms to the last accepted press are
//! treated as bounce.

use heapless::String;

/// Mount point of the storage volume that holds the record.
pub const DEFAULT_MOUNT_POINT: &str = "/NAND:";

/// File name of the record under the mount point.
pub const DEFAULT_FILE_NAME: &str = "BOOTSEL";

/// Minimum time between two accepted presses, in milliseconds.
pub const DEFAULT_QUIET_INTERVAL_MS: u64 = 500;

/// Maximum length of a full record path.
pub const RECORD_PATH_CAPACITY: usize = 64;

/// Absolute path of the persisted record.
pub type RecordPath = String<RECORD_PATH_CAPACITY>;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Mount point plus file name do not fit in [`RECORD_PATH_CAPACITY`].
    PathTooLong,

    /// No file name given.
    EmptyFileName,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::PathTooLong => {
                write!(f, "record path exceeds {} bytes", RECORD_PATH_CAPACITY)
            }
            ConfigError::EmptyFileName => {
                write!(f, "record file name must not be empty")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Where the record lives and how aggressively presses are debounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleConfig<'a> {
    /// Mount point of the volume, without a trailing slash.
    pub mount_point: &'a str,

    /// Record file name.
    pub file_name: &'a str,

    /// Debounce quiet interval in milliseconds.
    pub quiet_interval_ms: u64,
}

impl Default for ToggleConfig<'static> {
    fn default() -> Self {
        Self {
            mount_point: DEFAULT_MOUNT_POINT,
            file_name: DEFAULT_FILE_NAME,
            quiet_interval_ms: DEFAULT_QUIET_INTERVAL_MS,
        }
    }
}

impl<'a> ToggleConfig<'a> {
    /// Builds the full record path, `<mount_point>/<file_name>`.
    pub fn record_path(&self) -> Result<RecordPath, ConfigError> {
        if self.file_name.is_empty() {
            return Err(ConfigError::EmptyFileName);
        }

        let mut path = RecordPath::new();
        path.push_str(self.mount_point.trim_end_matches('/'))
            .map_err(|_| ConfigError::PathTooLong)?;
        path.push('/').map_err(|_| ConfigError::PathTooLong)?;
        path.push_str(self.file_name)
            .map_err(|_| ConfigError::PathTooLong)?;
        Ok(path)
    }
}

/// The default record path, `/NAND:/BOOTSEL`.
pub fn default_record_path() -> RecordPath {
    let mut path = RecordPath::new();
    // Both constants together are far below the capacity.
    let _ = path.push_str(DEFAULT_MOUNT_POINT);
    let _ = path.push('/');
    let _ = path.push_str(DEFAULT_FILE_NAME);
    path
}
