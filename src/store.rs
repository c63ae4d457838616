//! Persistent storage of the toggle state.
//!
//! The state is kept as a one-byte record on a mounted volume: `'1'` for
//! true, `'0'` for false. [`StateStore`] performs real I/O on every call
//! through the [`Storage`] trait, which the firmware implements on top of its
//! filesystem driver.

use crate::config::{RecordPath, default_record_path};

/// Byte written for a `true` state.
pub const RECORD_TRUE: u8 = b'1';

/// Byte written for a `false` state.
pub const RECORD_FALSE: u8 = b'0';

/// How a record is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenMode {
    /// Open an existing file for reading.
    Read,

    /// Open for writing, creating the file if absent. Writes replace the
    /// previous content.
    Write,
}

/// Errors reported by a [`Storage`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The path does not exist.
    NotFound,

    /// Driver fault, carrying the driver's error code.
    Io(i32),
}

impl StorageError {
    /// Error code for logging. `NotFound` maps to `-ENOENT`.
    pub fn code(&self) -> i32 {
        match self {
            StorageError::NotFound => -2,
            StorageError::Io(code) => *code,
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::NotFound => write!(f, "no such file"),
            StorageError::Io(code) => write!(f, "storage I/O error {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

/// Trait for abstracting the mounted filesystem.
///
/// Mounting happens before the first call and is not this trait's concern.
/// Implementations must release the file in `close`, which cannot fail.
pub trait Storage {
    /// Open file handle.
    type File;

    /// Opens `path` in the given mode.
    fn open(&mut self, path: &str, mode: OpenMode) -> Result<Self::File, StorageError>;

    /// Reads into `buf`, returning the number of bytes read.
    fn read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Writes `buf`, returning the number of bytes written.
    fn write(&mut self, file: &mut Self::File, buf: &[u8]) -> Result<usize, StorageError>;

    /// Closes the file.
    fn close(&mut self, file: Self::File);
}

/// Which storage call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageOp {
    Open,
    Read,
    Write,
}

/// Errors from loading or saving the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// No record exists yet. Expected on first boot.
    NotFound,

    /// A storage call failed.
    Io {
        /// The failing call.
        op: StorageOp,
        /// Driver error code.
        code: i32,
    },

    /// The write call succeeded but stored nothing.
    ShortWrite,
}

impl StoreError {
    /// Returns true if the record simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "toggle record not found"),
            StoreError::Io { op, code } => {
                write!(f, "toggle record {:?} failed with error {}", op, code)
            }
            StoreError::ShortWrite => write!(f, "toggle record write stored no data"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}

/// Encodes a state as its record byte.
#[inline]
pub const fn encode_record(value: bool) -> u8 {
    if value { RECORD_TRUE } else { RECORD_FALSE }
}

/// Decodes a record byte. Only `'1'` is true; every other byte is false.
#[inline]
pub const fn decode_record(byte: u8) -> bool {
    byte == RECORD_TRUE
}

/// Loads and saves the toggle state record at a fixed path.
pub struct StateStore<S: Storage> {
    storage: S,
    path: RecordPath,
}

impl<S: Storage> StateStore<S> {
    /// Creates a store for the record at `path`.
    pub fn new(storage: S, path: RecordPath) -> Self {
        Self { storage, path }
    }

    /// Creates a store for the record at `/NAND:/BOOTSEL`.
    pub fn with_default_path(storage: S) -> Self {
        Self::new(storage, default_record_path())
    }

    /// Reads the record.
    ///
    /// # Returns
    /// * `Ok(value)` - `true` iff the first byte is `'1'`; an empty record reads as `false`
    /// * `Err(StoreError::NotFound)` - No record exists
    /// * `Err(StoreError::Io { .. })` - Open or read failed
    pub fn load(&mut self) -> Result<bool, StoreError> {
        let mut file = match self.storage.open(&self.path, OpenMode::Read) {
            Ok(file) => file,
            Err(StorageError::NotFound) => return Err(StoreError::NotFound),
            Err(StorageError::Io(code)) => {
                return Err(StoreError::Io {
                    op: StorageOp::Open,
                    code,
                });
            }
        };

        let mut buffer = [0u8; 1];
        let read = self.storage.read(&mut file, &mut buffer);
        self.storage.close(file);

        match read {
            Ok(_) => Ok(decode_record(buffer[0])),
            Err(err) => Err(StoreError::Io {
                op: StorageOp::Read,
                code: err.code(),
            }),
        }
    }

    /// Writes the record, replacing any previous content.
    ///
    /// Exactly one open, one write and one close are issued. Nothing is
    /// retried or rolled back on failure.
    pub fn save(&mut self, value: bool) -> Result<(), StoreError> {
        let mut file = self
            .storage
            .open(&self.path, OpenMode::Write)
            .map_err(|err| StoreError::Io {
                op: StorageOp::Open,
                code: err.code(),
            })?;

        let data = [encode_record(value)];
        let written = self.storage.write(&mut file, &data);
        self.storage.close(file);

        match written {
            Ok(0) => Err(StoreError::ShortWrite),
            Ok(_) => Ok(()),
            Err(err) => Err(StoreError::Io {
                op: StorageOp::Write,
                code: err.code(),
            }),
        }
    }

    /// Returns the record path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a reference to the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a mutable reference to the underlying storage.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consumes the store, returning the underlying storage.
    pub fn into_inner(self) -> S {
        self.storage
    }
}
