//! [`Storage`] backed by a host directory.
//!
//! Mirrors what the host sees when the device volume is attached over USB
//! mass storage: `<mount_point>/<name>` maps to `<root>/<name>`. Useful for
//! simulating the device and for inspecting or replacing the record.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::store::{OpenMode, Storage, StorageError};

/// Directory-backed storage.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Uses `root` as the mounted volume.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory standing in for the volume.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path for a device path. Only the final component is kept.
    pub fn host_path(&self, path: &str) -> PathBuf {
        let name = path.rsplit('/').next().unwrap_or(path);
        self.root.join(name)
    }
}

fn map_io(err: std::io::Error) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        _ => StorageError::Io(err.raw_os_error().unwrap_or(-1)),
    }
}

impl Storage for DirStorage {
    type File = File;

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<File, StorageError> {
        let host_path = self.host_path(path);
        let file = match mode {
            OpenMode::Read => File::open(host_path),
            OpenMode::Write => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(host_path),
        };
        file.map_err(map_io)
    }

    fn read(&mut self, file: &mut File, buf: &mut [u8]) -> Result<usize, StorageError> {
        file.read(buf).map_err(map_io)
    }

    fn write(&mut self, file: &mut File, buf: &[u8]) -> Result<usize, StorageError> {
        file.write(buf).map_err(map_io)
    }

    fn close(&mut self, file: File) {
        if let Err(_err) = file.sync_all() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to sync record file");
        }
    }
}
