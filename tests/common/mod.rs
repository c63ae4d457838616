//! Shared test infrastructure for bootsel-toggle integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use bootsel_toggle::{
    Bringup, HardwareError, IndicatorOutput, LedId, OpenMode, Storage, StorageError,
    TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Storage
// ============================================================================

pub const RECORD_PATH: &str = "/NAND:/BOOTSEL";

/// Handle returned by [`MockStorage::open`]
#[derive(Debug)]
pub struct MockFile {
    mode: OpenMode,
    pos: usize,
}

/// In-memory volume holding at most one record at [`RECORD_PATH`]
pub struct MockStorage {
    record: Option<heapless::Vec<u8, 16>>,
    pub fail_open: Option<i32>,
    pub fail_read: Option<i32>,
    pub fail_write: Option<i32>,
    pub short_write: bool,
    pub opens: usize,
    pub reads: usize,
    pub writes: usize,
    pub closes: usize,
}

impl MockStorage {
    /// Empty volume, no record
    pub fn new() -> Self {
        Self {
            record: None,
            fail_open: None,
            fail_read: None,
            fail_write: None,
            short_write: false,
            opens: 0,
            reads: 0,
            writes: 0,
            closes: 0,
        }
    }

    /// Volume with a record holding `contents`
    pub fn with_record(contents: &[u8]) -> Self {
        let mut storage = Self::new();
        storage.record = Some(heapless::Vec::from_slice(contents).unwrap());
        storage
    }

    pub fn record(&self) -> Option<&[u8]> {
        self.record.as_deref()
    }

    /// Every opened handle has been closed
    pub fn balanced(&self) -> bool {
        self.opens == self.closes
    }
}

impl Storage for MockStorage {
    type File = MockFile;

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<MockFile, StorageError> {
        if let Some(code) = self.fail_open {
            return Err(StorageError::Io(code));
        }
        if path != RECORD_PATH {
            return Err(StorageError::NotFound);
        }

        match mode {
            OpenMode::Read if self.record.is_none() => return Err(StorageError::NotFound),
            OpenMode::Read => {}
            OpenMode::Write => self.record = Some(heapless::Vec::new()),
        }

        self.opens += 1;
        Ok(MockFile { mode, pos: 0 })
    }

    fn read(&mut self, file: &mut MockFile, buf: &mut [u8]) -> Result<usize, StorageError> {
        self.reads += 1;
        if let Some(code) = self.fail_read {
            return Err(StorageError::Io(code));
        }
        assert_eq!(file.mode, OpenMode::Read);

        let record = self.record.as_deref().unwrap_or(&[]);
        let remaining = &record[file.pos.min(record.len())..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        file.pos += n;
        Ok(n)
    }

    fn write(&mut self, file: &mut MockFile, buf: &[u8]) -> Result<usize, StorageError> {
        self.writes += 1;
        if let Some(code) = self.fail_write {
            return Err(StorageError::Io(code));
        }
        if self.short_write {
            return Ok(0);
        }
        assert_eq!(file.mode, OpenMode::Write);

        let record = self.record.get_or_insert_with(heapless::Vec::new);
        record.extend_from_slice(buf).unwrap();
        file.pos += buf.len();
        Ok(buf.len())
    }

    fn close(&mut self, _file: MockFile) {
        self.closes += 1;
    }
}

// ============================================================================
// Mock Indicator
// ============================================================================

/// Mock indicator that records every level change
pub struct MockIndicator {
    led_a: Option<bool>,
    led_b: Option<bool>,
    history: heapless::Vec<(LedId, bool), 64>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self {
            led_a: None,
            led_b: None,
            history: heapless::Vec::new(),
        }
    }

    /// Current level, `None` if never written
    pub fn level(&self, led: LedId) -> Option<bool> {
        match led {
            LedId::A => self.led_a,
            LedId::B => self.led_b,
        }
    }

    pub fn history(&self) -> &[(LedId, bool)] {
        &self.history
    }
}

impl IndicatorOutput for MockIndicator {
    fn set_level(&mut self, led: LedId, on: bool) {
        match led {
            LedId::A => self.led_a = Some(on),
            LedId::B => self.led_b = Some(on),
        }
        let _ = self.history.push((led, on));
    }
}

// ============================================================================
// Mock Bringup
// ============================================================================

/// Mock hardware setup with per-stage failure injection
pub struct MockBringup {
    pub fail_storage: Option<i32>,
    pub fail_gpio: Option<i32>,
    pub fail_usb: Option<i32>,
    pub calls: heapless::Vec<&'static str, 8>,
}

impl MockBringup {
    pub fn new() -> Self {
        Self {
            fail_storage: None,
            fail_gpio: None,
            fail_usb: None,
            calls: heapless::Vec::new(),
        }
    }

    fn stage(&mut self, name: &'static str, failure: Option<i32>) -> Result<(), HardwareError> {
        let _ = self.calls.push(name);
        match failure {
            Some(code) => Err(HardwareError(code)),
            None => Ok(()),
        }
    }
}

impl Bringup for MockBringup {
    fn mount_storage(&mut self) -> Result<(), HardwareError> {
        self.stage("storage", self.fail_storage)
    }

    fn configure_gpio(&mut self) -> Result<(), HardwareError> {
        self.stage("gpio", self.fail_gpio)
    }

    fn enable_usb_mass_storage(&mut self) -> Result<(), HardwareError> {
        self.stage("usb", self.fail_usb)
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Both LEDs show the pattern for `state`
pub fn shows_state(indicator: &MockIndicator, state: bool) -> bool {
    indicator.level(LedId::A) == Some(state) && indicator.level(LedId::B) == Some(!state)
}
