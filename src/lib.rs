#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ToggleMachine`**: Owns the toggle state, loads it at boot and flips it on debounced presses
//! - **`StateStore`**: Reads and writes the one-byte `'0'`/`'1'` record
//! - **`Storage`**: Trait to implement for your filesystem
//! - **`Debouncer`**: Drops presses arriving within the quiet interval of the last accepted one
//! - **`IndicatorReflector`**: Mirrors the state on two complementary LEDs
//! - **`IndicatorOutput`**: Trait to implement for your LED hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`Bringup`**: Trait for the one-shot hardware setup driven by `boot_device`
//!
//! A missing record at boot is normal and yields `false`. A failed save is
//! reported but never reverts the state shown on the LEDs.

pub mod time;
pub mod types;
pub mod config;
pub mod store;
pub mod debounce;
pub mod indicator;
pub mod machine;
pub mod bringup;

#[cfg(feature = "std")]
pub mod host;

#[cfg(feature = "embassy-time")]
pub mod embassy;

#[cfg(feature = "embedded-hal")]
pub mod hal;

pub use bringup::{BootError, BootReport, BootStage, Bringup, HardwareError, boot_device};
pub use config::{ConfigError, RecordPath, ToggleConfig};
pub use debounce::Debouncer;
pub use indicator::{IndicatorOutput, IndicatorPattern, IndicatorReflector, LedId};
pub use machine::{BootSource, MachineState, ToggleError, ToggleMachine, ToggleOutcome};
pub use store::{
    OpenMode, StateStore, Storage, StorageError, StorageOp, StoreError, decode_record,
    encode_record,
};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{LogicalToggleEvent, PressEvent};
