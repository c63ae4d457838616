//! Device bring-up sequence.
//!
//! The device starts in a fixed order: mount the storage volume, configure
//! the button and LEDs, restore the toggle state, then hand the volume to
//! the host over USB mass storage. Any hardware failure aborts the sequence
//! and later stages are never attempted.

use crate::indicator::IndicatorOutput;
use crate::machine::{BootSource, ToggleError, ToggleMachine};
use crate::store::Storage;
use crate::time::{TimeInstant, TimeSource};

/// A hardware setup stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStage {
    /// Flash area and filesystem mount.
    Storage,
    /// Button input, its interrupt and both LED outputs.
    Gpio,
    /// USB mass storage class.
    Usb,
}

/// Failure reported by a [`Bringup`] stage, carrying the driver's error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareError(pub i32);

/// Trait for the one-shot hardware setup calls around the toggle core.
pub trait Bringup {
    /// Opens the storage partition and mounts the filesystem.
    fn mount_storage(&mut self) -> Result<(), HardwareError>;

    /// Configures the button interrupt and both LED outputs.
    fn configure_gpio(&mut self) -> Result<(), HardwareError>;

    /// Exposes the storage volume to the host as a mass storage device.
    fn enable_usb_mass_storage(&mut self) -> Result<(), HardwareError>;
}

/// Errors that abort device bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// A hardware stage failed.
    HardwareUnavailable {
        /// The failing stage.
        stage: BootStage,
        /// Driver error code.
        code: i32,
    },
    /// The toggle state could not be restored.
    Toggle(ToggleError),
}

impl core::fmt::Display for BootError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BootError::HardwareUnavailable { stage, code } => {
                write!(f, "{:?} setup failed with error {}", stage, code)
            }
            BootError::Toggle(err) => write!(f, "toggle boot failed: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BootError {}

impl From<ToggleError> for BootError {
    fn from(err: ToggleError) -> Self {
        BootError::Toggle(err)
    }
}

/// Summary of a successful bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    /// Whether the state was restored or defaulted.
    pub source: BootSource,
    /// The toggle state after boot.
    pub state: bool,
}

fn run_stage(stage: BootStage, result: Result<(), HardwareError>) -> Result<(), BootError> {
    match result {
        Ok(()) => {
            #[cfg(feature = "defmt")]
            defmt::info!("{} ready", stage);
            Ok(())
        }
        Err(HardwareError(code)) => {
            #[cfg(feature = "defmt")]
            defmt::error!("Error {}: {} setup failed", code, stage);
            Err(BootError::HardwareUnavailable { stage, code })
        }
    }
}

/// Runs the full bring-up sequence and boots the toggle machine.
///
/// The machine is booted after GPIO setup, so the indicator outputs are
/// configured before the first pattern is applied.
pub fn boot_device<'t, B, I, S, O, T>(
    bringup: &mut B,
    machine: &mut ToggleMachine<'t, I, S, O, T>,
) -> Result<BootReport, BootError>
where
    B: Bringup,
    I: TimeInstant,
    S: Storage,
    O: IndicatorOutput,
    T: TimeSource<I>,
{
    run_stage(BootStage::Storage, bringup.mount_storage())?;
    run_stage(BootStage::Gpio, bringup.configure_gpio())?;

    let source = machine.boot()?;

    run_stage(BootStage::Usb, bringup.enable_usb_mass_storage())?;

    #[cfg(feature = "defmt")]
    defmt::info!("The device is put in USB mass storage mode.");

    Ok(BootReport {
        source,
        state: machine.toggle_state(),
    })
}
