//! Toggle state machine with persistence and indicator updates.
//!
//! Provides [`ToggleMachine`], the single owner and writer of the toggle
//! state. It loads the state at boot, flips it on every debounced press,
//! persists the new value and mirrors it on the indicator LEDs.

use crate::config::{ConfigError, ToggleConfig};
use crate::debounce::Debouncer;
use crate::indicator::{IndicatorOutput, IndicatorPattern, IndicatorReflector};
use crate::store::{StateStore, Storage, StoreError};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{LogicalToggleEvent, PressEvent};

/// The lifecycle state of a toggle machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MachineState {
    /// Created, state not yet loaded. Presses are rejected.
    Uninitialized,
    /// Booted. Presses toggle the state.
    Ready,
}

/// Where the boot state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootSource {
    /// Loaded from an existing record.
    Restored,
    /// No record existed; the default `false` is used and nothing is written.
    Defaulted,
}

/// Errors that can occur during toggle machine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToggleError {
    /// Operation called from an invalid state.
    InvalidState {
        /// The state the operation requires.
        expected: MachineState,
        /// The actual current state.
        actual: MachineState,
    },
    /// The record could not be read at boot.
    Storage(StoreError),
}

impl core::fmt::Display for ToggleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ToggleError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {:?}, but machine is {:?}",
                    expected, actual
                )
            }
            ToggleError::Storage(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ToggleError {}

impl From<StoreError> for ToggleError {
    fn from(err: StoreError) -> Self {
        ToggleError::Storage(err)
    }
}

/// Result of one accepted press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome<I: TimeInstant> {
    /// The state after flipping.
    pub state: bool,

    /// The logical event that caused the flip.
    pub event: LogicalToggleEvent<I>,

    /// Whether the new state reached storage. A failure here does not undo
    /// the flip; the indicator shows the new state regardless.
    pub persisted: Result<(), StoreError>,
}

/// Owns the toggle state and drives storage and indicator from it.
///
/// Press handling is synchronous: debounce, flip, save and indicator update
/// all complete inside one [`handle_press`](Self::handle_press) call. Call it
/// from a single context (the button interrupt or a task serialized with it).
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Storage implementation type
/// * `O` - Indicator output implementation type
/// * `T` - Time source implementation type
pub struct ToggleMachine<'t, I: TimeInstant, S: Storage, O: IndicatorOutput, T: TimeSource<I>> {
    store: StateStore<S>,
    indicator: IndicatorReflector<O>,
    debouncer: Debouncer<I>,
    time_source: &'t T,
    state: MachineState,
    toggle_state: bool,
}

impl<'t, I: TimeInstant, S: Storage, O: IndicatorOutput, T: TimeSource<I>>
    ToggleMachine<'t, I, S, O, T>
{
    /// Creates an uninitialized machine with state `false` and the default
    /// 500 ms debounce. No I/O happens until [`boot`](Self::boot).
    pub fn new(store: StateStore<S>, output: O, time_source: &'t T) -> Self {
        Self {
            store,
            indicator: IndicatorReflector::new(output),
            debouncer: Debouncer::default(),
            time_source,
            state: MachineState::Uninitialized,
            toggle_state: false,
        }
    }

    /// Creates an uninitialized machine from a configuration.
    pub fn from_config(
        storage: S,
        output: O,
        time_source: &'t T,
        config: &ToggleConfig<'_>,
    ) -> Result<Self, ConfigError> {
        let store = StateStore::new(storage, config.record_path()?);
        let debouncer = Debouncer::new(I::Duration::from_millis(config.quiet_interval_ms));
        Ok(Self::new(store, output, time_source).with_debouncer(debouncer))
    }

    /// Replaces the debouncer.
    pub fn with_debouncer(mut self, debouncer: Debouncer<I>) -> Self {
        self.debouncer = debouncer;
        self
    }

    /// Loads the persisted state and shows it on the indicator.
    ///
    /// Must be called once, from `Uninitialized`.
    ///
    /// # Returns
    /// * `Ok(BootSource::Restored)` - State loaded from the record
    /// * `Ok(BootSource::Defaulted)` - No record; state is `false`, nothing written
    /// * `Err(ToggleError::Storage)` - Record unreadable; machine stays `Uninitialized`
    /// * `Err(ToggleError::InvalidState)` - Already booted
    pub fn boot(&mut self) -> Result<BootSource, ToggleError> {
        if self.state != MachineState::Uninitialized {
            return Err(ToggleError::InvalidState {
                expected: MachineState::Uninitialized,
                actual: self.state,
            });
        }

        let source = match self.store.load() {
            Ok(value) => {
                self.toggle_state = value;
                BootSource::Restored
            }
            Err(StoreError::NotFound) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Toggle record not found, assuming false");
                self.toggle_state = false;
                BootSource::Defaulted
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Failed to load toggle record: {}", err);
                return Err(ToggleError::Storage(err));
            }
        };

        #[cfg(feature = "defmt")]
        defmt::info!("Boot toggle state: {}", self.toggle_state);

        self.indicator.apply(self.toggle_state);
        self.state = MachineState::Ready;
        Ok(source)
    }

    /// Handles a raw press from the button interrupt.
    ///
    /// Must be called from `Ready` state.
    ///
    /// # Returns
    /// * `Ok(None)` - Press dropped by the debouncer
    /// * `Ok(Some(outcome))` - State flipped, saved (see `outcome.persisted`) and shown
    /// * `Err` - Machine not booted
    pub fn handle_press(
        &mut self,
        event: PressEvent<I>,
    ) -> Result<Option<ToggleOutcome<I>>, ToggleError> {
        if self.state != MachineState::Ready {
            return Err(ToggleError::InvalidState {
                expected: MachineState::Ready,
                actual: self.state,
            });
        }

        Ok(self
            .debouncer
            .filter(event)
            .map(|logical| self.toggle(logical)))
    }

    /// Handles a raw press happening now, timestamped by the time source.
    pub fn press(&mut self) -> Result<Option<ToggleOutcome<I>>, ToggleError> {
        let now = self.time_source.now();
        self.handle_press(PressEvent::new(now))
    }

    fn toggle(&mut self, event: LogicalToggleEvent<I>) -> ToggleOutcome<I> {
        self.toggle_state = !self.toggle_state;

        let persisted = self.store.save(self.toggle_state);
        match persisted {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "Wrote '{}' to toggle record",
                    crate::store::encode_record(self.toggle_state) as char
                );
            }
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Failed to save toggle record: {}", _err);
            }
        }

        // The indicator follows memory even when the save failed.
        self.indicator.apply(self.toggle_state);

        ToggleOutcome {
            state: self.toggle_state,
            event,
            persisted,
        }
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> MachineState {
        self.state
    }

    /// Returns true once [`boot`](Self::boot) has succeeded.
    pub fn is_ready(&self) -> bool {
        self.state == MachineState::Ready
    }

    /// Returns the in-memory toggle state.
    pub fn toggle_state(&self) -> bool {
        self.toggle_state
    }

    /// Returns the LED pattern matching the current toggle state.
    pub fn pattern(&self) -> IndicatorPattern {
        IndicatorPattern::for_state(self.toggle_state)
    }

    /// Returns a reference to the state store.
    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// Returns a mutable reference to the state store.
    pub fn store_mut(&mut self) -> &mut StateStore<S> {
        &mut self.store
    }

    /// Returns a reference to the indicator.
    pub fn indicator(&self) -> &IndicatorReflector<O> {
        &self.indicator
    }

    /// Returns a reference to the debouncer.
    pub fn debouncer(&self) -> &Debouncer<I> {
        &self.debouncer
    }
}
