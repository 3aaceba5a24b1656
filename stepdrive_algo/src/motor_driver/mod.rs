mod dcmotor;
mod stepper;

pub use dcmotor::Dcmotor;
pub use stepper::{Stepmotor, SteppingScheme};

use thiserror::Error;

/// Direction multiplier for a clockwise step.
pub const CLOCKWISE: i32 = 1;
/// Direction multiplier for a counter-clockwise step.
pub const COUNTERCLOCKWISE: i32 = -1;

/// A multi-bit digital output driving the motor coils.
///
/// Each coil maps to one bit index inside a fixed-width output register;
/// setting a bit energizes the winding, clearing it releases the winding.
/// Implementations must touch only the addressed bit.
pub trait CoilPort {
    /// Energizes the winding wired to `bit`.
    fn set_coil(&mut self, bit: u8);
    /// Releases the winding wired to `bit`.
    fn clear_coil(&mut self, bit: u8);
}

/// Blocking pacing primitive between steps.
///
/// Keeps the commutation rate below the motor's maximum slew rate. The
/// controller calls this once per logical step and expects the call to
/// return only after the full interval has elapsed.
pub trait StepDelay {
    fn delay_ms(&mut self, ms: u32);
}

/// PWM duty output for the DC motor throttle.
pub trait ThrottleOutput {
    /// Applies a duty value, `0` fully off, `255` fully on.
    fn set_duty(&mut self, duty: u8);
}

/// Motor construction errors.
///
/// Stepping and seeking are total over their input domain; the only thing
/// that can be rejected is a configuration that would make them undefined.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    #[error("invalid motor configuration: {0}")]
    InvalidConfiguration(&'static str),
}
