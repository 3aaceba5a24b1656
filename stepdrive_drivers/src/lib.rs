#![cfg_attr(not(feature = "std"), no_std)]

pub mod coil;
pub mod delay;
pub mod pwm;

pub use coil::CoilPins;
pub use delay::HalDelay;
pub use pwm::PwmThrottle;
