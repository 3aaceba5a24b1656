#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(not(feature = "std"), test))]
#[macro_use]
extern crate std;

pub mod math_integer;
pub mod motor_driver;

pub mod dispatch;
pub mod display;
pub mod peripherals;

pub use motor_driver::{
    CoilPort, Dcmotor, MotorError, StepDelay, Stepmotor, SteppingScheme, ThrottleOutput,
};
