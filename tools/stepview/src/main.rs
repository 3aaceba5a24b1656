//! Console trace of a simulated stepper motor.
//!
//! Runs the commutation logic against an in-memory coil register and
//! prints the winding pattern and angle after every step, which makes the
//! three schemes easy to eyeball without wiring up a motor.
//!
//! Usage: stepview [wave|full|half] [steps <count>|angle <degrees>]

use std::cell::RefCell;
use std::env;
use std::process::ExitCode;
use std::rc::Rc;

use stepdrive_algo::{CoilPort, StepDelay, Stepmotor, SteppingScheme};

const STEP_SIZE_TENTHS: i32 = 18;

/// Shared coil register so the trace can read it while the motor owns it.
struct SharedPort(Rc<RefCell<u8>>);

impl CoilPort for SharedPort {
    fn set_coil(&mut self, bit: u8) {
        *self.0.borrow_mut() |= 1 << bit;
    }

    fn clear_coil(&mut self, bit: u8) {
        *self.0.borrow_mut() &= !(1 << bit);
    }
}

/// The simulation has no motor to pace, so waiting is skipped.
struct NoWait;

impl StepDelay for NoWait {
    fn delay_ms(&mut self, _ms: u32) {}
}

fn pattern(bits: u8) -> String {
    (0..4)
        .map(|coil| if bits & (1 << coil) != 0 { '#' } else { '.' })
        .collect()
}

fn run(scheme: SteppingScheme, command: &str, value: i32) -> Result<(), String> {
    let bits = Rc::new(RefCell::new(0u8));
    let port = SharedPort(Rc::clone(&bits));
    let mut motor = Stepmotor::new(port, NoWait, STEP_SIZE_TENTHS, scheme, [0, 1, 2, 3])
        .map_err(|e| e.to_string())?;

    println!("scheme {scheme:?}, step size {STEP_SIZE_TENTHS} tenths");
    match command {
        "steps" => {
            let direction = if value < 0 { -1 } else { 1 };
            for i in 1..=value.abs() {
                motor.step(direction);
                println!(
                    "step {i:4}  coils {}  phase {}  angle {:5} tenths",
                    pattern(*bits.borrow()),
                    motor.phase_index(),
                    motor.angle_tenths(),
                );
            }
        }
        "angle" => {
            motor.set_angle(value);
            println!(
                "sought {value} degrees: coils {}  phase {}  angle {:5} tenths ({} degrees)",
                pattern(*bits.borrow()),
                motor.phase_index(),
                motor.angle_tenths(),
                motor.angle(),
            );
        }
        other => return Err(format!("unknown command '{other}'")),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let (scheme, command, value) = match args.as_slice() {
        [scheme, command, value] => {
            let scheme = match scheme.as_str() {
                "wave" => SteppingScheme::WaveDrive,
                "full" => SteppingScheme::FullStep,
                "half" => SteppingScheme::HalfStep,
                other => {
                    eprintln!("unknown scheme '{other}'");
                    return ExitCode::FAILURE;
                }
            };
            let value: i32 = match value.parse() {
                Ok(v) => v,
                Err(_) => {
                    eprintln!("'{value}' is not an integer");
                    return ExitCode::FAILURE;
                }
            };
            (scheme, command.clone(), value)
        }
        _ => {
            eprintln!("usage: stepview [wave|full|half] [steps <count>|angle <degrees>]");
            return ExitCode::FAILURE;
        }
    };

    match run(scheme, &command, value) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
