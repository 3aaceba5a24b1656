use crate::math_integer::normalization::{
    fold_phase, fold_to_full_turn, fold_to_half_turn, norm, wrap_degrees,
};

use super::{CoilPort, MotorError, StepDelay, CLOCKWISE, COUNTERCLOCKWISE};

/// Commutation pattern used to advance one logical step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SteppingScheme {
    /// Exactly one winding energized at a time.
    WaveDrive,
    /// Adjacent winding pairs energized, full torque.
    FullStep,
    /// Alternates single and dual energization, double angular resolution.
    HalfStep,
}

/// Controller for one stepper motor.
///
/// Owns the motor's angular estimate and phase state and drives the coil
/// port one commutation at a time. `N` is the number of physical phases;
/// the phase map assigns each logical phase to an output bit, so the map
/// length always matches the phase count by construction.
pub struct Stepmotor<P, D, const N: usize> {
    port: P,              // Coil output register
    pacer: D,             // Inter-step pacing source
    scheme: SteppingScheme,
    phase_map: [u8; N],   // Logical phase index to output bit
    step_size10: i32,     // Angular increment per step, tenths of a degree
    angle10: i32,         // Signed angle estimate, tenths of a degree
    phase: i32,           // Current phase index, always in [0, N)
    half_toggle: u8,      // Half-step parity, alternates 0 and 1
}

impl<P: CoilPort, D: StepDelay, const N: usize> Stepmotor<P, D, N> {
    /// Pacing interval for wave-drive and full-step commutation. Half-step
    /// calls move half an increment and wait half as long.
    const STEP_DELAY_MS: u32 = 2;

    /// Creates a motor controller with its static configuration.
    ///
    /// # Arguments
    /// * `port` - Coil output, already configured for output by the caller
    /// * `pacer` - Blocking delay source for inter-step pacing
    /// * `step_size10` - Angular increment per step in tenths of a degree
    /// * `scheme` - Commutation scheme, fixed for the motor's lifetime
    /// * `phase_map` - Output bit for each logical phase
    ///
    /// No winding is energized until the first step call.
    pub fn new(
        port: P,
        pacer: D,
        step_size10: i32,
        scheme: SteppingScheme,
        phase_map: [u8; N],
    ) -> Result<Self, MotorError> {
        if N == 0 {
            return Err(MotorError::InvalidConfiguration(
                "at least one phase is required",
            ));
        }
        if step_size10 <= 0 {
            return Err(MotorError::InvalidConfiguration(
                "step size must be positive",
            ));
        }
        Ok(Self {
            port,
            pacer,
            scheme,
            phase_map,
            step_size10,
            angle10: 0,
            phase: 0,
            half_toggle: 0,
        })
    }

    /// Moves the motor a signed number of steps.
    ///
    /// Positive counts run clockwise, negative counts counter-clockwise,
    /// zero is a no-op. Blocks until every step and its pacing interval
    /// has completed.
    pub fn step(&mut self, steps: i32) {
        let direction = if steps < 0 { COUNTERCLOCKWISE } else { CLOCKWISE };

        let mut remaining = norm(steps);
        while remaining > 0 {
            self.step_once(direction);
            remaining -= 1;
        }
    }

    /// Seeks to an absolute angle in whole degrees.
    ///
    /// The input is reduced into one signed rotation, the shorter angular
    /// direction is chosen, and the motor steps greedily until the
    /// remaining distance is no more than one step size. The final
    /// position is therefore within one step of the request, exactly on
    /// it only when the request is a step multiple.
    pub fn set_angle(&mut self, degrees: i32) {
        let target10 = wrap_degrees(degrees) * 10;

        // The wave-drive angle folds into a half-turn range that cannot
        // represent targets beyond it; folding the target onto the same
        // range keeps the seek loop finite and lands on the same physical
        // point of the circle.
        let target10 = match self.scheme {
            SteppingScheme::WaveDrive => fold_to_half_turn(target10),
            SteppingScheme::FullStep | SteppingScheme::HalfStep => target10,
        };

        if (target10 - self.angle10 + 3600) % 3600 <= 1800 {
            while norm(target10 - self.angle10) > self.step_size10 {
                self.step_once(CLOCKWISE);
            }
        } else {
            while norm(target10 - self.angle10) > self.step_size10 {
                self.step_once(COUNTERCLOCKWISE);
            }
        }
    }

    /// Current angle estimate in whole degrees, truncated toward zero.
    #[inline(always)]
    pub fn angle(&self) -> i32 {
        self.angle10 / 10
    }

    /// Current angle estimate in tenths of a degree.
    #[inline(always)]
    pub fn angle_tenths(&self) -> i32 {
        self.angle10
    }

    /// Index of the phase the commutation currently rests on.
    #[inline(always)]
    pub fn phase_index(&self) -> usize {
        self.phase as usize
    }

    /// Borrow of the coil port, mainly for inspection on the host.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Releases the coil port and pacer.
    pub fn into_parts(self) -> (P, D) {
        (self.port, self.pacer)
    }

    fn step_once(&mut self, direction: i32) {
        match self.scheme {
            SteppingScheme::WaveDrive => self.step_wave_drive(direction),
            SteppingScheme::FullStep => self.step_full_step(direction),
            SteppingScheme::HalfStep => self.step_half_step(direction),
        }
    }

    fn step_wave_drive(&mut self, direction: i32) {
        // Release the resting phase, advance, energize the new one.
        self.port.clear_coil(self.phase_map[self.phase as usize]);

        self.phase = fold_phase(self.phase + direction, N as i32);
        self.port.set_coil(self.phase_map[self.phase as usize]);

        self.angle10 = fold_to_half_turn(self.angle10 + self.step_size10 * direction);

        self.pacer.delay_ms(Self::STEP_DELAY_MS);
    }

    fn step_full_step(&mut self, direction: i32) {
        // Release the trailing phase of the energized pair, then energize
        // the leading one. The index is folded after each of the two moves;
        // the net change over the call is one phase in the step direction.
        self.phase = fold_phase(self.phase - direction, N as i32);
        self.port.clear_coil(self.phase_map[self.phase as usize]);

        self.phase = fold_phase(self.phase + 2 * direction, N as i32);
        self.port.set_coil(self.phase_map[self.phase as usize]);

        self.angle10 = fold_to_full_turn(self.angle10 + self.step_size10 * direction);

        self.pacer.delay_ms(Self::STEP_DELAY_MS);
    }

    fn step_half_step(&mut self, direction: i32) {
        if self.half_toggle == 0 {
            // Even call: energize the next phase alongside the current one.
            self.phase = fold_phase(self.phase + direction, N as i32);
            self.port.set_coil(self.phase_map[self.phase as usize]);
        } else {
            // Odd call: release the phase left behind. Only this half of
            // the cycle moves the angle estimate; two calls make one full
            // mechanical increment.
            self.phase = fold_phase(self.phase - direction, N as i32);
            self.port.clear_coil(self.phase_map[self.phase as usize]);

            self.phase = fold_phase(self.phase + direction, N as i32);

            self.angle10 = fold_to_full_turn(self.angle10 + self.step_size10 * direction);
        }
        self.half_toggle ^= 1;

        self.pacer.delay_ms(Self::STEP_DELAY_MS / 2);
    }
}
