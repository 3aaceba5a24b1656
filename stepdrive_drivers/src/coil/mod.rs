use embedded_hal::digital::OutputPin;
use stepdrive_algo::CoilPort;

/// Motor coil bank over individually wired GPIO pins.
///
/// The bit index of the coil port maps to the pin's position in the bank.
/// Indices outside the bank are ignored, and pin errors are discarded;
/// coil windings are expected to hang off infallible push-pull outputs.
pub struct CoilPins<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> CoilPins<P, N> {
    /// Wraps a bank of pins, all assumed to be driven low already.
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Drives every pin low, releasing all windings.
    pub fn release_all(&mut self) {
        for pin in &mut self.pins {
            pin.set_low().ok();
        }
    }

    /// Hands the pins back.
    pub fn free(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin, const N: usize> CoilPort for CoilPins<P, N> {
    fn set_coil(&mut self, bit: u8) {
        if let Some(pin) = self.pins.get_mut(bit as usize) {
            pin.set_high().ok();
        }
    }

    fn clear_coil(&mut self, bit: u8) {
        if let Some(pin) = self.pins.get_mut(bit as usize) {
            pin.set_low().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    #[derive(Default, Clone, Copy)]
    struct FlagPin {
        high: bool,
    }

    impl ErrorType for FlagPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for FlagPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn bit_index_selects_the_matching_pin() {
        let mut bank = CoilPins::new([FlagPin::default(); 4]);
        bank.set_coil(2);
        let pins = bank.free();
        assert!(!pins[0].high && !pins[1].high && pins[2].high && !pins[3].high);
    }

    #[test]
    fn clearing_releases_only_the_addressed_pin() {
        let mut bank = CoilPins::new([FlagPin { high: true }; 3]);
        bank.clear_coil(1);
        let pins = bank.free();
        assert!(pins[0].high && !pins[1].high && pins[2].high);
    }

    #[test]
    fn out_of_range_bits_are_ignored() {
        let mut bank = CoilPins::new([FlagPin::default(); 2]);
        bank.set_coil(7);
        bank.clear_coil(200);
        let pins = bank.free();
        assert!(!pins[0].high && !pins[1].high);
    }

    #[test]
    fn release_all_drives_every_pin_low() {
        let mut bank = CoilPins::new([FlagPin { high: true }; 4]);
        bank.release_all();
        assert!(bank.free().iter().all(|pin| !pin.high));
    }
}
