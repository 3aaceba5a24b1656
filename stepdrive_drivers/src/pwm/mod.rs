use embedded_hal::pwm::SetDutyCycle;
use stepdrive_algo::ThrottleOutput;

/// Adapts a HAL PWM channel into the DC motor throttle seam.
///
/// The eight-bit duty is applied as a fraction of the channel's own duty
/// range, so the channel resolution does not have to be eight bits.
pub struct PwmThrottle<W> {
    channel: W,
}

impl<W: SetDutyCycle> PwmThrottle<W> {
    pub fn new(channel: W) -> Self {
        Self { channel }
    }

    pub fn free(self) -> W {
        self.channel
    }
}

impl<W: SetDutyCycle> ThrottleOutput for PwmThrottle<W> {
    fn set_duty(&mut self, duty: u8) {
        self.channel
            .set_duty_cycle_fraction(duty as u16, u8::MAX as u16)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::ErrorType;

    #[derive(Default)]
    struct TenBitChannel {
        duty: u16,
    }

    impl ErrorType for TenBitChannel {
        type Error = core::convert::Infallible;
    }

    impl SetDutyCycle for TenBitChannel {
        fn max_duty_cycle(&self) -> u16 {
            0x3FF
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn duty_scales_to_the_channel_resolution() {
        let mut throttle = PwmThrottle::new(TenBitChannel::default());
        throttle.set_duty(255);
        assert_eq!(throttle.free().duty, 0x3FF);

        let mut throttle = PwmThrottle::new(TenBitChannel::default());
        throttle.set_duty(0);
        assert_eq!(throttle.free().duty, 0);
    }

    #[test]
    fn half_duty_lands_mid_range() {
        let mut throttle = PwmThrottle::new(TenBitChannel::default());
        throttle.set_duty(128);
        // 128/255 of a ten-bit range, truncated.
        assert_eq!(throttle.free().duty, 513);
    }
}
