use embedded_hal::delay::DelayNs;
use stepdrive_algo::StepDelay;

/// Adapts any blocking HAL delay into the motor's pacing seam.
pub struct HalDelay<D>(pub D);

impl<D: DelayNs> StepDelay for HalDelay<D> {
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct NanosLog {
        total_ns: u64,
    }

    impl DelayNs for NanosLog {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn milliseconds_reach_the_hal_delay() {
        let mut pacer = HalDelay(NanosLog::default());
        pacer.delay_ms(2);
        pacer.delay_ms(1);
        assert_eq!(pacer.0.total_ns, 3_000_000);
    }
}
