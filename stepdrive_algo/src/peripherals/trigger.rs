/// Pin condition that fires an external trigger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeSense {
    /// Fires for as long as the line is held low.
    Low,
    /// Fires on any logical change.
    AnyChange,
    /// Fires on a low-to-high transition.
    Rising,
    /// Fires on a high-to-low transition.
    Falling,
}

/// One external trigger line.
///
/// Enabling a line arms it at the device level only; whether armed lines
/// fire at all is governed by the device's global event gate, which sits
/// outside this seam.
pub trait EdgeTrigger {
    fn set_sense(&mut self, sense: EdgeSense);
    fn enable(&mut self);
    fn disable(&mut self);
}
