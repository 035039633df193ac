//! Common trait for household loads.

/// A household load that draws power hour by hour.
///
/// This trait provides a common interface for every load in the simulated
/// day, so the simulator can sum hourly usage without knowing the device kind.
pub trait Device {
    /// Returns the power drawn during `hour` in kilowatts.
    ///
    /// Loads never generate, so the value is always nonnegative.
    ///
    /// # Arguments
    ///
    /// * `hour` - Hour of the simulated day (0-23)
    fn power_kw(&self, hour: usize) -> f64;
}
