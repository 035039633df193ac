use super::types::HOURS_PER_DAY;

/// Hour-by-hour clock over one planned day.
///
/// # Examples
///
/// ```
/// use energy_advisor::sim::clock::DayClock;
///
/// let mut clock = DayClock::new();
/// let mut hours = Vec::new();
/// clock.run(|hour| hours.push(hour));
/// assert_eq!(hours.len(), 24);
/// assert_eq!(hours.first(), Some(&0));
/// assert_eq!(hours.last(), Some(&23));
/// ```
#[derive(Debug)]
pub struct DayClock {
    /// Next hour to hand out.
    hour: usize,
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new()
    }
}

impl DayClock {
    /// Creates a clock positioned at midnight.
    pub fn new() -> Self {
        Self { hour: 0 }
    }

    /// Advances by one hour.
    ///
    /// # Returns
    ///
    /// * `Some(hour)` - The hour being entered (0-23)
    /// * `None` - Once the day is over
    pub fn tick(&mut self) -> Option<usize> {
        if self.hour < HOURS_PER_DAY {
            let hour = self.hour;
            self.hour += 1;
            Some(hour)
        } else {
            None
        }
    }

    /// Calls `f` for every remaining hour of the day, in order.
    pub fn run(&mut self, mut f: impl FnMut(usize)) {
        while let Some(hour) = self.tick() {
            f(hour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_through_the_day_then_stops() {
        let mut clock = DayClock::new();
        for expected in 0..HOURS_PER_DAY {
            assert_eq!(clock.tick(), Some(expected));
        }
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn run_after_partial_day_resumes() {
        let mut clock = DayClock::new();
        clock.tick();
        clock.tick();

        let mut seen = Vec::new();
        clock.run(|hour| seen.push(hour));
        assert_eq!(seen.first(), Some(&2));
        assert_eq!(seen.len(), HOURS_PER_DAY - 2);
    }

    #[test]
    fn exhausted_clock_never_calls() {
        let mut clock = DayClock::new();
        clock.run(|_| {});
        let mut was_called = false;
        clock.run(|_| was_called = true);
        assert!(!was_called);
    }
}
