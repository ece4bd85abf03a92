use std::time::Duration;

/// Fires at most once per `interval`, measured against timestamps handed in by the caller (time
/// elapsed since the frontend started). A firing restarts the interval from that timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    pub interval: Duration,
    last: Duration,
}

impl FrameClock {
    pub fn new(interval: Duration) -> FrameClock {
        FrameClock {
            interval,
            last: Duration::ZERO,
        }
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut clock = FrameClock::new(Duration::from_millis(100));
        assert!(!clock.poll(Duration::from_millis(40)));
        assert!(!clock.poll(Duration::from_millis(99)));
        assert!(clock.poll(Duration::from_millis(100)));
        assert!(!clock.poll(Duration::from_millis(150)));
        // The interval restarts at the firing time, not at a multiple of the interval.
        assert!(clock.poll(Duration::from_millis(230)));
        assert!(!clock.poll(Duration::from_millis(300)));
        assert!(clock.poll(Duration::from_millis(330)));
    }

    #[test]
    fn earlier_timestamps_do_not_fire() {
        let mut clock = FrameClock::new(Duration::from_millis(100));
        assert!(clock.poll(Duration::from_millis(500)));
        assert!(!clock.poll(Duration::from_millis(10)));
    }
}
