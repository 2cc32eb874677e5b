use std::time::Duration;

/// Lets a state update through once `interval` has passed since the last one.
/// Time is supplied by the caller: wall clock in play, frame count in debug runs.
#[derive(Debug, Default)]
pub struct UpdateGate {
    last_update: Duration,
}

impl UpdateGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn due(&mut self, now: Duration, interval: Duration) -> bool {
        if now.saturating_sub(self.last_update) >= interval {
            self.last_update = now;
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
    fn opens_once_per_interval() {
        let mut gate = UpdateGate::new();
        let interval = Duration::from_millis(150);
        assert!(!gate.due(Duration::from_millis(100), interval));
        assert!(gate.due(Duration::from_millis(150), interval));
        assert!(!gate.due(Duration::from_millis(299), interval));
        assert!(gate.due(Duration::from_millis(300), interval));
    }

    #[test]
    fn shorter_interval_takes_effect_immediately() {
        let mut gate = UpdateGate::new();
        assert!(gate.due(Duration::from_millis(150), Duration::from_millis(150)));
        assert!(gate.due(Duration::from_millis(200), Duration::from_millis(50)));
    }
}
