use std::time::{Duration, Instant};

/// A single trailing-edge deadline. Every [`Debounce::touch`] pushes it out;
/// [`Debounce::fire`] reports once when it has passed.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once after the deadline passes.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_moves_deadline_forward() {
        let start = Instant::now();
        let mut d = Debounce::new(Duration::from_millis(200));
        d.touch(start);
        d.touch(start + Duration::from_millis(150));
        assert!(!d.fire(start + Duration::from_millis(250)));
        assert!(d.fire(start + Duration::from_millis(350)));
        assert!(!d.fire(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_cancel_suppresses_fire() {
        let start = Instant::now();
        let mut d = Debounce::new(Duration::from_millis(10));
        d.touch(start);
        assert!(d.is_pending());
        d.cancel();
        assert!(!d.fire(start + Duration::from_secs(1)));
    }
}
