use std::time::{Duration, Instant};

/// Wall-clock bound threaded through every catalog call of one search.
///
/// A search issues up to 24 sequential requests; the deadline lets a caller
/// cap the total time across all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Never expires.
    pub fn none() -> Self {
        Self { at: None }
    }

    pub fn at(instant: Instant) -> Self {
        Self { at: Some(instant) }
    }

    /// Expires `budget` from now; a budget past the clock's range never expires.
    pub fn after(budget: Duration) -> Self {
        Instant::now()
            .checked_add(budget)
            .map_or_else(Self::none, Self::at)
    }

    /// Time left, or `None` for an unbounded deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    /// Caps `timeout` to the time left; `None` once expired.
    pub fn clamp(&self, timeout: Duration) -> Option<Duration> {
        match self.remaining() {
            None => Some(timeout),
            Some(left) if left.is_zero() => None,
            Some(left) => Some(left.min(timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Deadline;
    use std::time::{Duration, Instant};

    #[test]
    fn unbounded_deadline_never_expires() {
        let deadline = Deadline::none();
        assert!(!deadline.is_expired());
        assert_eq!(deadline.remaining(), None);
        assert_eq!(
            deadline.clamp(Duration::from_secs(5)),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn oversized_budget_is_unbounded() {
        let deadline = Deadline::after(Duration::MAX);
        assert_eq!(deadline, Deadline::none());
        assert!(!deadline.is_expired());
    }

    #[test]
    fn past_instant_is_expired() {
        let deadline = Deadline::at(Instant::now() - Duration::from_millis(1));
        assert!(deadline.is_expired());
        assert_eq!(deadline.clamp(Duration::from_secs(5)), None);
    }

    #[test]
    fn clamp_caps_to_remaining_budget() {
        let deadline = Deadline::after(Duration::from_secs(60));
        let clamped = deadline
            .clamp(Duration::from_secs(3600))
            .expect("deadline is still open");
        assert!(clamped <= Duration::from_secs(60));
        assert_eq!(
            deadline.clamp(Duration::from_millis(10)),
            Some(Duration::from_millis(10))
        );
    }
}
