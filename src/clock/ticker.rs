use std::time::{Duration, Instant};

/// Fixed-period deadline tracker that drives a clock's `tick()`.
///
/// A disarmed ticker never reports due ticks, so a stopped clock receives no
/// callbacks at all. Arming schedules the first tick one full period later,
/// which makes resume behave like starting a fresh one-second interval.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    pub fn arm(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + self.period);
        }
    }

    pub fn disarm(&mut self) {
        self.next = None;
    }

    /// Arms or disarms to match whether the clock is currently running.
    pub fn follow(&mut self, running: bool, now: Instant) {
        if running {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    /// Number of whole periods elapsed since the last call, advancing the
    /// deadline past `now`.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };

        let mut count = 0;
        while next <= now {
            count += 1;
            next += self.period;
        }
        self.next = Some(next);
        count
    }

    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_ticker_never_fires() {
        let mut ticker = Ticker::default();
        let now = Instant::now();
        assert_eq!(ticker.due(now + Duration::from_secs(10)), 0);
        assert_eq!(ticker.until_next(now), None);
    }

    #[test]
    fn fires_once_per_elapsed_period() {
        let start = Instant::now();
        let mut ticker = Ticker::default();
        ticker.arm(start);

        assert_eq!(ticker.due(start + Duration::from_millis(999)), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(1000)), 1);
        assert_eq!(ticker.due(start + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(4200)), 3);
        assert_eq!(
            ticker.until_next(start + Duration::from_millis(4200)),
            Some(Duration::from_millis(800))
        );
    }

    #[test]
    fn rearming_keeps_existing_deadline() {
        let start = Instant::now();
        let mut ticker = Ticker::default();
        ticker.arm(start);
        ticker.arm(start + Duration::from_millis(600));
        assert_eq!(ticker.due(start + Duration::from_secs(1)), 1);
    }

    #[test]
    fn follow_disarms_when_stopped() {
        let start = Instant::now();
        let mut ticker = Ticker::default();
        ticker.follow(true, start);
        assert!(ticker.is_armed());
        ticker.follow(false, start);
        assert!(!ticker.is_armed());
        assert_eq!(ticker.due(start + Duration::from_secs(5)), 0);
    }
}
