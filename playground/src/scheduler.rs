//! Fixed-interval tick scheduler for games that advance without input.

use std::time::{Duration, Instant};

use engine::scene::GameId;

use crate::actions::{is_tick_driven, TICK_ACTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    game: GameId,
    period: Duration,
    next_at: Instant,
}

/// Owns its timing state outright. `sync` arms or tears the timer down to
/// match the session; `poll` emits the tick action when the deadline passes.
#[derive(Debug, Default)]
pub struct TickScheduler {
    armed: Option<Armed>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Reconciles the timer with the session state. Re-arming with the same
    /// game and period keeps the current phase; any change restarts it.
    pub fn sync(&mut self, active: Option<(GameId, Duration)>, now: Instant) {
        let wanted = active.filter(|&(game, period)| {
            is_tick_driven(game) && period > Duration::ZERO
        });
        let Some((game, period)) = wanted else {
            self.armed = None;
            return;
        };

        match self.armed {
            Some(armed) if armed.game == game && armed.period == period => {}
            _ => {
                self.armed = Some(Armed {
                    game,
                    period,
                    next_at: now + period,
                });
            }
        }
    }

    /// Returns the tick action if a deadline has passed. A late poll emits a
    /// single tick and schedules the next one from now, so a stalled client
    /// does not burst-fire a backlog.
    pub fn poll(&mut self, now: Instant) -> Option<i32> {
        let armed = self.armed.as_mut()?;
        if now < armed.next_at {
            return None;
        }
        armed.next_at = now + armed.period;
        Some(TICK_ACTION)
    }

    /// Time until the next tick, for event-loop wakeup scheduling.
    pub fn time_to_next(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|armed| armed.next_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(120);

    #[test]
    fn fires_only_after_the_period_elapses() {
        let start = Instant::now();
        let mut sched = TickScheduler::new();
        sched.sync(Some((GameId::Snake, PERIOD)), start);

        assert_eq!(sched.poll(start), None);
        assert_eq!(sched.poll(start + Duration::from_millis(119)), None);
        assert_eq!(sched.poll(start + PERIOD), Some(TICK_ACTION));
        // Next deadline is rescheduled, not immediately due again.
        assert_eq!(sched.poll(start + PERIOD), None);
    }

    #[test]
    fn late_polls_do_not_burst_fire() {
        let start = Instant::now();
        let mut sched = TickScheduler::new();
        sched.sync(Some((GameId::Snake, PERIOD)), start);

        let late = start + Duration::from_secs(5);
        assert_eq!(sched.poll(late), Some(TICK_ACTION));
        assert_eq!(sched.poll(late), None);
        assert_eq!(sched.poll(late + PERIOD), Some(TICK_ACTION));
    }

    #[test]
    fn resync_with_same_settings_keeps_phase() {
        let start = Instant::now();
        let mut sched = TickScheduler::new();
        sched.sync(Some((GameId::Snake, PERIOD)), start);

        let halfway = start + Duration::from_millis(60);
        sched.sync(Some((GameId::Snake, PERIOD)), halfway);
        // Deadline is still measured from the original arm time.
        assert_eq!(sched.poll(start + PERIOD), Some(TICK_ACTION));
    }

    #[test]
    fn changing_period_restarts_the_timer() {
        let start = Instant::now();
        let mut sched = TickScheduler::new();
        sched.sync(Some((GameId::Tetris, PERIOD)), start);

        let later = start + Duration::from_millis(100);
        sched.sync(Some((GameId::Tetris, Duration::from_millis(500))), later);
        assert_eq!(sched.poll(start + PERIOD), None);
        assert_eq!(
            sched.poll(later + Duration::from_millis(500)),
            Some(TICK_ACTION)
        );
    }

    #[test]
    fn non_tick_games_never_arm() {
        let start = Instant::now();
        let mut sched = TickScheduler::new();
        sched.sync(Some((GameId::Doudizhu, PERIOD)), start);
        assert!(!sched.is_armed());
        assert_eq!(sched.poll(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn sync_none_tears_the_timer_down() {
        let start = Instant::now();
        let mut sched = TickScheduler::new();
        sched.sync(Some((GameId::Snake, PERIOD)), start);
        assert!(sched.is_armed());

        sched.sync(None, start);
        assert!(!sched.is_armed());
        assert_eq!(sched.time_to_next(start), None);
    }

    #[test]
    fn zero_period_is_rejected() {
        let start = Instant::now();
        let mut sched = TickScheduler::new();
        sched.sync(Some((GameId::Snake, Duration::ZERO)), start);
        assert!(!sched.is_armed());
    }
}
