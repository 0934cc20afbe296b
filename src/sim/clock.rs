//! Periodic trigger scheduler
//!
//! The game has four independent periodic timers (fuel/seconds, spawning,
//! cloud drift, difficulty). Rather than owning real timers, the clock is fed
//! elapsed milliseconds and reports which triggers came due, in chronological
//! order. Resetting it cancels all in-progress periods.

use crate::tuning::Tuning;

/// Upper bound on triggers fired by one `advance` call
pub const MAX_TRIGGERS_PER_ADVANCE: usize = 64;

/// One periodic trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Elapsed time +1, fuel -1
    Second,
    /// Spawn entities and advance birds/parachutes/stars
    Spawn,
    /// Advance clouds
    Cloud,
    /// Raise difficulty
    Difficulty,
}

impl Trigger {
    /// Tie-break order when several triggers come due at the same instant
    pub const ALL: [Trigger; 4] = [
        Trigger::Second,
        Trigger::Spawn,
        Trigger::Cloud,
        Trigger::Difficulty,
    ];

    pub fn period_ms(&self, tuning: &Tuning) -> f64 {
        match self {
            Trigger::Second => tuning.second_period_ms,
            Trigger::Spawn => tuning.spawn_period_ms,
            Trigger::Cloud => tuning.cloud_period_ms,
            Trigger::Difficulty => tuning.difficulty_period_ms,
        }
    }
}

/// Time accumulated toward each trigger since it last fired (or was reset)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clock {
    since_fire_ms: [f64; 4],
}

impl Clock {
    /// Cancel all in-progress periods
    pub fn reset(&mut self) {
        self.since_fire_ms = [0.0; 4];
    }

    /// Milliseconds accumulated toward `trigger`
    pub fn progress_ms(&self, trigger: Trigger) -> f64 {
        self.since_fire_ms[trigger as usize]
    }

    /// Advance by `dt_ms` and return the triggers that came due, oldest first
    pub fn advance(&mut self, dt_ms: f64, tuning: &Tuning) -> Vec<Trigger> {
        let mut fired = Vec::new();
        let mut remaining = dt_ms.max(0.0);

        loop {
            if fired.len() >= MAX_TRIGGERS_PER_ADVANCE {
                // Drop the rest of a huge gap instead of replaying it
                log::warn!("Clock fell behind, dropping {:.0}ms", remaining);
                return fired;
            }

            // Soonest trigger; `min_by` keeps the first on ties
            let next = Trigger::ALL
                .iter()
                .map(|t| {
                    let wait = (t.period_ms(tuning) - self.since_fire_ms[*t as usize]).max(0.0);
                    (*t, wait)
                })
                .min_by(|a, b| a.1.total_cmp(&b.1));

            let Some((trigger, wait)) = next else {
                break;
            };
            if wait > remaining {
                break;
            }

            for since in &mut self.since_fire_ms {
                *since += wait;
            }
            self.since_fire_ms[trigger as usize] = 0.0;
            remaining -= wait;
            fired.push(trigger);
        }

        for since in &mut self.since_fire_ms {
            *since += remaining;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn count(fired: &[Trigger], trigger: Trigger) -> usize {
        fired.iter().filter(|t| **t == trigger).count()
    }

    #[test]
    fn test_nothing_fires_early() {
        let tuning = Tuning::default();
        let mut clock = Clock::default();
        assert!(clock.advance(499.0, &tuning).is_empty());
        assert_eq!(clock.advance(1.0, &tuning), vec![Trigger::Spawn, Trigger::Cloud]);
    }

    #[test]
    fn test_simultaneous_triggers_fire_in_order() {
        let tuning = Tuning::default();
        let mut clock = Clock::default();
        let fired = clock.advance(1000.0, &tuning);
        assert_eq!(
            fired,
            vec![
                Trigger::Spawn,
                Trigger::Cloud,
                Trigger::Second,
                Trigger::Spawn,
                Trigger::Cloud,
            ]
        );

        let fired = clock.advance(4000.0, &tuning);
        assert_eq!(fired.last(), Some(&Trigger::Difficulty));
        assert_eq!(count(&fired, Trigger::Second), 4);
        assert_eq!(count(&fired, Trigger::Difficulty), 1);
    }

    #[test]
    fn test_reset_cancels_progress() {
        let tuning = Tuning::default();
        let mut clock = Clock::default();
        clock.advance(900.0, &tuning);
        assert_eq!(clock.progress_ms(Trigger::Second), 900.0);

        clock.reset();
        assert_eq!(clock.progress_ms(Trigger::Second), 0.0);
        // A full period is needed again after reset
        assert!(!clock.advance(900.0, &tuning).contains(&Trigger::Second));
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let tuning = Tuning::default();
        let mut clock = Clock::default();
        assert!(clock.advance(-50.0, &tuning).is_empty());
        assert_eq!(clock.progress_ms(Trigger::Spawn), 0.0);
    }

    #[test]
    fn test_huge_gap_is_capped() {
        let tuning = Tuning::default();
        let mut clock = Clock::default();
        let fired = clock.advance(1.0e9, &tuning);
        assert_eq!(fired.len(), MAX_TRIGGERS_PER_ADVANCE);
    }

    proptest! {
        #[test]
        fn prop_frame_chopping_does_not_change_trigger_counts(
            seconds in 1u32..20,
            frame_ms in 1u32..250,
        ) {
            let tuning = Tuning::default();
            let mut clock = Clock::default();
            let total = seconds as u64 * 1000;
            let mut elapsed = 0u64;
            let mut fired = Vec::new();
            while elapsed < total {
                let step = (frame_ms as u64).min(total - elapsed);
                fired.extend(clock.advance(step as f64, &tuning));
                elapsed += step;
            }
            prop_assert_eq!(count(&fired, Trigger::Second), seconds as usize);
            prop_assert_eq!(count(&fired, Trigger::Spawn), seconds as usize * 2);
            prop_assert_eq!(count(&fired, Trigger::Cloud), seconds as usize * 2);
            prop_assert_eq!(count(&fired, Trigger::Difficulty), seconds as usize / 5);
        }
    }
}
