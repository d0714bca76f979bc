use std::collections::BTreeMap;
use std::time::Duration;

/// Identifies one scheduled sequence.
///
/// Every call to [`Sequencer::begin()`] or [`Sequencer::cancel()`] moves to a
/// new generation, after which steps scheduled under an older one are stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// A step that became due, together with the sequence it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Due<S> {
    pub at: Duration,
    pub generation: Generation,
    pub step: S,
}

/// Schedules steps at absolute points on a virtual clock.
///
/// Nothing runs on its own. The owner pulls due steps with
/// [`pop_due()`](Self::pop_due) whenever its clock moves forward.
#[derive(Clone, Debug)]
pub struct Sequencer<S> {
    generation: Generation,
    // Keyed by due time, then insertion order, so steps due at the same
    // instant come out in the order they were scheduled.
    queue: BTreeMap<(Duration, u64), (Generation, S)>,
    next_insertion: u64,
}

impl<S> Default for Sequencer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Sequencer<S> {
    pub fn new() -> Self {
        Self {
            generation: Generation(0),
            queue: BTreeMap::new(),
            next_insertion: 0,
        }
    }

    /// Starts a new sequence, invalidating whatever is still queued.
    pub fn begin(&mut self) -> Generation {
        self.cancel();
        self.generation
    }

    /// Drops all queued steps and moves to a fresh generation.
    pub fn cancel(&mut self) {
        self.generation = Generation(self.generation.0 + 1);
        self.queue.clear();
    }

    pub fn current(&self) -> Generation {
        self.generation
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    /// Queues `step` to become due at `at`.
    ///
    /// Steps for a generation other than the current one are discarded.
    pub fn schedule(&mut self, generation: Generation, at: Duration, step: S) {
        if generation != self.generation {
            return;
        }
        self.queue
            .insert((at, self.next_insertion), (generation, step));
        self.next_insertion += 1;
    }

    /// Removes and returns the earliest step due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Due<S>> {
        let (&(at, _), _) = self.queue.first_key_value()?;
        if at > now {
            return None;
        }
        let (_, (generation, step)) = self.queue.pop_first()?;
        Some(Due {
            at,
            generation,
            step,
        })
    }

    /// When the next queued step is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(at, _)| at)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn steps_come_out_in_time_order() {
        let mut seq = Sequencer::new();
        let gen = seq.begin();
        seq.schedule(gen, ms(300), "c");
        seq.schedule(gen, ms(100), "a");
        seq.schedule(gen, ms(200), "b");
        seq.schedule(gen, ms(200), "b2");

        assert_eq!(seq.next_due(), Some(ms(100)));
        assert!(seq.pop_due(ms(50)).is_none());
        let steps: Vec<&str> =
            std::iter::from_fn(|| seq.pop_due(ms(250)).map(|d| d.step)).collect();
        assert_eq!(steps, vec!["a", "b", "b2"]);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.pop_due(ms(1000)).map(|d| d.at), Some(ms(300)));
        assert!(seq.is_empty());
    }

    #[test]
    fn cancelled_sequence_cannot_schedule_or_fire() {
        let mut seq = Sequencer::new();
        let old = seq.begin();
        seq.schedule(old, ms(100), 1);
        seq.cancel();
        assert!(seq.pop_due(ms(1000)).is_none());

        seq.schedule(old, ms(200), 2);
        assert!(seq.is_empty());

        let new = seq.begin();
        assert_ne!(old, new);
        assert!(!seq.is_current(old));
        seq.schedule(new, ms(200), 3);
        let due = seq.pop_due(ms(200)).unwrap();
        assert_eq!(due.step, 3);
        assert_eq!(due.generation, new);
    }
}
