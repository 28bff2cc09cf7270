use crate::error::SimulationError;
use des::Timeline;

/// One service position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Teller {
    id: usize,
    next_available: u64,
}

impl Teller {
    fn new(id: usize) -> Self {
        Teller {
            id,
            next_available: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn next_available(&self) -> u64 {
        self.next_available
    }

    /// Book the teller until `until`; the free time never moves backwards.
    pub(crate) fn occupy_until(&mut self, until: u64) {
        debug_assert!(until >= self.next_available);
        self.next_available = self.next_available.max(until);
    }
}

/// Tellers keyed by next-available time, earliest first
///
/// Equal free times resolve to the lower teller id, which keeps assignments
/// reproducible for a fixed arrival sequence.
pub struct TellerPool {
    timeline: Timeline<Teller>,
    size: usize,
}

impl TellerPool {
    /// Pool of `count` idle tellers with ids `1..=count`
    pub fn new(count: usize) -> Self {
        let timeline = (1..=count).map(|id| (0, id, Teller::new(id))).collect();
        TellerPool {
            timeline,
            size: count,
        }
    }

    /// Number of tellers the pool was created with
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of tellers currently in the pool
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Remove the teller that frees up first
    pub fn take_earliest(&mut self) -> Result<Teller, SimulationError> {
        self.timeline
            .pop()
            .map(|(_, _, teller)| teller)
            .ok_or(SimulationError::EmptyPool)
    }

    /// Put a teller back under its (possibly updated) free time
    pub fn release(&mut self, teller: Teller) {
        debug_assert!(self.timeline.len() < self.size, "pool already full");
        self.timeline.push(teller.next_available, teller.id, teller);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pool_is_idle_and_ordered_by_id() {
        let mut pool = TellerPool::new(3);
        assert_eq!(pool.size(), 3);
        assert_eq!(pool.len(), 3);

        let first = pool.take_earliest().unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(first.next_available(), 0);
    }

    #[test]
    fn earliest_free_teller_comes_first() {
        let mut pool = TellerPool::new(2);
        let mut one = pool.take_earliest().unwrap();
        one.occupy_until(100);
        pool.release(one);

        let next = pool.take_earliest().unwrap();
        assert_eq!(next.id(), 2);
        assert_eq!(next.next_available(), 0);
    }

    #[test]
    fn simultaneous_release_resolves_to_lower_id() {
        let mut pool = TellerPool::new(3);
        let mut a = pool.take_earliest().unwrap();
        let mut b = pool.take_earliest().unwrap();
        let mut c = pool.take_earliest().unwrap();
        a.occupy_until(50);
        b.occupy_until(40);
        c.occupy_until(40);

        // release in reverse to show insertion order does not matter
        pool.release(c);
        pool.release(b);
        pool.release(a);

        assert_eq!(pool.take_earliest().unwrap().id(), 2);
        assert_eq!(pool.take_earliest().unwrap().id(), 3);
        assert_eq!(pool.take_earliest().unwrap().id(), 1);
    }

    #[test]
    fn empty_pool_fails() {
        let mut pool = TellerPool::new(1);
        pool.take_earliest().unwrap();
        assert!(pool.is_empty());
        assert_eq!(pool.take_earliest(), Err(SimulationError::EmptyPool));

        let mut none = TellerPool::new(0);
        assert_eq!(none.take_earliest(), Err(SimulationError::EmptyPool));
    }
}
