use crate::catalog::CatalogItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeverPhase {
    Idle,
    Active,
}

/// Outcome of a gauge-crossing entry attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeverEntry {
    Entered,
    /// Empty snapshot: the machine enters and exits in the same step, with
    /// no active window. The caller emits both notifications.
    EmptyPool,
    AlreadyActive,
}

/// Timed bonus state. The machine is tick-driven and owns no timer; the UI
/// layer drives `tick` from a single cancellable interval.
#[derive(Debug, Clone)]
pub struct FeverMachine {
    phase: FeverPhase,
    gauge: u32,
    threshold: u32,
    duration_ms: u32,
    remaining_ms: i64,
    pool: Vec<CatalogItem>,
}

impl FeverMachine {
    pub fn new(threshold: u32, duration_ms: u32) -> Self {
        Self {
            phase: FeverPhase::Idle,
            gauge: 0,
            threshold,
            duration_ms,
            remaining_ms: 0,
            pool: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == FeverPhase::Active
    }

    pub fn gauge(&self) -> u32 {
        self.gauge
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Snapshot pool while active; empty when idle.
    pub fn pool(&self) -> &[CatalogItem] {
        &self.pool
    }

    /// Fraction of the countdown still left, for the gauge bar.
    pub fn fraction_remaining(&self) -> f64 {
        if !self.is_active() || self.duration_ms == 0 {
            return 0.0;
        }
        (self.remaining_ms.max(0) as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Counts one accepted swipe. The gauge only accumulates while idle;
    /// returns true when this accept filled it.
    pub fn record_accept(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.gauge += 1;
        self.gauge >= self.threshold
    }

    /// Attempts entry with the pool snapshotted by the caller. Entering
    /// while already active is an explicitly guarded no-op; the gauge resets
    /// whichever way the attempt resolves.
    pub fn enter(&mut self, snapshot: Vec<CatalogItem>) -> FeverEntry {
        if self.is_active() {
            return FeverEntry::AlreadyActive;
        }
        self.gauge = 0;
        if snapshot.is_empty() {
            return FeverEntry::EmptyPool;
        }
        self.phase = FeverPhase::Active;
        self.remaining_ms = i64::from(self.duration_ms);
        self.pool = snapshot;
        FeverEntry::Entered
    }

    /// Advances the countdown; returns true when this tick ended the fever.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_ms -= i64::from(elapsed_ms);
        if self.remaining_ms <= 0 {
            self.exit();
            return true;
        }
        false
    }

    pub fn exit(&mut self) {
        self.phase = FeverPhase::Idle;
        self.gauge = 0;
        self.remaining_ms = 0;
        self.pool.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};

    fn snapshot() -> Vec<CatalogItem> {
        Catalog::new(vec![crate::catalog::test_person("ami", 2, 0)])
            .items(Category::Primary)
            .to_vec()
    }

    #[test]
    fn gauge_fills_only_while_idle() {
        let mut fever = FeverMachine::new(3, 1000);
        assert!(!fever.record_accept());
        assert!(!fever.record_accept());
        assert!(fever.record_accept());
        assert_eq!(fever.enter(snapshot()), FeverEntry::Entered);
        assert_eq!(fever.gauge(), 0);

        // Accepts while active never move the gauge or re-enter.
        for _ in 0..5 {
            assert!(!fever.record_accept());
        }
        assert_eq!(fever.gauge(), 0);
        assert_eq!(fever.enter(snapshot()), FeverEntry::AlreadyActive);
    }

    #[test]
    fn empty_snapshot_exits_without_active_window() {
        let mut fever = FeverMachine::new(1, 1000);
        assert!(fever.record_accept());
        assert_eq!(fever.enter(Vec::new()), FeverEntry::EmptyPool);
        assert!(!fever.is_active());
        assert_eq!(fever.gauge(), 0);
    }

    #[test]
    fn countdown_expires_and_resets() {
        let mut fever = FeverMachine::new(1, 300);
        fever.record_accept();
        fever.enter(snapshot());
        assert!(fever.is_active());
        assert!(!fever.tick(100));
        assert!((fever.fraction_remaining() - 2.0 / 3.0).abs() < 1e-9);
        assert!(!fever.tick(100));
        assert!(fever.tick(100));
        assert!(!fever.is_active());
        assert_eq!(fever.gauge(), 0);
        assert!(fever.pool().is_empty());
        assert_eq!(fever.fraction_remaining(), 0.0);
    }

    #[test]
    fn tick_while_idle_is_inert() {
        let mut fever = FeverMachine::new(1, 300);
        assert!(!fever.tick(1000));
        assert_eq!(fever.gauge(), 0);
    }
}
