use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatch counters, shared across whatever threads the host logs from.
#[derive(Debug, Default)]
pub struct ForwardStats {
    events_seen: AtomicU64,
    dispatched: AtomicU64,
    suppressed: AtomicU64,
    dropped: AtomicU64,
    send_failures: AtomicU64,
}

impl ForwardStats {
    pub fn record_event(&self) {
        self.events_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_send_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            events_seen: self.events_seen.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub events_seen: u64,
    pub dispatched: u64,
    pub suppressed: u64,
    pub dropped: u64,
    pub send_failures: u64,
}
