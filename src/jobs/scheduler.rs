// ==================== TIMER QUEUE ====================
// Tarefas adiadas do portal (debounce da busca, limpeza do formulário).
// Nada dispara sozinho: o dono consulta `take_due` com o relógio atual.

use std::time::Duration;

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Clock backed by the tokio timer.
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }

    /// Converts a deadline back into a tokio instant, for `sleep_until`.
    pub fn instant_at(&self, at: Duration) -> tokio::time::Instant {
        self.origin + at
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Keyed one-shot timers. Scheduling a key that is already pending replaces
/// it, so each key has at most one pending entry.
#[derive(Debug)]
pub struct TimerQueue<K> {
    pending: Vec<(K, Duration)>,
}

impl<K: Copy + PartialEq + std::fmt::Debug> TimerQueue<K> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    pub fn schedule(&mut self, key: K, at: Duration) {
        self.cancel(key);
        log::debug!("⏰ Scheduled {:?} at {:?}", key, at);
        self.pending.push((key, at));
    }

    /// Returns true when a pending entry was dropped.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(k, _)| *k != key);
        before != self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|(k, _)| *k == key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|(_, at)| *at).min()
    }

    /// Removes and returns every entry due at `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<K> {
        let mut due: Vec<(K, Duration)> = Vec::new();
        self.pending.retain(|(k, at)| {
            if *at <= now {
                due.push((*k, *at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(k, _)| k).collect()
    }
}

impl<K: Copy + PartialEq + std::fmt::Debug> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
