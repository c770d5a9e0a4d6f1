use crate::ring::{Ring, RingEvent, RingId};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::time::Duration;

/// Identity of one scheduled delay timer. Never reused within a choreographer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Instants at which each ring's delay elapses when activation flips on at
/// `toggled_at`. Pure: the same delays always give the same wave.
pub fn activation_schedule(delays: &[Duration], toggled_at: Duration) -> Vec<Duration> {
    delays.iter().map(|d| toggled_at + *d).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingTimer {
    token: TimerToken,
    fires_at: Duration,
}

/// Owns every per-ring delay timer; rings only hold the token they wait on.
#[derive(Clone, Debug, Default)]
pub struct Choreographer {
    active: bool,
    toggled_at: Option<Duration>,
    pending: FnvHashMap<RingId, PendingTimer>,
    next_token: u64,
}

impl Choreographer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Instant of the last effective toggle.
    pub fn toggled_at(&self) -> Option<Duration> {
        self.toggled_at
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// When the pending timer of `id` fires, if it has one.
    pub fn fires_at(&self, id: RingId) -> Option<Duration> {
        self.pending.get(&id).map(|t| t.fires_at)
    }

    fn issue(&mut self) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        token
    }

    /// Apply the global activation signal. Repeating the current value is a
    /// no-op; returns whether anything changed.
    pub fn on_global_toggle(&mut self, active: bool, now: Duration, rings: &mut [Ring]) -> bool {
        if active == self.active {
            return false;
        }
        self.active = active;
        self.toggled_at = Some(now);

        if active {
            let delays: Vec<Duration> = rings.iter().map(|r| r.config().delay).collect();
            let schedule = activation_schedule(&delays, now);
            for (ring, fires_at) in rings.iter_mut().zip(schedule) {
                let token = self.issue();
                // insert replaces, so a ring never has two live timers
                self.pending.insert(ring.id(), PendingTimer { token, fires_at });
                ring.handle(RingEvent::Activate(token));
            }
            log::info!("[choreo] activated at {:?}, {} timers", now, self.pending.len());
        } else {
            let cancelled = self.pending.len();
            self.pending.clear();
            for ring in rings.iter_mut() {
                ring.handle(RingEvent::Deactivate);
            }
            log::info!("[choreo] deactivated at {:?}, cancelled {} timers", now, cancelled);
        }
        true
    }

    /// Fire every timer due at `now`, earliest first, ties by ring id.
    pub fn poll(&mut self, now: Duration, rings: &mut [Ring]) -> SmallVec<[RingId; 8]> {
        let mut due: SmallVec<[(Duration, RingId, TimerToken); 8]> = self
            .pending
            .iter()
            .filter(|(_, t)| t.fires_at <= now)
            .map(|(id, t)| (t.fires_at, *id, t.token))
            .collect();
        due.sort_unstable();

        let mut fired = SmallVec::new();
        for (_, id, token) in due {
            self.pending.remove(&id);
            match rings.iter_mut().find(|r| r.id() == id) {
                Some(ring) => {
                    ring.handle(RingEvent::DelayElapsed(token));
                    fired.push(id);
                }
                None => log::warn!("[choreo] timer for unknown ring {id}"),
            }
        }
        fired
    }
}
