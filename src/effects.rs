//! Transient flags that switch themselves off after a fixed amount of calendar time.
//!
//! Each armed effect carries the timestamp at which it expires. The engine calls
//! [`DeferredEffects::expire`] with every frame timestamp, so nothing depends on an outside
//! timer firing a callback.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// The snake has just eaten.
    JustAte,
    /// A new piece of food has just appeared.
    JustSpawned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    effect: Effect,
    expires_at: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct DeferredEffects {
    pending: Vec<Pending>,
}

impl DeferredEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns `effect` on until `now + lifetime`. A previous arming of the same effect is
    /// cancelled.
    pub fn arm(&mut self, effect: Effect, now: Duration, lifetime: Duration) {
        self.pending.retain(|p| p.effect != effect);
        self.pending.push(Pending {
            effect,
            expires_at: now + lifetime,
        });
    }

    /// Drops every effect whose expiry is at or before `now`.
    pub fn expire(&mut self, now: Duration) {
        self.pending.retain(|p| p.expires_at > now);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_active(&self, effect: Effect) -> bool {
        self.pending.iter().any(|p| p.effect == effect)
    }
}
