/// Cross-cycle scheduler state: when the last action was executed.
///
/// `last_action_at` is unix seconds and starts at 0, so the first tick after
/// startup is always eligible. Only executed actions move it; a hold does not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CooldownState {
    pub last_action_at: u64,
}

impl CooldownState {
    #[inline]
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_action_at)
    }

    /// Seconds left in the cooldown window, or `None` once it has elapsed.
    #[inline]
    pub fn remaining(&self, now: u64, cooldown_secs: u64) -> Option<u64> {
        let elapsed = self.elapsed(now);
        if elapsed < cooldown_secs {
            Some(cooldown_secs - elapsed)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_eligible(&self, now: u64, cooldown_secs: u64) -> bool {
        self.remaining(now, cooldown_secs).is_none()
    }

    #[inline]
    pub fn record_action(&mut self, now: u64) {
        self.last_action_at = now;
    }
}
