//! Long-lived player state.

use serde::{Deserialize, Serialize};

use outbreak_logic::progression::HealthState;

/// The one long-lived record the game mutates: a tick counter plus health.
///
/// Exactly one of these exists per badge, created at boot and mutated only
/// by the tick loop. It is never persisted; a reboot rebuilds it from the
/// same initial values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Completed game ticks since boot.
    pub tick: u64,
    /// Current player health.
    pub health: HealthState,
}

impl PlayerState {
    /// Fresh boot state: tick 0, low end of SuperHealthy, no cat resistance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the boot state in place.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_logic::bands::{band_bounds, Band};

    #[test]
    fn test_boot_values() {
        let player = PlayerState::new();
        assert_eq!(player.tick, 0);
        assert_eq!(player.health.magnitude, band_bounds::SUPER_HEALTHY);
        assert!(!player.health.cat_resistant);
        assert_eq!(player.health.band(), Band::SuperHealthy);
    }

    #[test]
    fn test_reset_restores_boot_state() {
        let mut player = PlayerState::new();
        player.tick = 17;
        player.health.magnitude = 95;
        player.health.cat_resistant = true;

        player.reset();
        assert_eq!(player, PlayerState::new());
    }
}
