//! Health band classification.
//!
//! A player's raw health magnitude (lower is healthier) falls into one of
//! seven contiguous, mutually exclusive bands from Immune through Zombie.
//! Every magnitude maps to exactly one band; the rules in
//! [`progression`](crate::progression) and any outside observer interpret
//! health only through these bands.

use serde::{Deserialize, Serialize};

/// Raw health magnitude. Lower is healthier; no upper bound is enforced by
/// the type, the band boundaries give the number its meaning.
pub type Magnitude = u32;

/// Named threshold magnitudes where each band begins.
///
/// These double as clamp targets: the absorbing bands normalize to their
/// threshold, and treatment jumps land on them.
pub mod band_bounds {
    use super::Magnitude;

    /// Clamp value for the Immune band (the band itself spans `0..=1`).
    pub const IMMUNE: Magnitude = 1;
    /// Start of SuperHealthy, and the fresh-player boot value.
    pub const SUPER_HEALTHY: Magnitude = 2;
    /// Start of Healthy, and the floor passive recovery never crosses.
    pub const HEALTHY: Magnitude = 10;
    /// Start of the infected range.
    pub const INFECTED_ASYMPTOMATIC: Magnitude = 40;
    /// Symptoms become visible.
    pub const INFECTED_SYMPTOMATIC: Magnitude = 70;
    /// Late-stage symptoms; the treatment window is closing.
    pub const INFECTED_SYMPTOMATIC_LATE: Magnitude = 90;
    /// Start of Zombie; magnitudes are clamped here once reached.
    pub const ZOMBIE: Magnitude = 99;
}

/// Health bands in increasing severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    /// Magnitude `0..=1` — cannot be infected, terminal.
    Immune,
    /// Magnitude `2..10` — fresh players start here.
    SuperHealthy,
    /// Magnitude `10..40` — ordinary; drifts back toward the boundary.
    Healthy,
    /// Magnitude `40..70` — infected, no visible symptoms yet.
    InfectedAsymptomatic,
    /// Magnitude `70..90` — visibly infected.
    InfectedSymptomatic,
    /// Magnitude `90..99` — last stage treatment can still reach.
    InfectedSymptomaticLate,
    /// Magnitude `99..` — terminal.
    Zombie,
}

impl Band {
    /// All bands in severity order.
    pub const ALL: [Band; 7] = [
        Band::Immune,
        Band::SuperHealthy,
        Band::Healthy,
        Band::InfectedAsymptomatic,
        Band::InfectedSymptomatic,
        Band::InfectedSymptomaticLate,
        Band::Zombie,
    ];

    /// Classify a magnitude. Total: every magnitude lands in exactly one band.
    pub fn from_magnitude(magnitude: Magnitude) -> Self {
        if magnitude <= band_bounds::IMMUNE {
            Self::Immune
        } else if magnitude < band_bounds::HEALTHY {
            Self::SuperHealthy
        } else if magnitude < band_bounds::INFECTED_ASYMPTOMATIC {
            Self::Healthy
        } else if magnitude < band_bounds::INFECTED_SYMPTOMATIC {
            Self::InfectedAsymptomatic
        } else if magnitude < band_bounds::INFECTED_SYMPTOMATIC_LATE {
            Self::InfectedSymptomatic
        } else if magnitude < band_bounds::ZOMBIE {
            Self::InfectedSymptomaticLate
        } else {
            Self::Zombie
        }
    }

    /// Whether this band is any of the three infected sub-bands.
    pub fn is_infected(self) -> bool {
        matches!(
            self,
            Self::InfectedAsymptomatic | Self::InfectedSymptomatic | Self::InfectedSymptomaticLate
        )
    }
}

/// Magnitude `0..=1`: immune, unreachable by infection pressure.
pub fn is_immune(magnitude: Magnitude) -> bool {
    magnitude <= band_bounds::IMMUNE
}

/// Magnitude `2..10`.
pub fn is_super_healthy(magnitude: Magnitude) -> bool {
    (band_bounds::SUPER_HEALTHY..band_bounds::HEALTHY).contains(&magnitude)
}

/// Magnitude `10..40`.
pub fn is_healthy(magnitude: Magnitude) -> bool {
    (band_bounds::HEALTHY..band_bounds::INFECTED_ASYMPTOMATIC).contains(&magnitude)
}

/// Magnitude `40..99`: any infected sub-band, symptomatic or not.
pub fn is_infected(magnitude: Magnitude) -> bool {
    (band_bounds::INFECTED_ASYMPTOMATIC..band_bounds::ZOMBIE).contains(&magnitude)
}

/// Magnitude `40..70`.
pub fn is_infected_asymptomatic(magnitude: Magnitude) -> bool {
    (band_bounds::INFECTED_ASYMPTOMATIC..band_bounds::INFECTED_SYMPTOMATIC).contains(&magnitude)
}

/// Magnitude `70..90`.
pub fn is_infected_symptomatic(magnitude: Magnitude) -> bool {
    (band_bounds::INFECTED_SYMPTOMATIC..band_bounds::INFECTED_SYMPTOMATIC_LATE)
        .contains(&magnitude)
}

/// Magnitude `90..99`.
pub fn is_infected_symptomatic_late(magnitude: Magnitude) -> bool {
    (band_bounds::INFECTED_SYMPTOMATIC_LATE..band_bounds::ZOMBIE).contains(&magnitude)
}

/// Magnitude `99..`: terminal.
pub fn is_zombie(magnitude: Magnitude) -> bool {
    magnitude >= band_bounds::ZOMBIE
}
