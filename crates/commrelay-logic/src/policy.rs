//! Session settings controlling relay behaviour.
//!
//! One `RelaySettings` value is read-only for the duration of a query.
//! Difficulty presets follow the usual easy-to-hard progression: harder
//! presets demand crewed labs and take a larger cut of the boost.

use serde::{Deserialize, Serialize};

/// Difficulty presets for [`RelaySettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Easy,
    Normal,
    Moderate,
    Hard,
}

/// Read-only per-session relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    /// Whether the comm-network layer is active at all. When false,
    /// connectivity falls back to a flat scan at strength 0.
    pub network_enabled: bool,
    /// Target vessels must carry a science lab to be listed.
    pub require_lab: bool,
    /// Credit a transmission boost based on connection strength.
    pub boost_enabled: bool,
    /// The boost only applies when the target has a staffed lab.
    pub require_crewed_lab_for_boost: bool,
    /// Fraction of the boost withheld compared to sending data home,
    /// clamped to `[0, 1]`.
    pub transmission_penalty: f64,
    /// The origin node may not act as its own relay; candidates must be
    /// reached through an actual relay hop.
    pub require_relay_hop: bool,
    /// Surface a warning flag for non-repeatable experiments.
    pub show_transmit_warning: bool,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            network_enabled: true,
            require_lab: true,
            boost_enabled: true,
            require_crewed_lab_for_boost: false,
            transmission_penalty: 0.5,
            require_relay_hop: false,
            show_transmit_warning: false,
        }
    }
}

impl RelaySettings {
    /// Settings for a difficulty preset.
    pub fn preset(preset: Preset) -> Self {
        let base = Self::default();
        match preset {
            Preset::Easy => Self {
                require_lab: false,
                require_crewed_lab_for_boost: false,
                transmission_penalty: 0.0,
                ..base
            },
            Preset::Normal => Self {
                require_lab: false,
                require_crewed_lab_for_boost: false,
                transmission_penalty: 0.25,
                ..base
            },
            Preset::Moderate => Self {
                require_lab: false,
                require_crewed_lab_for_boost: true,
                transmission_penalty: 0.5,
                ..base
            },
            Preset::Hard => Self {
                require_lab: true,
                require_crewed_lab_for_boost: true,
                transmission_penalty: 0.75,
                ..base
            },
        }
    }

    /// Penalty clamped to the valid `[0, 1]` range.
    pub fn penalty(&self) -> f64 {
        self.transmission_penalty.clamp(0.0, 1.0)
    }
}
