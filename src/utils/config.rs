//! Runtime configuration for the roll animation, loaded from a TOML file.
use bevy::prelude::*;
use serde::Deserialize;

use crate::utils::constants::roll_constants::{
    ANGLE_TOLERANCE, BONUS_HOLD_TIME, BONUS_REVERT_TIME, FLOOR_SPIN_SPEED, INITIAL_SPIN_SPEED,
    ROLLING_TIME, SETTLE_SPEED, SETTLE_STEP_BOUND, SPIN_DECAY_RATE,
};

/// File looked up next to the binary; missing file means compiled defaults.
pub const CONFIG_FILE: &str = "dice_game.toml";

/// Tuning values for the roll animation. Every field falls back to its
/// compiled default when absent from the file.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    // Duration of the free-spin phase, seconds.
    pub rolling_time: f32,
    // Initial and floor angular speeds of the free spin, degrees per second.
    pub initial_spin_speed: f32,
    pub floor_spin_speed: f32,
    // Rate constant of the spin speed decay.
    pub spin_decay_rate: f32,
    // Interpolation rate while settling onto the target angles.
    pub settle_speed: f32,
    // Hard ceiling on settling steps.
    pub settle_step_bound: u32,
    // Per-axis tolerance (degrees) for the convergence check.
    pub angle_tolerance: f32,
    // Bonus sequence timings, seconds.
    pub bonus_hold_time: f32,
    pub bonus_revert_time: f32,
    /// Debug override: every roll comes up 6.
    pub always_six: bool,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            rolling_time: ROLLING_TIME,
            initial_spin_speed: INITIAL_SPIN_SPEED,
            floor_spin_speed: FLOOR_SPIN_SPEED,
            spin_decay_rate: SPIN_DECAY_RATE,
            settle_speed: SETTLE_SPEED,
            settle_step_bound: SETTLE_STEP_BOUND,
            angle_tolerance: ANGLE_TOLERANCE,
            bonus_hold_time: BONUS_HOLD_TIME,
            bonus_revert_time: BONUS_REVERT_TIME,
            always_six: false,
        }
    }
}

/// Loads the configuration from `CONFIG_FILE`, falling back to defaults.
/// On wasm there is no filesystem, so the defaults are used as-is.
pub fn load_config() -> RollConfig {
    #[cfg(target_arch = "wasm32")]
    return RollConfig::default();
    #[cfg(not(target_arch = "wasm32"))]
    {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    warn!("Ignoring invalid {CONFIG_FILE}: {err}");
                    RollConfig::default()
                }
            },
            Err(_) => RollConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: RollConfig = toml::from_str("rolling_time = 2.5\nalways_six = true").unwrap();
        assert_eq!(config.rolling_time, 2.5);
        assert!(config.always_six);
        // Untouched fields keep their compiled defaults.
        assert_eq!(config.settle_step_bound, SETTLE_STEP_BOUND);
        assert_eq!(config.initial_spin_speed, INITIAL_SPIN_SPEED);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: RollConfig = toml::from_str("").unwrap();
        assert_eq!(config.rolling_time, ROLLING_TIME);
        assert!(!config.always_six);
    }
}
