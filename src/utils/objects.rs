// This file defines the various objects, resources, and components used in the game.
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::utils::constants::game_constants::{SCORE_FONT_SIZE, SEED};

/// A resource for random number generation.
#[derive(Resource)]
pub struct RandomGen {
    pub random_gen: ChaCha8Rng,
}

impl RandomGen {
    // Creates a new `RandomGen` from a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGen {
    // Creates a new `RandomGen` with the default seed.
    fn default() -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(SEED),
        }
    }
}

/// Number of sixes rolled so far. Monotonically non-decreasing.
#[derive(Resource, Default, Debug)]
pub struct Score(pub u32);

/// Whether the roll trigger is currently accepted. Driven exclusively by the
/// animator's ControlEnabled events.
#[derive(Resource, Debug)]
pub struct RollControl {
    pub enabled: bool,
}

impl Default for RollControl {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Cosmetic emphasis targets for the bonus sequence. The animation systems
/// ease the die scale and score text size toward these values every frame.
#[derive(Resource, Debug)]
pub struct DieEmphasis {
    pub target_scale: f32,
    pub shaking: bool,
    pub score_font_size: f32,
}

impl Default for DieEmphasis {
    fn default() -> Self {
        Self {
            target_scale: 1.0,
            shaking: false,
            score_font_size: SCORE_FONT_SIZE,
        }
    }
}

/// A component that marks the die root entity, whose transform the animator poses.
#[derive(Component)]
pub struct Die;

/// A component that marks one face of the die.
#[derive(Component)]
pub struct DieFace {
    pub value: u8,
    pub normal: Vec3,
}

/// A component that marks the score display text.
#[derive(Component)]
pub struct ScoreText;

/// A component that marks the roll hint text.
#[derive(Component)]
pub struct HintText;
