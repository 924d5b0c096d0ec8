use bevy::prelude::*;

use crate::utils::config::load_config;
use crate::utils::debug_functions::DebugFunctionsPlugin;
use crate::utils::game_functions::{
    advance_roll, animate_die_emphasis, roll_inputs, sync_die_transform, update_hint_text,
    update_score_text,
};
use crate::utils::objects::{DieEmphasis, RandomGen, RollControl, Score};
use crate::utils::roll_animator::RollAnimator;
use crate::utils::setup::setup;

/// Plugins
pub struct DicePlugin;

impl Plugin for DicePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_config())
            .init_resource::<RollAnimator>()
            .init_resource::<RandomGen>()
            .init_resource::<Score>()
            .init_resource::<RollControl>()
            .init_resource::<DieEmphasis>()
            .add_plugins(DebugFunctionsPlugin)
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (
                    // Input before advance, so a request is picked up on the
                    // same frame; rendering sync after both.
                    roll_inputs,
                    advance_roll,
                    sync_die_transform,
                    animate_die_emphasis,
                    update_score_text,
                    update_hint_text,
                )
                    .chain(),
            );
    }
}
