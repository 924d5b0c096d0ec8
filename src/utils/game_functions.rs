//! Core game logic and UI functions: per-frame advancement of the roll
//! state machine and the systems reacting to its events.
use bevy::prelude::*;
use rand::Rng;

use crate::utils::config::RollConfig;
use crate::utils::constants::game_constants::{
    BONUS_DIE_SCALE, BONUS_SHAKE_AMPLITUDE, EMPHASIS_LERP_RATE, SCORE_FONT_SIZE,
    SCORE_FONT_SIZE_PUNCHED,
};
use crate::utils::objects::{Die, DieEmphasis, HintText, RandomGen, RollControl, Score, ScoreText};
use crate::utils::roll_animator::{RollAnimator, RollEvent};

/// Starts a roll when SPACE is pressed and the trigger is enabled. The
/// animator independently drops requests arriving mid-roll.
pub fn roll_inputs(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<RollConfig>,
    mut animator: ResMut<RollAnimator>,
    mut random_gen: ResMut<RandomGen>,
    mut control: ResMut<RollControl>,
    mut score: ResMut<Score>,
    mut emphasis: ResMut<DieEmphasis>,
) {
    if !keyboard.just_pressed(KeyCode::Space) || !control.enabled {
        return;
    }
    let mut events = Vec::new();
    animator.request_roll(&config, &mut random_gen.random_gen, &mut events);
    if !events.is_empty() {
        apply_events(&events, &mut control, &mut score, &mut emphasis);
        info!("Rolling... outcome already decided: {:?}", animator.outcome());
    }
}

/// Advances the roll state machine by the frame delta and applies whatever
/// events it emitted.
pub fn advance_roll(
    time: Res<Time>,
    config: Res<RollConfig>,
    mut animator: ResMut<RollAnimator>,
    mut control: ResMut<RollControl>,
    mut score: ResMut<Score>,
    mut emphasis: ResMut<DieEmphasis>,
) {
    let mut events = Vec::new();
    animator.advance(time.delta_secs(), &config, &mut events);
    // Only touch the resources when something actually happened, so their
    // change detection stays meaningful for the UI systems.
    if !events.is_empty() {
        apply_events(&events, &mut control, &mut score, &mut emphasis);
    }
}

/// Routes animator events to the resources owned by the surrounding game.
fn apply_events(
    events: &[RollEvent],
    control: &mut RollControl,
    score: &mut Score,
    emphasis: &mut DieEmphasis,
) {
    for event in events {
        match event {
            RollEvent::ControlEnabled(enabled) => control.enabled = *enabled,
            RollEvent::ScoreIncrement => {
                score.0 += 1;
                info!("Rolled a 6! Score is now {}", score.0);
            }
            RollEvent::BonusEmphasisBegan => {
                emphasis.target_scale = BONUS_DIE_SCALE;
                emphasis.shaking = true;
                emphasis.score_font_size = SCORE_FONT_SIZE_PUNCHED;
            }
            RollEvent::BonusEmphasisReverting => {
                emphasis.target_scale = 1.0;
                emphasis.shaking = false;
                emphasis.score_font_size = SCORE_FONT_SIZE;
            }
        }
    }
}

/// Copies the animator's orientation onto the die entity.
pub fn sync_die_transform(
    animator: Res<RollAnimator>,
    mut die_query: Query<&mut Transform, With<Die>>,
) {
    let Ok(mut transform) = die_query.single_mut() else {
        return;
    };
    transform.rotation = animator.rotation();
}

/// Eases the die scale toward the emphasis target and shakes it while the
/// bonus celebration is up. Purely cosmetic; never writes the rotation.
pub fn animate_die_emphasis(
    time: Res<Time>,
    emphasis: Res<DieEmphasis>,
    mut random_gen: ResMut<RandomGen>,
    mut die_query: Query<&mut Transform, With<Die>>,
) {
    let Ok(mut transform) = die_query.single_mut() else {
        return;
    };

    let t = (EMPHASIS_LERP_RATE * time.delta_secs()).min(1.0);
    transform.scale = transform.scale.lerp(Vec3::splat(emphasis.target_scale), t);

    if emphasis.shaking {
        let rng = &mut random_gen.random_gen;
        transform.translation = Vec3::new(
            rng.random_range(-BONUS_SHAKE_AMPLITUDE..=BONUS_SHAKE_AMPLITUDE),
            rng.random_range(-BONUS_SHAKE_AMPLITUDE..=BONUS_SHAKE_AMPLITUDE),
            rng.random_range(-BONUS_SHAKE_AMPLITUDE..=BONUS_SHAKE_AMPLITUDE),
        );
    } else {
        transform.translation = Vec3::ZERO;
    }
}

/// Keeps the score display in sync with the counter and eases its size
/// toward the emphasis target.
pub fn update_score_text(
    time: Res<Time>,
    score: Res<Score>,
    emphasis: Res<DieEmphasis>,
    mut text_query: Query<(&mut Text, &mut TextFont), With<ScoreText>>,
) {
    let Ok((mut text, mut font)) = text_query.single_mut() else {
        return;
    };
    if score.is_changed() {
        *text = Text::new(format!("Score: {}", score.0));
    }
    let t = (EMPHASIS_LERP_RATE * time.delta_secs()).min(1.0);
    font.font_size += (emphasis.score_font_size - font.font_size) * t;
}

/// Swaps the hint line depending on whether a roll can be started.
pub fn update_hint_text(
    control: Res<RollControl>,
    mut text_query: Query<&mut Text, With<HintText>>,
) {
    if !control.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    *text = if control.enabled {
        Text::new("Press SPACE to roll")
    } else {
        Text::new("Rolling...")
    };
}
