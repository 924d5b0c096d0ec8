//! Debug functions for the game.
use bevy::{prelude::*, window::*};

use crate::utils::config::RollConfig;
use crate::utils::objects::{Die, DieFace};

pub struct DebugFunctionsPlugin;

impl Plugin for DebugFunctionsPlugin {
    /// Plugin adding the debug key systems to the app.
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (toggle_vsync, toggle_always_six, log_presented_face));
    }
}

/// Toggles VSync when the 'V' key is pressed.
fn toggle_vsync(input: Res<ButtonInput<KeyCode>>, mut window: Query<&mut Window>) {
    if input.just_pressed(KeyCode::KeyV) {
        let Ok(mut window) = window.single_mut() else {
            return;
        };

        window.present_mode = if matches!(window.present_mode, PresentMode::AutoVsync) {
            PresentMode::AutoNoVsync
        } else {
            PresentMode::AutoVsync
        };

        info!("PRESENT_MODE: {:?}", window.present_mode);
    }
}

/// Toggles the always-six cheat when the 'C' key is pressed. Only affects
/// rolls started afterwards; the current one keeps its outcome.
fn toggle_always_six(input: Res<ButtonInput<KeyCode>>, mut config: ResMut<RollConfig>) {
    if input.just_pressed(KeyCode::KeyC) {
        config.always_six = !config.always_six;
        info!("ALWAYS_SIX: {}", config.always_six);
    }
}

/// Logs which face is currently presented to the camera when the 'F' key is
/// pressed. The face whose rotated normal is most aligned with the camera
/// axis wins.
fn log_presented_face(
    input: Res<ButtonInput<KeyCode>>,
    die_query: Query<&Transform, With<Die>>,
    face_query: Query<&DieFace>,
) {
    if !input.just_pressed(KeyCode::KeyF) {
        return;
    }
    let Ok(die_transform) = die_query.single() else {
        return;
    };

    let mut best_value = 0u8;
    let mut best_alignment = f32::MIN;
    for face in &face_query {
        let alignment = (die_transform.rotation * face.normal).dot(Vec3::Z);
        if alignment > best_alignment {
            best_alignment = alignment;
            best_value = face.value;
        }
    }
    info!("Presented face: {best_value} (alignment {best_alignment:.3})");
}
