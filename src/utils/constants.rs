// Constants used in the game, structured into modules.

/// 3D camera
pub mod camera_3d_constants {
    pub const CAMERA_3D_INITIAL_X: f32 = 0.0;
    pub const CAMERA_3D_INITIAL_Y: f32 = 2.0;
    pub const CAMERA_3D_INITIAL_Z: f32 = 8.0;
}

/// Die object
pub mod die_constants {
    use bevy::prelude::{Color, Vec3};

    pub const MAX_FACE: u8 = 6;

    // Half extent of the cube making up the die.
    pub const DIE_HALF_EXTENT: f32 = 1.0;

    // Euler angles (degrees, XYZ) the die must end on for each face value,
    // so that the rolled face ends up presented to the camera.
    pub const FACE_TARGET_ANGLES: [Vec3; 6] = [
        Vec3::new(90.0, 0.0, 0.0),  // 1
        Vec3::new(0.0, 270.0, 0.0), // 2
        Vec3::new(0.0, 180.0, 0.0), // 3
        Vec3::new(0.0, 0.0, 0.0),   // 4
        Vec3::new(0.0, 90.0, 0.0),  // 5
        Vec3::new(270.0, 0.0, 0.0), // 6
    ];

    // Outward normals of the cube face carrying each value, in the die's
    // local frame. Opposite faces sum to 7, as on a real die.
    pub const FACE_NORMALS: [Vec3; 6] = [
        Vec3::new(0.0, 1.0, 0.0),  // 1
        Vec3::new(1.0, 0.0, 0.0),  // 2
        Vec3::new(0.0, 0.0, -1.0), // 3
        Vec3::new(0.0, 0.0, 1.0),  // 4
        Vec3::new(-1.0, 0.0, 0.0), // 5
        Vec3::new(0.0, -1.0, 0.0), // 6
    ];

    // Colors for each face of the die
    pub const FACE_COLORS: [Color; 6] = [
        Color::srgb(0.9, 0.2, 0.2),
        Color::srgb(0.9, 0.6, 0.1),
        Color::srgb(0.9, 0.9, 0.2),
        Color::srgb(0.2, 0.8, 0.3),
        Color::srgb(0.2, 0.5, 0.9),
        Color::srgb(0.6, 0.3, 0.9),
    ];

    // Pip placement on a face, in units of PIP_SPACING on the face plane.
    pub const PIP_LAYOUTS: [&[(i8, i8)]; 6] = [
        &[(0, 0)],
        &[(-1, -1), (1, 1)],
        &[(-1, -1), (0, 0), (1, 1)],
        &[(-1, -1), (-1, 1), (1, -1), (1, 1)],
        &[(-1, -1), (-1, 1), (0, 0), (1, -1), (1, 1)],
        &[(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 0), (1, 1)],
    ];
    pub const PIP_SPACING: f32 = 0.45;
    pub const PIP_SIZE: f32 = 0.22;
    pub const PIP_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
}

/// Roll animation defaults (overridable through the TOML config)
pub mod roll_constants {
    // Duration of the free-spin phase, in seconds.
    pub const ROLLING_TIME: f32 = 1.0;

    // Angular speed of the free spin, degrees per second.
    pub const INITIAL_SPIN_SPEED: f32 = 1000.0;
    pub const FLOOR_SPIN_SPEED: f32 = 10.0;
    // Rate constant of the exponential-approach speed decay.
    pub const SPIN_DECAY_RATE: f32 = 1.25;

    // Interpolation rate while converging onto the target angles.
    pub const SETTLE_SPEED: f32 = 20.0;
    // Hard ceiling on settling steps; the angle interpolation is asymptotic
    // and may never close within tolerance on its own.
    pub const SETTLE_STEP_BOUND: u32 = 99;
    // Per-axis tolerance (degrees) around 0/360 for the convergence check.
    pub const ANGLE_TOLERANCE: f32 = 0.01;

    // Bonus sequence timeline, in seconds after the die has settled on a 6.
    pub const BONUS_HOLD_TIME: f32 = 0.5;
    pub const BONUS_REVERT_TIME: f32 = 0.5;
}

/// Generic game constants
pub mod game_constants {
    // Seed for the random number generator.
    pub const SEED: u64 = 69;

    // Die emphasis during the bonus sequence.
    pub const BONUS_DIE_SCALE: f32 = 1.75;
    pub const BONUS_SHAKE_AMPLITUDE: f32 = 0.05;
    pub const EMPHASIS_LERP_RATE: f32 = 8.0;

    // Score text sizing.
    pub const SCORE_FONT_SIZE: f32 = 32.0;
    pub const SCORE_FONT_SIZE_PUNCHED: f32 = 64.0;
    pub const HINT_FONT_SIZE: f32 = 24.0;
}
