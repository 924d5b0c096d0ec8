use bevy::prelude::*;

use crate::log;
use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z,
};
use crate::utils::constants::die_constants::{
    DIE_HALF_EXTENT, FACE_COLORS, FACE_NORMALS, PIP_COLOR, PIP_LAYOUTS, PIP_SIZE, PIP_SPACING,
};
use crate::utils::constants::game_constants::{HINT_FONT_SIZE, SCORE_FONT_SIZE};
use crate::utils::objects::{Die, DieFace, HintText, ScoreText};

/// Systems
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera
    commands.spawn((
        Camera3d::default(),
        // Fixed position looking at the die in the origin
        Transform::from_xyz(CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z)
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Light
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 6.0, 4.0),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 100.0,
        affects_lightmapped_meshes: true,
    });

    // Shared pip mesh and material
    let pip_mesh = meshes.add(Sphere::new(PIP_SIZE / 2.0));
    let pip_material = materials.add(StandardMaterial {
        base_color: PIP_COLOR,
        ..default()
    });

    // Die - 6 quad faces plus their pips, children of one rotated root
    commands
        .spawn((Die, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            for (index, normal) in FACE_NORMALS.iter().enumerate() {
                let value = (index + 1) as u8;
                let n = *normal;

                // In-plane basis of the face
                let (u, v) = if n.y.abs() > 0.5 {
                    (Vec3::X, Vec3::Z)
                } else if n.x.abs() > 0.5 {
                    (Vec3::Z, Vec3::Y)
                } else {
                    (Vec3::X, Vec3::Y)
                };

                let center = n * DIE_HALF_EXTENT;
                let corner1 = center - u * DIE_HALF_EXTENT - v * DIE_HALF_EXTENT;
                let corner2 = center + u * DIE_HALF_EXTENT - v * DIE_HALF_EXTENT;
                let corner3 = center + u * DIE_HALF_EXTENT + v * DIE_HALF_EXTENT;
                let corner4 = center - u * DIE_HALF_EXTENT + v * DIE_HALF_EXTENT;

                let mut mesh = Mesh::new(
                    bevy::mesh::PrimitiveTopology::TriangleList,
                    Default::default(),
                );

                // Two triangles per face
                let positions = vec![
                    corner1.to_array(),
                    corner2.to_array(),
                    corner3.to_array(),
                    corner1.to_array(),
                    corner3.to_array(),
                    corner4.to_array(),
                ];
                let normals = vec![n.to_array(); 6];

                mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
                mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
                mesh.insert_attribute(
                    Mesh::ATTRIBUTE_UV_0,
                    vec![
                        [0.0, 0.0],
                        [1.0, 0.0],
                        [1.0, 1.0],
                        [0.0, 0.0],
                        [1.0, 1.0],
                        [0.0, 1.0],
                    ],
                );

                parent.spawn((
                    Mesh3d(meshes.add(mesh)),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: FACE_COLORS[index],
                        cull_mode: None, // Disable backface culling - render both sides
                        double_sided: true,
                        ..default()
                    })),
                    Transform::default(),
                    DieFace { value, normal: n },
                ));

                // Pips sit on the face plane in the same (u, v) basis
                for (a, b) in PIP_LAYOUTS[index] {
                    let offset = u * (*a as f32 * PIP_SPACING) + v * (*b as f32 * PIP_SPACING);
                    parent.spawn((
                        Mesh3d(pip_mesh.clone()),
                        MeshMaterial3d(pip_material.clone()),
                        Transform::from_translation(center + offset),
                    ));
                }
            }
        });

    // UI texts
    commands.spawn((
        Text::new("Score: 0"),
        TextFont {
            font_size: SCORE_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));
    commands.spawn((
        Text::new("Press SPACE to roll"),
        TextFont {
            font_size: HINT_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HintText,
    ));

    log!("Dice game started!");
    log!("Press SPACE to roll - a 6 scores a point");
}
