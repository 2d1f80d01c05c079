//! Movement domain: player bootstrap from the loaded motor config.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::WORLD_GRAVITY;
use crate::movement::{
    AnimationPlayback, AnimationState, Animator, CharacterMotor, GameLayer, MotorConfig, Player,
};

/// Player collider and sprite size in world meters.
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.6);

pub(crate) fn spawn_player(
    mut commands: Commands,
    config: Res<MotorConfig>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    info!(
        "Spawning player: move_speed={}, jump_height={:.2}, double_jump_height={:.2}",
        config.move_speed,
        config.jump_height(WORLD_GRAVITY),
        config.double_jump_height(WORLD_GRAVITY)
    );

    commands.spawn((
        // Identity & Motor
        (
            Player,
            CharacterMotor::new(config.clone()),
            Animator::default(),
            AnimationPlayback::default(),
        ),
        // Rendering
        Sprite {
            color: AnimationState::default().tint(),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            // Unit mass so configured impulses equal velocity changes.
            Mass(1.0),
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
        ),
    ));
}
