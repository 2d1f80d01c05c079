//! Movement domain: test arena for exercising the motor.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::GameLayer;

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    // (position, size, color)
    let surfaces = [
        // Floor
        (Vec2::new(0.0, -4.0), Vec2::new(24.0, 1.0), ground_color),
        // Low platform, left
        (Vec2::new(-6.0, -1.0), Vec2::new(4.0, 0.4), platform_color),
        // Mid platform, right
        (Vec2::new(5.0, 1.0), Vec2::new(4.0, 0.4), platform_color),
        // High platform, center (double jump from the low platform)
        (Vec2::new(-0.5, 4.0), Vec2::new(3.0, 0.4), platform_color),
    ];

    for (position, size, color) in surfaces {
        commands.spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        ));
    }
}
