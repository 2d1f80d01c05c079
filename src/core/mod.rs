//! Core domain: camera and world physics settings.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Downward gravity in meters per second squared.
pub const WORLD_GRAVITY: f32 = 30.0;

/// World meters per screen pixel.
const CAMERA_SCALE: f32 = 1.0 / 48.0;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Gravity(Vec2::NEG_Y * WORLD_GRAVITY))
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        }),
    ));
}
