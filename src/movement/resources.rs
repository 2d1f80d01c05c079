//! Movement domain: tuning and input resources.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, MotorInputSource};

/// Immutable motor tuning. Inserted as a resource by the content loader and
/// copied into each [`CharacterMotor`](super::CharacterMotor) at spawn.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MotorConfig {
    pub move_speed: f32,
    /// Upward impulse of a grounded jump.
    pub jump_force: f32,
    /// Upward impulse of the single airborne jump.
    pub double_jump_force: f32,
    pub ground_check_radius: f32,
    pub ground_layer_mask: LayerMask,
    /// Ground-check point relative to the character origin while facing right.
    pub ground_check_offset: Vec2,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            jump_force: 14.0,
            double_jump_force: 10.0,
            ground_check_radius: 0.2,
            ground_layer_mask: LayerMask::from(GameLayer::Ground),
            ground_check_offset: Vec2::new(0.0, -0.8),
        }
    }
}

impl MotorConfig {
    /// Apex height of a grounded jump under `gravity`, for a body of unit mass.
    /// Uses h = v² / (2g)
    pub fn jump_height(&self, gravity: f32) -> f32 {
        self.jump_force * self.jump_force / (2.0 * gravity)
    }

    /// Extra height gained by a double jump fired at the apex.
    pub fn double_jump_height(&self, gravity: f32) -> f32 {
        self.double_jump_force * self.double_jump_force / (2.0 * gravity)
    }
}

/// Input sampled this frame.
#[derive(Resource, Debug, Default, Clone)]
pub struct MotorInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
}

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const UP_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];

impl MotorInput {
    /// Map held keys to a digital axis in {-1, 0, 1} per direction.
    /// Opposite keys cancel out.
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> Self {
        let axis = |negative: [KeyCode; 2], positive: [KeyCode; 2]| {
            let mut value = 0.0;
            if keyboard.any_pressed(negative) {
                value -= 1.0;
            }
            if keyboard.any_pressed(positive) {
                value += 1.0;
            }
            value
        };

        Self {
            axis: Vec2::new(axis(LEFT_KEYS, RIGHT_KEYS), axis(DOWN_KEYS, UP_KEYS)),
            jump_just_pressed: keyboard.any_just_pressed(JUMP_KEYS),
        }
    }
}

impl MotorInputSource for MotorInput {
    fn horizontal_axis(&self) -> f32 {
        self.axis.x
    }

    fn vertical_axis(&self) -> f32 {
        self.axis.y
    }

    fn jump_pressed(&self) -> bool {
        self.jump_just_pressed
    }
}
