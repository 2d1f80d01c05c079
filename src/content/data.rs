//! Serde-facing content definitions.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::{GameLayer, MotorConfig};

/// Motor tuning as written in `motor.ron`. Omitted fields take the
/// [`MotorConfig`] defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotorConfigDef {
    pub move_speed: f32,
    pub jump_force: f32,
    pub double_jump_force: f32,
    pub ground_check_radius: f32,
    pub ground_check_offset: (f32, f32),
    pub ground_layers: Vec<GameLayer>,
}

impl Default for MotorConfigDef {
    fn default() -> Self {
        let config = MotorConfig::default();
        Self {
            move_speed: config.move_speed,
            jump_force: config.jump_force,
            double_jump_force: config.double_jump_force,
            ground_check_radius: config.ground_check_radius,
            ground_check_offset: config.ground_check_offset.into(),
            ground_layers: vec![GameLayer::Ground],
        }
    }
}

impl MotorConfigDef {
    pub fn ground_layer_mask(&self) -> LayerMask {
        LayerMask(
            self.ground_layers
                .iter()
                .fold(0, |bits, layer| bits | layer.to_bits()),
        )
    }
}

impl From<MotorConfigDef> for MotorConfig {
    fn from(def: MotorConfigDef) -> Self {
        let ground_layer_mask = def.ground_layer_mask();
        let (offset_x, offset_y) = def.ground_check_offset;
        Self {
            move_speed: def.move_speed,
            jump_force: def.jump_force,
            double_jump_force: def.double_jump_force,
            ground_check_radius: def.ground_check_radius,
            ground_layer_mask,
            ground_check_offset: Vec2::new(offset_x, offset_y),
        }
    }
}
