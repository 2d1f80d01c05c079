//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Mutable per-character motor state. Owned by [`CharacterMotor`](super::CharacterMotor).
#[derive(Debug, Clone, PartialEq)]
pub struct MotorState {
    pub is_grounded: bool,
    /// Set by a grounded jump, consumed by one airborne jump, cleared on landing.
    pub can_double_jump: bool,
    pub is_crouching: bool,
    pub is_facing_right: bool,
    /// Horizontal axis in [-1, 1].
    pub horizontal_input: f32,
}

impl Default for MotorState {
    fn default() -> Self {
        Self {
            is_grounded: false,
            can_double_jump: false,
            is_crouching: false,
            is_facing_right: true,
            horizontal_input: 0.0,
        }
    }
}

/// Position in the jump eligibility state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEligibility {
    GroundedAvailable,
    AirborneCanDouble,
    AirborneSpent,
}

/// Which branch a jump request took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    Grounded,
    Double,
    Denied,
}

/// Sent when something damages a character. Handled by forwarding a hit
/// trigger to the character's animator.
#[derive(Debug, Clone, Copy)]
pub struct PlayerDamaged {
    pub entity: Entity,
}

impl bevy::ecs::message::Message for PlayerDamaged {}
