//! Movement domain: the external services a character motor drives.
//!
//! The motor never looks anything up on its own. Each entry point receives
//! the services it needs, so the same motor runs against avian bodies in the
//! game and against plain structs in tests.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

/// A rigid body exposing planar velocity and instantaneous impulses.
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;

    fn set_velocity(&mut self, velocity: Vec2);

    /// Apply an instantaneous change in momentum.
    fn apply_impulse(&mut self, impulse: Vec2);
}

/// Point-and-radius overlap test against a set of collision layers.
pub trait GroundProbe {
    fn overlaps(&self, point: Vec2, radius: f32, mask: LayerMask) -> bool;
}

/// Float parameters understood by the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimFloat {
    Speed,
}

/// Boolean parameters understood by the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimBool {
    IsGrounded,
    IsCrouching,
}

/// One-shot triggers understood by the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimTrigger {
    Jump,
    DoubleJump,
    Hit,
}

impl AnimFloat {
    pub fn name(self) -> &'static str {
        match self {
            AnimFloat::Speed => "Speed",
        }
    }
}

impl AnimBool {
    pub fn name(self) -> &'static str {
        match self {
            AnimBool::IsGrounded => "IsGrounded",
            AnimBool::IsCrouching => "IsCrouching",
        }
    }
}

impl AnimTrigger {
    pub fn name(self) -> &'static str {
        match self {
            AnimTrigger::Jump => "Jump",
            AnimTrigger::DoubleJump => "DoubleJump",
            AnimTrigger::Hit => "Hit",
        }
    }
}

/// Receives motion parameters and trigger pulses.
pub trait AnimationDriver {
    fn set_float(&mut self, param: AnimFloat, value: f32);

    fn set_bool(&mut self, param: AnimBool, value: bool);

    fn fire(&mut self, trigger: AnimTrigger);
}

/// Raw directional and jump input for one frame.
pub trait MotorInputSource {
    /// Horizontal axis in [-1, 1].
    fn horizontal_axis(&self) -> f32;

    /// Vertical axis in [-1, 1]. Negative means down.
    fn vertical_axis(&self) -> f32;

    /// Whether jump went down this frame.
    fn jump_pressed(&self) -> bool;
}

/// The visual that gets mirrored when the character turns around.
pub trait FacingVisual {
    fn mirror_horizontal(&mut self);
}

impl FacingVisual for Transform {
    fn mirror_horizontal(&mut self) {
        self.scale.x = -self.scale.x;
    }
}
