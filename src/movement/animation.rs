//! Animation driver and playback state for motor-driven characters.
//!
//! [`Animator`] is the parameter sink the motor writes into. Once per frame
//! [`drive_animation`] drains its queued triggers, resolves an
//! [`AnimationState`] and tints the sprite to match.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::{AnimBool, AnimFloat, AnimTrigger, AnimationDriver};

/// Below this speed the character counts as standing still.
const RUN_THRESHOLD: f32 = 0.01;

/// Parameters and pending triggers written by the motor.
#[derive(Component, Debug, Default, Clone)]
pub struct Animator {
    pub speed: f32,
    pub is_grounded: bool,
    pub is_crouching: bool,
    pending: Vec<AnimTrigger>,
}

impl Animator {
    /// Triggers fired since the last drain, oldest first.
    pub fn pending_triggers(&self) -> &[AnimTrigger] {
        &self.pending
    }

    pub fn drain_triggers(&mut self) -> std::vec::Drain<'_, AnimTrigger> {
        self.pending.drain(..)
    }
}

impl AnimationDriver for Animator {
    fn set_float(&mut self, param: AnimFloat, value: f32) {
        match param {
            AnimFloat::Speed => self.speed = value,
        }
    }

    fn set_bool(&mut self, param: AnimBool, value: bool) {
        match param {
            AnimBool::IsGrounded => self.is_grounded = value,
            AnimBool::IsCrouching => self.is_crouching = value,
        }
    }

    fn fire(&mut self, trigger: AnimTrigger) {
        self.pending.push(trigger);
    }
}

/// Animation states for motor-driven characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Crouch,
    Jump,
    DoubleJump,
    Fall,
    Hit,
}

impl AnimationState {
    /// How long a triggered state holds before parameters take over again.
    pub fn one_shot_duration(self) -> Option<f32> {
        match self {
            AnimationState::Jump => Some(0.2),
            AnimationState::DoubleJump => Some(0.25),
            AnimationState::Hit => Some(0.3),
            _ => None,
        }
    }

    pub fn from_trigger(trigger: AnimTrigger) -> Self {
        match trigger {
            AnimTrigger::Jump => AnimationState::Jump,
            AnimTrigger::DoubleJump => AnimationState::DoubleJump,
            AnimTrigger::Hit => AnimationState::Hit,
        }
    }

    /// Sprite tint standing in for real animation frames.
    pub fn tint(self) -> Color {
        match self {
            AnimationState::Idle => Color::srgb(0.9, 0.9, 0.9),
            AnimationState::Run => Color::srgb(0.8, 0.9, 1.0),
            AnimationState::Crouch => Color::srgb(0.6, 0.6, 0.8),
            AnimationState::Jump => Color::srgb(1.0, 0.95, 0.6),
            AnimationState::DoubleJump => Color::srgb(1.0, 0.8, 0.3),
            AnimationState::Fall => Color::srgb(0.7, 0.85, 0.7),
            AnimationState::Hit => Color::srgb(1.0, 0.3, 0.3),
        }
    }

    /// State implied by parameters alone, ignoring triggers.
    pub fn from_params(animator: &Animator) -> Self {
        if !animator.is_grounded {
            AnimationState::Fall
        } else if animator.is_crouching {
            AnimationState::Crouch
        } else if animator.speed > RUN_THRESHOLD {
            AnimationState::Run
        } else {
            AnimationState::Idle
        }
    }
}

/// Current animation state of a character.
#[derive(Component, Debug, Default)]
pub struct AnimationPlayback {
    pub state: AnimationState,
    pub previous_state: AnimationState,
    one_shot_timer: f32,
}

impl AnimationPlayback {
    /// Start the one-shot state for `trigger`. A running hit is not
    /// interrupted by a jump.
    pub fn play_trigger(&mut self, trigger: AnimTrigger) {
        let next = AnimationState::from_trigger(trigger);
        if self.state == AnimationState::Hit
            && self.one_shot_timer > 0.0
            && next != AnimationState::Hit
        {
            return;
        }

        self.set_state(next);
        self.one_shot_timer = next.one_shot_duration().unwrap_or(0.0);
    }

    /// Advance the one-shot timer and fall back to parameter-driven states
    /// once it runs out.
    pub fn resolve(&mut self, dt: f32, animator: &Animator) {
        if self.one_shot_timer > 0.0 {
            self.one_shot_timer -= dt;
            if self.one_shot_timer > 0.0 {
                return;
            }
        }

        self.set_state(AnimationState::from_params(animator));
    }

    fn set_state(&mut self, state: AnimationState) {
        if self.state != state {
            self.previous_state = self.state;
            self.state = state;
        }
    }
}

/// Message fired for every trigger the animator received.
#[derive(Debug)]
pub struct AnimationTriggered {
    pub entity: Entity,
    pub trigger: AnimTrigger,
}

impl Message for AnimationTriggered {}

/// Message fired when animation state changes.
#[derive(Debug)]
pub struct AnimationStateChanged {
    pub entity: Entity,
    pub from: AnimationState,
    pub to: AnimationState,
}

impl Message for AnimationStateChanged {}

pub fn drive_animation(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Animator, &mut AnimationPlayback, &mut Sprite)>,
    mut triggered_events: MessageWriter<AnimationTriggered>,
    mut changed_events: MessageWriter<AnimationStateChanged>,
) {
    let dt = time.delta_secs();

    for (entity, mut animator, mut playback, mut sprite) in &mut query {
        let from = playback.state;

        let triggers: Vec<AnimTrigger> = animator.drain_triggers().collect();
        for trigger in triggers {
            playback.play_trigger(trigger);
            triggered_events.write(AnimationTriggered { entity, trigger });
        }

        playback.resolve(dt, &animator);

        if playback.state != from {
            sprite.color = playback.state.tint();
            changed_events.write(AnimationStateChanged {
                entity,
                from,
                to: playback.state,
            });
        }
    }
}
