//! Movement domain: locomotion systems driving the character motor.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::collisions::AvianGroundProbe;
use crate::movement::{Animator, CharacterMotor, MotorInput, PhysicsBody, Player, PlayerDamaged};

/// [`PhysicsBody`] over an avian [`LinearVelocity`]. Impulses become a
/// velocity change of `impulse / mass`.
pub(crate) struct AvianBody<'a> {
    velocity: &'a mut LinearVelocity,
    mass: f32,
}

impl<'a> AvianBody<'a> {
    pub(crate) fn new(velocity: &'a mut LinearVelocity, mass: f32) -> Self {
        Self { velocity, mass }
    }
}

impl PhysicsBody for AvianBody<'_> {
    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        if self.mass <= 0.0 || !self.mass.is_finite() {
            warn!("Ignoring impulse {:?}: invalid mass {}", impulse, self.mass);
            return;
        }
        self.velocity.0 += impulse / self.mass;
    }
}

pub(crate) fn sample_motor_input(
    input: Res<MotorInput>,
    mut query: Query<
        (
            &mut CharacterMotor,
            &mut LinearVelocity,
            &ComputedMass,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    for (mut motor, mut velocity, mass, mut animator) in &mut query {
        let mut body = AvianBody::new(&mut velocity, mass.value());
        if let Some(outcome) = motor.sample_input(&*input, &mut body, &mut *animator) {
            debug!(
                "Jump request: {:?}, eligibility now {:?}",
                outcome,
                motor.jump_eligibility()
            );
        }
    }
}

pub(crate) fn update_facing(mut query: Query<(&mut CharacterMotor, &mut Transform), With<Player>>) {
    for (mut motor, mut transform) in &mut query {
        motor.update_facing(&mut *transform);
    }
}

pub(crate) fn advance_motor(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            Entity,
            &Transform,
            &mut CharacterMotor,
            &mut LinearVelocity,
            &ComputedMass,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut motor, mut velocity, mass, mut animator) in &mut query {
        let probe = AvianGroundProbe::new(&spatial_query, entity);
        let mut body = AvianBody::new(&mut velocity, mass.value());
        motor.advance(
            dt,
            transform.translation.truncate(),
            &mut body,
            &probe,
            &mut *animator,
        );
    }
}

pub(crate) fn handle_player_damaged(
    mut damage_events: MessageReader<PlayerDamaged>,
    mut query: Query<(&CharacterMotor, &mut Animator)>,
) {
    for event in damage_events.read() {
        if let Ok((motor, mut animator)) = query.get_mut(event.entity) {
            motor.on_damaged(&mut *animator);
            debug!("Player {:?} damaged", event.entity);
        }
    }
}
