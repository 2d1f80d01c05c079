//! Debug tooling for motor development (feature `dev-tools`).
//!
//! - Draws the ground-check circle of every player
//! - `H` sends a damage message to every player
//! - Logs animator parameter changes, triggers and state changes

use bevy::prelude::*;
use std::collections::HashMap;

use crate::movement::{
    AnimBool, AnimFloat, AnimationStateChanged, AnimationTriggered, Animator, CharacterMotor,
    Player, PlayerDamaged,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                draw_ground_check,
                damage_hotkey,
                log_animator_parameters,
                log_animation_events,
            ),
        );
    }
}

/// Wireframe circle at the ground-check point, red while airborne and
/// green while grounded.
fn draw_ground_check(mut gizmos: Gizmos, query: Query<(&Transform, &CharacterMotor), With<Player>>) {
    for (transform, motor) in &query {
        let point = motor.ground_check_point(transform.translation.truncate());
        let color = if motor.state().is_grounded {
            Color::srgb(0.2, 1.0, 0.2)
        } else {
            Color::srgb(1.0, 0.0, 0.0)
        };
        gizmos.circle_2d(point, motor.config().ground_check_radius, color);
    }
}

fn damage_hotkey(
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<Entity, With<Player>>,
    mut damage_events: MessageWriter<PlayerDamaged>,
) {
    if !keyboard.just_pressed(KeyCode::KeyH) {
        return;
    }

    for entity in &players {
        info!("Debug: damaging player {:?}", entity);
        damage_events.write(PlayerDamaged { entity });
    }
}

/// Parameter values last seen per animator: (speed, grounded, crouching).
type ParameterSnapshot = (f32, bool, bool);

fn log_animator_parameters(
    animators: Query<(Entity, &Animator)>,
    mut last_seen: Local<HashMap<Entity, ParameterSnapshot>>,
) {
    for (entity, animator) in &animators {
        let current = (animator.speed, animator.is_grounded, animator.is_crouching);
        if last_seen.get(&entity) == Some(&current) {
            continue;
        }

        debug!(
            "Animator {:?}: {}={} {}={} {}={}",
            entity,
            AnimFloat::Speed.name(),
            current.0,
            AnimBool::IsGrounded.name(),
            current.1,
            AnimBool::IsCrouching.name(),
            current.2
        );
        last_seen.insert(entity, current);
    }
}

fn log_animation_events(
    mut triggered_events: MessageReader<AnimationTriggered>,
    mut changed_events: MessageReader<AnimationStateChanged>,
) {
    for event in triggered_events.read() {
        debug!(
            "Animation trigger '{}' on {:?}",
            event.trigger.name(),
            event.entity
        );
    }
    for event in changed_events.read() {
        debug!(
            "Animation {:?} -> {:?} on {:?}",
            event.from, event.to, event.entity
        );
    }
}
