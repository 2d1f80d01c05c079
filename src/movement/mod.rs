//! Movement domain: character motor, its services and Bevy scheduling.
//!
//! Input sampling and facing run every rendered frame in `Update`. The motor
//! step that sets velocity and probes for ground runs in `FixedUpdate`.

pub mod animation;
mod bootstrap;
mod components;
mod dev;
mod motor;
mod resources;
mod services;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use animation::*;
pub use components::*;
pub use motor::CharacterMotor;
pub use resources::*;
pub use services::*;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotorInput>()
            .init_resource::<MotorConfig>()
            .add_message::<PlayerDamaged>()
            .add_message::<AnimationTriggered>()
            .add_message::<AnimationStateChanged>()
            .add_systems(
                Startup,
                (dev::spawn_test_room, bootstrap::spawn_player),
            )
            .add_systems(
                Update,
                (
                    systems::read_input,
                    systems::sample_motor_input,
                    systems::update_facing,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (systems::handle_player_damaged, drive_animation)
                    .chain()
                    .after(systems::sample_motor_input),
            )
            .add_systems(FixedUpdate, systems::advance_motor);
    }
}
