//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;


pub(crate) use input::read_input;
pub(crate) use movement::{
    advance_motor, handle_player_damaged, sample_motor_input, update_facing,
};
