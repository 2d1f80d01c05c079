//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MotorInput;

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MotorInput>) {
    *input = MotorInput::from_keyboard(&keyboard);
}
