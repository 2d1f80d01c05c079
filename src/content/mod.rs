//! Content domain: motor tuning loaded from `assets/data/motor.ron`.

mod data;
mod loader;
mod validation;


use bevy::prelude::*;
use std::path::Path;

pub use data::MotorConfigDef;
pub use loader::{ContentLoadError, load_motor_config, parse_motor_config};
pub use validation::{ConfigValidationError, validate_motor_config};

use crate::movement::MotorConfig;

pub const MOTOR_CONFIG_PATH: &str = "assets/data/motor.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let config = load_config_or_default(Path::new(MOTOR_CONFIG_PATH));
        app.insert_resource(config);
    }
}

/// Load and validate motor tuning. Any failure is logged and replaced by
/// [`MotorConfig::default`].
pub fn load_config_or_default(path: &Path) -> MotorConfig {
    let def = match load_motor_config(path) {
        Ok(def) => def,
        Err(e) => {
            warn!("{}; using default motor config", e);
            return MotorConfig::default();
        }
    };

    let errors = validate_motor_config(&def);
    if !errors.is_empty() {
        for error in &errors {
            error!("{}", error);
        }
        warn!(
            "{} invalid field(s) in {}; using default motor config",
            errors.len(),
            path.display()
        );
        return MotorConfig::default();
    }

    info!(
        "Loaded motor config from {}: move_speed={}, jump_force={}, double_jump_force={}",
        path.display(),
        def.move_speed,
        def.jump_force,
        def.double_jump_force
    );
    def.into()
}
