//! Validation for loaded motor tuning.

use super::data::MotorConfigDef;

/// A validation error naming the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "motor config field '{}': {}", self.field, self.message)
    }
}

/// Helper macro for checking a value is finite and strictly positive
macro_rules! check_positive {
    ($errors:expr, $def:expr, $field:ident) => {
        let value = $def.$field;
        if !value.is_finite() || value <= 0.0 {
            $errors.push(ConfigValidationError {
                field: stringify!($field),
                message: format!("must be a positive number, got {}", value),
            });
        }
    };
}

/// Validate motor tuning.
/// Returns a list of validation errors, empty if the config is usable.
pub fn validate_motor_config(def: &MotorConfigDef) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    check_positive!(errors, def, move_speed);
    check_positive!(errors, def, jump_force);
    check_positive!(errors, def, double_jump_force);
    check_positive!(errors, def, ground_check_radius);

    let (offset_x, offset_y) = def.ground_check_offset;
    if !offset_x.is_finite() || !offset_y.is_finite() {
        errors.push(ConfigValidationError {
            field: "ground_check_offset",
            message: format!("must be finite, got ({}, {})", offset_x, offset_y),
        });
    }

    if def.ground_layer_mask().0 == 0 {
        errors.push(ConfigValidationError {
            field: "ground_layers",
            message: "must name at least one layer".to_string(),
        });
    }

    errors
}
