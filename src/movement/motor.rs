//! Movement domain: the character motor and its jump and facing state machines.

use bevy::prelude::*;

use crate::movement::{
    AnimBool, AnimFloat, AnimTrigger, AnimationDriver, FacingVisual, GroundProbe, JumpEligibility,
    JumpOutcome, MotorConfig, MotorInputSource, MotorState, PhysicsBody,
};

/// Drives one character. Call [`sample_input`](Self::sample_input) and
/// [`update_facing`](Self::update_facing) once per rendered frame, then
/// [`advance`](Self::advance) once per fixed physics step.
#[derive(Component, Debug, Clone)]
pub struct CharacterMotor {
    config: MotorConfig,
    state: MotorState,
}

impl CharacterMotor {
    pub fn new(config: MotorConfig) -> Self {
        Self {
            config,
            state: MotorState::default(),
        }
    }

    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    pub fn state(&self) -> &MotorState {
        &self.state
    }

    /// Read this frame's input. Jumps fire immediately rather than waiting
    /// for the next fixed step.
    pub fn sample_input(
        &mut self,
        input: &impl MotorInputSource,
        body: &mut impl PhysicsBody,
        animator: &mut impl AnimationDriver,
    ) -> Option<JumpOutcome> {
        let horizontal = input.horizontal_axis();
        self.state.horizontal_input = if horizontal.is_finite() {
            horizontal.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        self.state.is_crouching = input.vertical_axis() < 0.0;

        if input.jump_pressed() {
            Some(self.request_jump(body, animator))
        } else {
            None
        }
    }

    /// Jump from the ground, or spend the double jump while airborne.
    /// Being grounded always wins over double jump eligibility.
    pub fn request_jump(
        &mut self,
        body: &mut impl PhysicsBody,
        animator: &mut impl AnimationDriver,
    ) -> JumpOutcome {
        if self.state.is_grounded {
            execute_jump(body, self.config.jump_force);
            animator.fire(AnimTrigger::Jump);
            self.state.can_double_jump = true;
            debug!("Ground jump: force={}", self.config.jump_force);
            JumpOutcome::Grounded
        } else if self.state.can_double_jump {
            execute_jump(body, self.config.double_jump_force);
            animator.fire(AnimTrigger::DoubleJump);
            self.state.can_double_jump = false;
            debug!("Double jump: force={}", self.config.double_jump_force);
            JumpOutcome::Double
        } else {
            JumpOutcome::Denied
        }
    }

    /// One fixed physics step: set horizontal velocity, refresh ground
    /// contact, then push motion parameters to the animator.
    pub fn advance(
        &mut self,
        dt: f32,
        position: Vec2,
        body: &mut impl PhysicsBody,
        probe: &impl GroundProbe,
        animator: &mut impl AnimationDriver,
    ) {
        let velocity = body.velocity();
        let vx = if self.state.is_crouching {
            0.0
        } else {
            self.state.horizontal_input * self.config.move_speed
        };
        body.set_velocity(Vec2::new(vx, velocity.y));

        let was_grounded = self.state.is_grounded;
        self.state.is_grounded = probe.overlaps(
            self.ground_check_point(position),
            self.config.ground_check_radius,
            self.config.ground_layer_mask,
        );

        if self.state.is_grounded && !was_grounded {
            // Landing restarts the cycle; only a grounded jump re-arms the double jump.
            self.state.can_double_jump = false;
            debug!("Landed at {:?}", position);
        } else if !self.state.is_grounded && was_grounded {
            debug!(
                "Left ground: can_double_jump={}",
                self.state.can_double_jump
            );
        }

        animator.set_float(AnimFloat::Speed, self.state.horizontal_input.abs());
        animator.set_bool(AnimBool::IsGrounded, self.state.is_grounded);
        animator.set_bool(AnimBool::IsCrouching, self.state.is_crouching);

        trace!(
            "Motor step: dt={dt}, vx={vx}, grounded={}, crouching={}",
            self.state.is_grounded, self.state.is_crouching
        );
    }

    /// Turn to face the input direction. Returns true if the character flipped.
    pub fn update_facing(&mut self, visual: &mut impl FacingVisual) -> bool {
        let input = self.state.horizontal_input;
        if input == 0.0 {
            return false;
        }

        let wants_right = input > 0.0;
        if wants_right == self.state.is_facing_right {
            return false;
        }

        self.state.is_facing_right = wants_right;
        visual.mirror_horizontal();
        debug!("Flipped: facing_right={}", wants_right);
        true
    }

    /// Forward a hit to the animator. Motion state is untouched.
    pub fn on_damaged(&self, animator: &mut impl AnimationDriver) {
        animator.fire(AnimTrigger::Hit);
    }

    pub fn jump_eligibility(&self) -> JumpEligibility {
        if self.state.is_grounded {
            JumpEligibility::GroundedAvailable
        } else if self.state.can_double_jump {
            JumpEligibility::AirborneCanDouble
        } else {
            JumpEligibility::AirborneSpent
        }
    }

    /// World point probed for ground contact. The offset follows the
    /// mirrored visual, so its x flips while facing left.
    pub fn ground_check_point(&self, position: Vec2) -> Vec2 {
        let mut offset = self.config.ground_check_offset;
        if !self.state.is_facing_right {
            offset.x = -offset.x;
        }
        position + offset
    }
}

fn execute_jump(body: &mut impl PhysicsBody, force: f32) {
    let velocity = body.velocity();
    body.set_velocity(Vec2::new(velocity.x, 0.0));
    body.apply_impulse(Vec2::Y * force);
}
