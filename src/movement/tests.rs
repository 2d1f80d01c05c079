//! Movement domain: tests for the character motor, its state machines and
//! the animator it drives.

use std::cell::RefCell;

use avian2d::prelude::LayerMask;
use bevy::prelude::{Transform, Vec2, Vec3};

use super::{
    AnimTrigger, AnimationPlayback, AnimationState, Animator, CharacterMotor, GameLayer,
    GroundProbe, JumpEligibility, JumpOutcome, MotorConfig, MotorInput, PhysicsBody,
};

// -----------------------------------------------------------------------------
// Fakes
// -----------------------------------------------------------------------------

/// Unit-mass body recording every impulse.
#[derive(Debug, Default)]
struct FakeBody {
    velocity: Vec2,
    impulses: Vec<Vec2>,
}

impl FakeBody {
    fn moving(velocity: Vec2) -> Self {
        Self {
            velocity,
            impulses: Vec::new(),
        }
    }
}

impl PhysicsBody for FakeBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.impulses.push(impulse);
        self.velocity += impulse;
    }
}

#[derive(Debug, Default)]
struct FakeProbe {
    grounded: bool,
    queries: RefCell<Vec<(Vec2, f32, LayerMask)>>,
}

impl FakeProbe {
    fn new(grounded: bool) -> Self {
        Self {
            grounded,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl GroundProbe for FakeProbe {
    fn overlaps(&self, point: Vec2, radius: f32, mask: LayerMask) -> bool {
        self.queries.borrow_mut().push((point, radius, mask));
        self.grounded
    }
}

fn input(x: f32, y: f32, jump: bool) -> MotorInput {
    MotorInput {
        axis: Vec2::new(x, y),
        jump_just_pressed: jump,
    }
}

/// Run one fixed step with the given ground contact.
fn step(motor: &mut CharacterMotor, body: &mut FakeBody, animator: &mut Animator, grounded: bool) {
    motor.advance(
        1.0 / 64.0,
        Vec2::ZERO,
        body,
        &FakeProbe::new(grounded),
        animator,
    );
}

fn grounded_motor() -> (CharacterMotor, FakeBody, Animator) {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    step(&mut motor, &mut body, &mut animator, true);
    animator.drain_triggers();
    (motor, body, animator)
}

// -----------------------------------------------------------------------------
// Horizontal movement
// -----------------------------------------------------------------------------

#[test]
fn test_horizontal_velocity_follows_input() {
    let config = MotorConfig::default();

    for x in [-1.0, -0.5, 0.0, 0.25, 1.0] {
        let mut motor = CharacterMotor::new(config.clone());
        let mut body = FakeBody::moving(Vec2::new(3.0, -4.5));
        let mut animator = Animator::default();

        motor.sample_input(&input(x, 0.0, false), &mut body, &mut animator);
        step(&mut motor, &mut body, &mut animator, false);

        assert_eq!(body.velocity.x, x * config.move_speed);
        assert_eq!(body.velocity.y, -4.5);
    }
}

#[test]
fn test_crouch_zeroes_horizontal_velocity() {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::moving(Vec2::new(5.0, 2.0));
    let mut animator = Animator::default();

    motor.sample_input(&input(1.0, -1.0, false), &mut body, &mut animator);
    assert!(motor.state().is_crouching);

    step(&mut motor, &mut body, &mut animator, true);

    assert_eq!(body.velocity.x, 0.0);
    assert_eq!(body.velocity.y, 2.0);
}

#[test]
fn test_crouch_only_on_negative_vertical() {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();

    motor.sample_input(&input(0.0, 0.0, false), &mut body, &mut animator);
    assert!(!motor.state().is_crouching);

    motor.sample_input(&input(0.0, 1.0, false), &mut body, &mut animator);
    assert!(!motor.state().is_crouching);

    motor.sample_input(&input(0.0, -0.2, false), &mut body, &mut animator);
    assert!(motor.state().is_crouching);
}

#[test]
fn test_input_is_clamped() {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();

    motor.sample_input(&input(3.0, 0.0, false), &mut body, &mut animator);
    assert_eq!(motor.state().horizontal_input, 1.0);

    motor.sample_input(&input(f32::NAN, 0.0, false), &mut body, &mut animator);
    assert_eq!(motor.state().horizontal_input, 0.0);
}

// -----------------------------------------------------------------------------
// Jumping
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_jump() {
    let (mut motor, _, mut animator) = grounded_motor();
    let mut body = FakeBody::moving(Vec2::new(2.0, -3.0));

    let outcome = motor.sample_input(&input(0.0, 0.0, true), &mut body, &mut animator);

    assert_eq!(outcome, Some(JumpOutcome::Grounded));
    assert_eq!(body.impulses, vec![Vec2::new(0.0, 14.0)]);
    // Vertical velocity was reset before the impulse
    assert_eq!(body.velocity, Vec2::new(2.0, 14.0));
    assert!(motor.state().can_double_jump);
    assert_eq!(animator.pending_triggers(), &[AnimTrigger::Jump]);
}

#[test]
fn test_double_jump() {
    let (mut motor, mut body, mut animator) = grounded_motor();
    motor.request_jump(&mut body, &mut animator);
    step(&mut motor, &mut body, &mut animator, false);
    animator.drain_triggers();

    body.velocity = Vec2::new(1.0, -6.0);
    body.impulses.clear();
    let outcome = motor.request_jump(&mut body, &mut animator);

    assert_eq!(outcome, JumpOutcome::Double);
    assert_eq!(body.impulses, vec![Vec2::new(0.0, 10.0)]);
    assert_eq!(body.velocity, Vec2::new(1.0, 10.0));
    assert!(!motor.state().can_double_jump);
    assert_eq!(animator.pending_triggers(), &[AnimTrigger::DoubleJump]);
}

#[test]
fn test_spent_jump_is_noop() {
    let (mut motor, mut body, mut animator) = grounded_motor();
    motor.request_jump(&mut body, &mut animator);
    step(&mut motor, &mut body, &mut animator, false);
    motor.request_jump(&mut body, &mut animator);
    animator.drain_triggers();

    body.velocity = Vec2::new(4.0, -2.0);
    body.impulses.clear();
    let outcome = motor.request_jump(&mut body, &mut animator);

    assert_eq!(outcome, JumpOutcome::Denied);
    assert_eq!(body.velocity, Vec2::new(4.0, -2.0));
    assert!(body.impulses.is_empty());
    assert!(animator.pending_triggers().is_empty());
}

#[test]
fn test_grounded_takes_priority_over_double_jump() {
    let (mut motor, mut body, mut animator) = grounded_motor();

    // Still overlapping ground right after the first jump
    motor.request_jump(&mut body, &mut animator);
    assert!(motor.state().is_grounded);
    assert!(motor.state().can_double_jump);

    body.impulses.clear();
    let outcome = motor.request_jump(&mut body, &mut animator);

    assert_eq!(outcome, JumpOutcome::Grounded);
    assert_eq!(body.impulses, vec![Vec2::new(0.0, 14.0)]);
    assert!(motor.state().can_double_jump);
}

#[test]
fn test_airborne_without_grounded_jump_cannot_double_jump() {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();

    step(&mut motor, &mut body, &mut animator, false);

    assert_eq!(motor.jump_eligibility(), JumpEligibility::AirborneSpent);
    assert_eq!(
        motor.request_jump(&mut body, &mut animator),
        JumpOutcome::Denied
    );
}

#[test]
fn test_landing_restores_grounded_jump() {
    let (mut motor, mut body, mut animator) = grounded_motor();
    motor.request_jump(&mut body, &mut animator);
    step(&mut motor, &mut body, &mut animator, false);
    motor.request_jump(&mut body, &mut animator);
    assert_eq!(motor.jump_eligibility(), JumpEligibility::AirborneSpent);

    step(&mut motor, &mut body, &mut animator, true);
    assert!(motor.state().is_grounded);
    assert_eq!(motor.jump_eligibility(), JumpEligibility::GroundedAvailable);

    body.impulses.clear();
    assert_eq!(
        motor.request_jump(&mut body, &mut animator),
        JumpOutcome::Grounded
    );
    assert_eq!(body.impulses, vec![Vec2::new(0.0, 14.0)]);
}

#[test]
fn test_landing_clears_unused_double_jump() {
    let (mut motor, mut body, mut animator) = grounded_motor();
    motor.request_jump(&mut body, &mut animator);
    step(&mut motor, &mut body, &mut animator, false);
    assert_eq!(motor.jump_eligibility(), JumpEligibility::AirborneCanDouble);

    // Land without using the double jump, then walk off a ledge
    step(&mut motor, &mut body, &mut animator, true);
    step(&mut motor, &mut body, &mut animator, false);

    assert!(!motor.state().can_double_jump);
    assert_eq!(
        motor.request_jump(&mut body, &mut animator),
        JumpOutcome::Denied
    );
}

#[test]
fn test_jump_eligibility_cycle() {
    let (mut motor, mut body, mut animator) = grounded_motor();
    assert_eq!(motor.jump_eligibility(), JumpEligibility::GroundedAvailable);

    motor.request_jump(&mut body, &mut animator);
    step(&mut motor, &mut body, &mut animator, false);
    assert_eq!(motor.jump_eligibility(), JumpEligibility::AirborneCanDouble);

    motor.request_jump(&mut body, &mut animator);
    assert_eq!(motor.jump_eligibility(), JumpEligibility::AirborneSpent);

    step(&mut motor, &mut body, &mut animator, true);
    assert_eq!(motor.jump_eligibility(), JumpEligibility::GroundedAvailable);
}

#[test]
fn test_no_jump_without_press() {
    let (mut motor, mut body, mut animator) = grounded_motor();

    let outcome = motor.sample_input(&input(1.0, 0.0, false), &mut body, &mut animator);

    assert_eq!(outcome, None);
    assert!(body.impulses.is_empty());
    assert!(animator.pending_triggers().is_empty());
}

// -----------------------------------------------------------------------------
// Ground probe
// -----------------------------------------------------------------------------

#[test]
fn test_ground_probe_query() {
    let config = MotorConfig::default();
    let mut motor = CharacterMotor::new(config.clone());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    let probe = FakeProbe::new(true);

    motor.advance(
        1.0 / 64.0,
        Vec2::new(3.0, 0.8),
        &mut body,
        &probe,
        &mut animator,
    );

    let queries = probe.queries.borrow();
    assert_eq!(queries.len(), 1);
    let (point, radius, mask) = queries[0];
    assert_eq!(point, Vec2::new(3.0, 0.0));
    assert_eq!(radius, config.ground_check_radius);
    assert_eq!(mask, LayerMask::from(GameLayer::Ground));
    assert!(motor.state().is_grounded);
}

#[test]
fn test_ground_check_offset_follows_facing() {
    let config = MotorConfig {
        ground_check_offset: Vec2::new(0.3, -0.8),
        ..MotorConfig::default()
    };
    let mut motor = CharacterMotor::new(config);
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    let mut transform = Transform::default();

    assert_eq!(motor.ground_check_point(Vec2::ZERO), Vec2::new(0.3, -0.8));

    motor.sample_input(&input(-1.0, 0.0, false), &mut body, &mut animator);
    motor.update_facing(&mut transform);

    assert_eq!(motor.ground_check_point(Vec2::ZERO), Vec2::new(-0.3, -0.8));
}

// -----------------------------------------------------------------------------
// Animation parameters
// -----------------------------------------------------------------------------

#[test]
fn test_advance_pushes_animation_parameters() {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();

    motor.sample_input(&input(-0.75, -1.0, false), &mut body, &mut animator);
    step(&mut motor, &mut body, &mut animator, true);

    assert_eq!(animator.speed, 0.75);
    assert!(animator.is_grounded);
    assert!(animator.is_crouching);

    motor.sample_input(&input(0.0, 0.0, false), &mut body, &mut animator);
    step(&mut motor, &mut body, &mut animator, false);

    assert_eq!(animator.speed, 0.0);
    assert!(!animator.is_grounded);
    assert!(!animator.is_crouching);
}

#[test]
fn test_on_damaged_only_fires_hit() {
    let (mut motor, mut body, mut animator) = grounded_motor();
    motor.sample_input(&input(0.5, -1.0, true), &mut body, &mut animator);
    animator.drain_triggers();
    let before = motor.state().clone();
    let velocity = body.velocity;

    motor.on_damaged(&mut animator);

    assert_eq!(animator.pending_triggers(), &[AnimTrigger::Hit]);
    assert_eq!(motor.state(), &before);
    assert_eq!(body.velocity, velocity);
}

#[test]
fn test_parameter_names() {
    assert_eq!(super::AnimFloat::Speed.name(), "Speed");
    assert_eq!(super::AnimBool::IsGrounded.name(), "IsGrounded");
    assert_eq!(super::AnimBool::IsCrouching.name(), "IsCrouching");
    assert_eq!(AnimTrigger::Jump.name(), "Jump");
    assert_eq!(AnimTrigger::DoubleJump.name(), "DoubleJump");
    assert_eq!(AnimTrigger::Hit.name(), "Hit");
}

// -----------------------------------------------------------------------------
// Facing
// -----------------------------------------------------------------------------

#[test]
fn test_facing_flips_once_per_direction_change() {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    let mut transform = Transform::from_scale(Vec3::new(1.0, 1.0, 1.0));
    assert!(motor.state().is_facing_right);

    motor.sample_input(&input(-0.5, 0.0, false), &mut body, &mut animator);
    assert!(motor.update_facing(&mut transform));
    assert!(!motor.state().is_facing_right);
    assert_eq!(transform.scale.x, -1.0);

    motor.sample_input(&input(-0.3, 0.0, false), &mut body, &mut animator);
    assert!(!motor.update_facing(&mut transform));
    assert!(!motor.state().is_facing_right);
    assert_eq!(transform.scale.x, -1.0);

    motor.sample_input(&input(0.2, 0.0, false), &mut body, &mut animator);
    assert!(motor.update_facing(&mut transform));
    assert!(motor.state().is_facing_right);
    assert_eq!(transform.scale.x, 1.0);
}

#[test]
fn test_zero_input_keeps_facing() {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    let mut transform = Transform::default();

    motor.sample_input(&input(-1.0, 0.0, false), &mut body, &mut animator);
    motor.update_facing(&mut transform);

    motor.sample_input(&input(0.0, 0.0, false), &mut body, &mut animator);
    assert!(!motor.update_facing(&mut transform));
    assert!(!motor.state().is_facing_right);
    assert_eq!(transform.scale.x, -1.0);
}

#[test]
fn test_flip_preserves_scale_magnitude() {
    let mut motor = CharacterMotor::new(MotorConfig::default());
    let mut body = FakeBody::default();
    let mut animator = Animator::default();
    let mut transform = Transform::from_scale(Vec3::new(2.0, 3.0, 1.0));

    motor.sample_input(&input(-1.0, 0.0, false), &mut body, &mut animator);
    motor.update_facing(&mut transform);

    assert_eq!(transform.scale, Vec3::new(-2.0, 3.0, 1.0));
}

// -----------------------------------------------------------------------------
// Animation playback
// -----------------------------------------------------------------------------

fn params(speed: f32, is_grounded: bool, is_crouching: bool) -> Animator {
    let mut animator = Animator::default();
    animator.speed = speed;
    animator.is_grounded = is_grounded;
    animator.is_crouching = is_crouching;
    animator
}

#[test]
fn test_state_from_params() {
    assert_eq!(
        AnimationState::from_params(&params(0.0, true, false)),
        AnimationState::Idle
    );
    assert_eq!(
        AnimationState::from_params(&params(1.0, true, false)),
        AnimationState::Run
    );
    assert_eq!(
        AnimationState::from_params(&params(1.0, true, true)),
        AnimationState::Crouch
    );
    assert_eq!(
        AnimationState::from_params(&params(1.0, false, true)),
        AnimationState::Fall
    );
}

#[test]
fn test_trigger_holds_then_returns_to_params() {
    let mut playback = AnimationPlayback::default();
    let animator = params(0.0, false, false);

    playback.play_trigger(AnimTrigger::Jump);
    assert_eq!(playback.state, AnimationState::Jump);

    playback.resolve(0.1, &animator);
    assert_eq!(playback.state, AnimationState::Jump);

    playback.resolve(0.15, &animator);
    assert_eq!(playback.state, AnimationState::Fall);
    assert_eq!(playback.previous_state, AnimationState::Jump);
}

#[test]
fn test_hit_is_not_interrupted_by_jump() {
    let mut playback = AnimationPlayback::default();

    playback.play_trigger(AnimTrigger::Hit);
    playback.play_trigger(AnimTrigger::DoubleJump);

    assert_eq!(playback.state, AnimationState::Hit);
}

#[test]
fn test_jump_is_interrupted_by_hit() {
    let mut playback = AnimationPlayback::default();

    playback.play_trigger(AnimTrigger::Jump);
    playback.play_trigger(AnimTrigger::Hit);

    assert_eq!(playback.state, AnimationState::Hit);
    assert_eq!(playback.previous_state, AnimationState::Jump);
}

#[test]
fn test_drain_empties_triggers() {
    let mut animator = Animator::default();
    let (mut motor, mut body, _) = grounded_motor();

    motor.request_jump(&mut body, &mut animator);
    motor.on_damaged(&mut animator);

    let drained: Vec<AnimTrigger> = animator.drain_triggers().collect();
    assert_eq!(drained, vec![AnimTrigger::Jump, AnimTrigger::Hit]);
    assert!(animator.pending_triggers().is_empty());
}

// -----------------------------------------------------------------------------
// Tuning helpers
// -----------------------------------------------------------------------------

#[test]
fn test_jump_heights() {
    let config = MotorConfig::default();

    assert!((config.jump_height(30.0) - 196.0 / 60.0).abs() < 1e-5);
    assert!((config.double_jump_height(30.0) - 100.0 / 60.0).abs() < 1e-5);
}
