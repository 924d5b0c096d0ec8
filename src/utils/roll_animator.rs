//! The roll state machine.
//!
//! The outcome of a roll is sampled the moment it is requested; the animation
//! that follows only reveals it. A fixed-duration free spin tumbles the die
//! around two randomly signed axes with decaying speed, then a settling phase
//! interpolates each Euler axis onto the target angles for the sampled face.
//! The interpolation is asymptotic, so settling is additionally capped by a
//! hard step bound and always ends with a snap to the exact target. Rolling a
//! six routes through a short bonus timeline before the machine goes idle.
use bevy::math::{EulerRot, Quat, Vec3};
use bevy::prelude::Resource;
use rand::Rng;

use crate::utils::config::RollConfig;
use crate::utils::constants::die_constants::{FACE_TARGET_ANGLES, MAX_FACE};

/// Phase of the roll state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RollState {
    #[default]
    // No roll in progress; requests are accepted.
    Idle,
    // Free tumble with decaying speed, fixed wall-time duration.
    Spinning,
    // Converging onto the target angles, bounded by the step ceiling.
    Settling,
    // Celebratory timeline after settling on a six.
    BonusSequence,
}

/// Position within the bonus timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BonusStage {
    // Emphasis cues are up; the score event fires on the next tick.
    AwaitScore,
    // Holding the emphasis.
    Celebrating,
    // Easing the emphasis back out.
    Reverting,
}

/// Transient data for the in-progress roll. Exists iff the state is not Idle.
#[derive(Clone, Debug)]
struct RollSession {
    // The face value sampled at request time.
    outcome: u8,
    // Euler angles (degrees) the die must end on.
    target: Vec3,
    // Current free-spin angular speed, degrees per second.
    speed: f32,
    // The two spin axes, each drawn as +/-Y and +/-X at request time.
    axis1: Vec3,
    axis2: Vec3,
    // Wall time spent in the Spinning phase.
    elapsed: f32,
    // Steps spent in the Settling phase.
    settle_steps: u32,
    // Wall time spent in the BonusSequence phase.
    bonus_elapsed: f32,
    bonus_stage: BonusStage,
}

/// Side effects the animator asks its host to perform. Each variant is
/// emitted at most once per roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollEvent {
    /// Gate the roll trigger: disabled at request time, re-enabled once the
    /// roll has fully completed.
    ControlEnabled(bool),
    /// The completed roll came up six; bump the score counter.
    ScoreIncrement,
    /// Begin the celebratory emphasis cues.
    BonusEmphasisBegan,
    /// Ease the celebratory emphasis back out.
    BonusEmphasisReverting,
}

/// Owns outcome selection, phase transitions, the per-tick orientation update
/// and termination detection for one die.
#[derive(Resource, Debug, Default)]
pub struct RollAnimator {
    state: RollState,
    session: Option<RollSession>,
    // Current orientation, kept in two equivalent forms: Euler degrees (the
    // form the settling math and the face table work in) and the quaternion
    // handed to the renderer.
    angles: Vec3,
    rotation: Quat,
}

impl RollAnimator {
    pub fn state(&self) -> RollState {
        self.state
    }

    /// Current orientation as Euler angles in degrees (XYZ).
    pub fn angles(&self) -> Vec3 {
        self.angles
    }

    /// Current orientation for the rendering layer.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// The face value of the in-progress roll, if any.
    pub fn outcome(&self) -> Option<u8> {
        self.session.as_ref().map(|session| session.outcome)
    }

    /// Starts a roll: samples the outcome, draws the spin axes and enters the
    /// Spinning phase. A request while a roll is in progress is dropped.
    pub fn request_roll(
        &mut self,
        config: &RollConfig,
        rng: &mut impl Rng,
        events: &mut Vec<RollEvent>,
    ) {
        if self.state != RollState::Idle {
            return;
        }

        let outcome = if config.always_six {
            MAX_FACE
        } else {
            rng.random_range(1..=MAX_FACE)
        };

        // Random per-roll polarity of the two spin axes keeps repeated
        // outcomes from tumbling identically.
        let axis1 = if rng.random_bool(0.5) { Vec3::Y } else { Vec3::NEG_Y };
        let axis2 = if rng.random_bool(0.5) { Vec3::X } else { Vec3::NEG_X };

        self.begin_roll(config, outcome, axis1, axis2, events);
    }

    fn begin_roll(
        &mut self,
        config: &RollConfig,
        outcome: u8,
        axis1: Vec3,
        axis2: Vec3,
        events: &mut Vec<RollEvent>,
    ) {
        self.angles = Vec3::ZERO;
        self.rotation = Quat::IDENTITY;
        self.session = Some(RollSession {
            outcome,
            target: FACE_TARGET_ANGLES[(outcome - 1) as usize],
            speed: config.initial_spin_speed,
            axis1,
            axis2,
            elapsed: 0.0,
            settle_steps: 0,
            bonus_elapsed: 0.0,
            bonus_stage: BonusStage::AwaitScore,
        });
        self.state = RollState::Spinning;
        events.push(RollEvent::ControlEnabled(false));
    }

    /// The single per-tick entry point. `dt` is the elapsed time since the
    /// previous call, in seconds; negative values are treated as zero.
    pub fn advance(&mut self, dt: f32, config: &RollConfig, events: &mut Vec<RollEvent>) {
        let dt = dt.max(0.0);
        match self.state {
            RollState::Idle => {}
            RollState::Spinning => self.advance_spinning(dt, config),
            RollState::Settling => self.advance_settling(dt, config, events),
            RollState::BonusSequence => self.advance_bonus(dt, config, events),
        }
    }

    /// Free spin: compose both axis rotations, decay the speed toward its
    /// floor, and hand over to Settling once the fixed duration has passed.
    fn advance_spinning(&mut self, dt: f32, config: &RollConfig) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let step = (session.speed * dt).to_radians();
        self.rotation = Quat::from_axis_angle(session.axis1, step) * self.rotation;
        self.rotation = Quat::from_axis_angle(session.axis2, step) * self.rotation;
        self.angles = euler_degrees(self.rotation);

        session.speed = lerp(session.speed, config.floor_spin_speed, config.spin_decay_rate * dt);
        session.elapsed += dt;

        // The phase ends on wall time, not on the speed reaching a threshold,
        // so its length does not depend on the frame rate.
        if session.elapsed >= config.rolling_time {
            session.settle_steps = 0;
            self.state = RollState::Settling;
        }
    }

    /// Convergence: move each Euler axis toward its target along the shortest
    /// arc, then check termination. The interpolation alone may never close
    /// within tolerance, so the step ceiling guarantees the phase ends; either
    /// way the orientation is snapped exactly onto the target.
    fn advance_settling(&mut self, dt: f32, config: &RollConfig, events: &mut Vec<RollEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let target = session.target;

        let t = config.settle_speed * dt;
        self.angles = Vec3::new(
            lerp_angle(self.angles.x, target.x, t),
            lerp_angle(self.angles.y, target.y, t),
            lerp_angle(self.angles.z, target.z, t),
        );
        self.rotation = quat_from_degrees(self.angles);

        // lerp_angle may run past 360 or below 0 on the wrapped path, so a
        // per-axis difference of ~360 counts as aligned too.
        let diff = (self.angles - target).abs();
        let aligned = is_nearly_0_or_360(diff.x, config.angle_tolerance)
            && is_nearly_0_or_360(diff.y, config.angle_tolerance)
            && is_nearly_0_or_360(diff.z, config.angle_tolerance);

        session.settle_steps += 1;
        if session.settle_steps > config.settle_step_bound || aligned {
            let outcome = session.outcome;
            self.angles = target;
            self.rotation = quat_from_degrees(target);
            if outcome == MAX_FACE {
                self.state = RollState::BonusSequence;
                events.push(RollEvent::BonusEmphasisBegan);
            } else {
                self.state = RollState::Idle;
                self.session = None;
                events.push(RollEvent::ControlEnabled(true));
            }
        }
    }

    /// Fixed bonus timeline: score on the first tick inside the phase, revert
    /// the emphasis after the hold, then re-assert the target orientation and
    /// re-enable the trigger.
    fn advance_bonus(&mut self, dt: f32, config: &RollConfig, events: &mut Vec<RollEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.bonus_elapsed += dt;

        match session.bonus_stage {
            BonusStage::AwaitScore => {
                events.push(RollEvent::ScoreIncrement);
                session.bonus_stage = BonusStage::Celebrating;
            }
            BonusStage::Celebrating => {
                if session.bonus_elapsed >= config.bonus_hold_time {
                    events.push(RollEvent::BonusEmphasisReverting);
                    session.bonus_stage = BonusStage::Reverting;
                }
            }
            BonusStage::Reverting => {
                if session.bonus_elapsed >= config.bonus_hold_time + config.bonus_revert_time {
                    let target = session.target;
                    // Idempotent re-assertion; settling already snapped here.
                    self.angles = target;
                    self.rotation = quat_from_degrees(target);
                    self.state = RollState::Idle;
                    self.session = None;
                    events.push(RollEvent::ControlEnabled(true));
                }
            }
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Linear interpolation between two angles in degrees along the shortest arc:
/// going from 350 to 10 passes through 360/0, not back through 180.
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    let mut delta = (b - a).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    a + delta * t.clamp(0.0, 1.0)
}

fn nearly_equals(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

fn is_nearly_0_or_360(a: f32, tolerance: f32) -> bool {
    nearly_equals(a, 0.0, tolerance) || nearly_equals(a, 360.0, tolerance)
}

fn quat_from_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        angles.x.to_radians(),
        angles.y.to_radians(),
        angles.z.to_radians(),
    )
}

fn euler_degrees(rotation: Quat) -> Vec3 {
    let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
    Vec3::new(
        x.to_degrees().rem_euclid(360.0),
        y.to_degrees().rem_euclid(360.0),
        z.to_degrees().rem_euclid(360.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn advance_until_idle(
        animator: &mut RollAnimator,
        config: &RollConfig,
        events: &mut Vec<RollEvent>,
    ) {
        for _ in 0..10_000 {
            animator.advance(DT, config, events);
            if animator.state() == RollState::Idle {
                return;
            }
        }
        panic!("roll did not complete within 10000 ticks");
    }

    fn count(events: &[RollEvent], wanted: RollEvent) -> usize {
        events.iter().filter(|event| **event == wanted).count()
    }

    #[test]
    fn every_outcome_lands_exactly_on_its_face_angles() {
        let config = RollConfig::default();
        for outcome in 1..=MAX_FACE {
            let mut animator = RollAnimator::default();
            let mut events = Vec::new();
            animator.begin_roll(&config, outcome, Vec3::Y, Vec3::X, &mut events);
            advance_until_idle(&mut animator, &config, &mut events);
            // Exact, not approximate: termination snaps onto the table entry.
            assert_eq!(
                animator.angles(),
                FACE_TARGET_ANGLES[(outcome - 1) as usize],
                "outcome {outcome}"
            );
        }
    }

    #[test]
    fn settling_terminates_within_step_bound_from_any_snapshot() {
        let config = RollConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let mut animator = RollAnimator::default();
            let mut events = Vec::new();
            animator.begin_roll(&config, 2, Vec3::Y, Vec3::X, &mut events);
            // Force a settling phase starting from a random snapshot.
            animator.angles = Vec3::new(
                rng.random_range(0.0..360.0),
                rng.random_range(0.0..360.0),
                rng.random_range(0.0..360.0),
            );
            animator.rotation = quat_from_degrees(animator.angles);
            animator.state = RollState::Settling;

            let mut steps = 0u32;
            while animator.state() == RollState::Settling {
                animator.advance(DT, &config, &mut events);
                steps += 1;
                assert!(
                    steps <= config.settle_step_bound + 1,
                    "settling exceeded its step bound"
                );
            }
        }
    }

    #[test]
    fn request_while_rolling_is_dropped() {
        let config = RollConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut animator = RollAnimator::default();
        let mut events = Vec::new();

        animator.request_roll(&config, &mut rng, &mut events);
        assert_eq!(animator.state(), RollState::Spinning);
        let outcome = animator.outcome();
        animator.advance(DT, &config, &mut events);
        let angles = animator.angles();
        events.clear();

        // A spurious second request must not touch outcome, orientation or
        // emit anything.
        animator.request_roll(&config, &mut rng, &mut events);
        assert_eq!(animator.outcome(), outcome);
        assert_eq!(animator.angles(), angles);
        assert!(events.is_empty());
    }

    #[test]
    fn score_fires_exactly_once_for_six_and_never_otherwise() {
        let config = RollConfig::default();
        for outcome in 1..=MAX_FACE {
            let mut animator = RollAnimator::default();
            let mut events = Vec::new();
            animator.begin_roll(&config, outcome, Vec3::NEG_Y, Vec3::X, &mut events);
            advance_until_idle(&mut animator, &config, &mut events);

            let expected = if outcome == MAX_FACE { 1 } else { 0 };
            assert_eq!(
                count(&events, RollEvent::ScoreIncrement),
                expected,
                "outcome {outcome}"
            );
            // The trigger is disabled once and re-enabled once per roll.
            assert_eq!(count(&events, RollEvent::ControlEnabled(false)), 1);
            assert_eq!(count(&events, RollEvent::ControlEnabled(true)), 1);
        }
    }

    #[test]
    fn lerp_angle_takes_the_shortest_arc() {
        // 350 -> 10 moves up through 360, never down toward 180.
        let stepped = lerp_angle(350.0, 10.0, 0.25);
        assert!(stepped > 350.0, "got {stepped}");
        assert_eq!(lerp_angle(350.0, 10.0, 0.5), 360.0);
        // And the mirror image moves down through 0.
        assert_eq!(lerp_angle(10.0, 350.0, 0.5), 0.0);
        // Plain cases are unaffected.
        assert_eq!(lerp_angle(0.0, 90.0, 0.5), 45.0);
    }

    #[test]
    fn always_six_full_run_scores_once_and_reenables_the_trigger() {
        let config = RollConfig {
            always_six: true,
            ..RollConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut animator = RollAnimator::default();
        let mut events = Vec::new();

        animator.request_roll(&config, &mut rng, &mut events);
        assert_eq!(animator.outcome(), Some(6));
        assert_eq!(events, vec![RollEvent::ControlEnabled(false)]);

        advance_until_idle(&mut animator, &config, &mut events);
        assert_eq!(animator.angles(), FACE_TARGET_ANGLES[5]);
        assert_eq!(count(&events, RollEvent::ScoreIncrement), 1);
        assert_eq!(count(&events, RollEvent::BonusEmphasisBegan), 1);
        assert_eq!(count(&events, RollEvent::BonusEmphasisReverting), 1);
        // The trigger comes back only at the very end of the bonus timeline.
        assert_eq!(events.last(), Some(&RollEvent::ControlEnabled(true)));
    }

    #[test]
    fn outcome_four_settles_onto_the_identity_orientation() {
        let config = RollConfig::default();
        let mut animator = RollAnimator::default();
        let mut events = Vec::new();
        animator.begin_roll(&config, 4, Vec3::Y, Vec3::NEG_X, &mut events);
        advance_until_idle(&mut animator, &config, &mut events);

        let angles = animator.angles();
        for axis in [angles.x, angles.y, angles.z] {
            assert!(is_nearly_0_or_360(axis, config.angle_tolerance), "axis {axis}");
        }
        assert_eq!(animator.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn negative_dt_is_treated_as_zero() {
        let config = RollConfig::default();
        let mut animator = RollAnimator::default();
        let mut events = Vec::new();
        animator.begin_roll(&config, 3, Vec3::Y, Vec3::X, &mut events);

        let before = animator.angles();
        for _ in 0..500 {
            animator.advance(-1.0, &config, &mut events);
        }
        // No time passed: still spinning, orientation untouched.
        assert_eq!(animator.state(), RollState::Spinning);
        assert_eq!(animator.angles(), before);
    }

    #[test]
    fn spinning_runs_for_the_configured_wall_time() {
        let config = RollConfig::default();
        let mut animator = RollAnimator::default();
        let mut events = Vec::new();
        animator.begin_roll(&config, 1, Vec3::Y, Vec3::X, &mut events);

        let mut elapsed = 0.0;
        while animator.state() == RollState::Spinning {
            animator.advance(DT, &config, &mut events);
            elapsed += DT;
            assert!(elapsed < config.rolling_time + 1.0);
        }
        // The handover happens on the first tick at or past the duration.
        assert!(elapsed >= config.rolling_time);
        assert_eq!(animator.state(), RollState::Settling);
    }
}
