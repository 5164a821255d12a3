//! Damped-spring dynamics for gaze smoothing
//!
//! Raw gaze samples jitter around the true fixation point. A damped
//! spring chasing the raw samples yields a steady marker during fixations
//! while still following pursuit movement.

use serde::{Deserialize, Serialize};

/// Spring constants used by the replay smoother.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmoothingConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            stiffness: 470.0,
            damping: 70.0,
            mass: 3.0,
        }
    }
}

impl SmoothingConfig {
    /// Derive spring constants from the user-facing 0..=10 smoothing level.
    ///
    /// Level 0 is a stiff spring that tracks the raw samples almost
    /// exactly; level 10 is a soft spring that irons out jitter at the
    /// cost of lag. Damping stays slightly under critical so the marker
    /// settles without visible bounce.
    pub fn from_level(level: u8) -> Self {
        let level = level.min(10) as f64;
        let stiffness = 900.0 - 75.0 * level;
        let mass = 3.0;
        let damping = 1.8 * (stiffness * mass).sqrt();
        Self {
            stiffness,
            damping,
            mass,
        }
    }
}

/// Spring state for one screen axis.
#[derive(Debug, Clone)]
pub struct AxisSpring {
    pub position: f64,
    pub velocity: f64,
}

impl AxisSpring {
    pub fn new(initial: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
        }
    }

    /// Advance the spring by dt seconds toward the target.
    ///
    /// Damped harmonic oscillator: F = -k * x - c * v with k = stiffness,
    /// c = damping, x = displacement, v = velocity.
    pub fn step(&mut self, target: f64, config: &SmoothingConfig, dt: f64) {
        let displacement = self.position - target;
        let spring_force = -config.stiffness * displacement;
        let damping_force = -config.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / config.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Whether displacement and velocity are both below the threshold.
    pub fn is_settled(&self, target: f64, threshold: f64) -> bool {
        (self.position - target).abs() < threshold && self.velocity.abs() < threshold
    }
}

/// Paired springs for the two screen axes.
#[derive(Debug, Clone)]
pub struct GazeSpring {
    pub x: AxisSpring,
    pub y: AxisSpring,
}

impl GazeSpring {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: AxisSpring::new(x),
            y: AxisSpring::new(y),
        }
    }

    pub fn step(&mut self, target_x: f64, target_y: f64, config: &SmoothingConfig, dt: f64) {
        self.x.step(target_x, config, dt);
        self.y.step(target_y, config, dt);
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x.position, self.y.position)
    }

    /// Snap to a new position with zero velocity. Used on saccades, where
    /// chasing the jump would smear the marker across the screen.
    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = AxisSpring::new(x);
        self.y = AxisSpring::new(y);
    }

    pub fn is_settled(&self, target_x: f64, target_y: f64, threshold: f64) -> bool {
        self.x.is_settled(target_x, threshold) && self.y.is_settled(target_y, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_on_fixation() {
        let config = SmoothingConfig::default();
        let mut spring = AxisSpring::new(0.0);

        // One second of 60Hz steps toward a steady fixation target.
        for _ in 0..60 {
            spring.step(100.0, &config, 1.0 / 60.0);
        }

        assert!(
            (spring.position - 100.0).abs() < 5.0,
            "position {} should approach the fixation at 100",
            spring.position
        );
    }

    #[test]
    fn test_level_mapping_gets_softer() {
        let stiff = SmoothingConfig::from_level(0);
        let soft = SmoothingConfig::from_level(10);
        assert!(
            stiff.stiffness > soft.stiffness,
            "higher levels must soften the spring"
        );
    }

    #[test]
    fn test_level_mapping_clamps_out_of_range() {
        assert_eq!(
            SmoothingConfig::from_level(10),
            SmoothingConfig::from_level(200)
        );
    }

    #[test]
    fn test_near_critical_damping_avoids_bounce() {
        let config = SmoothingConfig::from_level(5);
        let mut spring = AxisSpring::new(0.0);
        let mut max_pos = 0.0f64;

        for _ in 0..240 {
            spring.step(100.0, &config, 1.0 / 60.0);
            max_pos = max_pos.max(spring.position);
        }

        assert!(
            max_pos < 110.0,
            "max position {} should not overshoot the target badly",
            max_pos
        );
        assert!(spring.is_settled(100.0, 2.0));
    }

    #[test]
    fn test_two_axis_spring_tracks_both_coordinates() {
        let config = SmoothingConfig::default();
        let mut spring = GazeSpring::new(0.0, 0.0);

        for _ in 0..60 {
            spring.step(100.0, 200.0, &config, 1.0 / 60.0);
        }

        let (x, y) = spring.position();
        assert!((x - 100.0).abs() < 5.0, "x {} should be near 100", x);
        assert!((y - 200.0).abs() < 5.0, "y {} should be near 200", y);
    }

    #[test]
    fn test_reset_zeroes_velocity() {
        let config = SmoothingConfig::default();
        let mut spring = GazeSpring::new(0.0, 0.0);

        for _ in 0..30 {
            spring.step(100.0, 100.0, &config, 1.0 / 60.0);
        }

        spring.reset(500.0, 500.0);

        assert_eq!(spring.position(), (500.0, 500.0));
        assert_eq!(spring.x.velocity, 0.0);
        assert_eq!(spring.y.velocity, 0.0);
    }
}
