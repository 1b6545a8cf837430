use crate::{Ball, GameOverConfig};

/// Observed state of one ball at poll time.
#[derive(Debug, Clone, Copy)]
pub struct BallSample {
    pub ball: Ball,
    pub y: f32,
    pub velocity_y: f32,
}

/// A ball ends the game only when it has come to rest above the line;
/// passing through the line while moving does not count.
pub fn rests_above_boundary(sample: &BallSample, boundary_y: f32, now: f32, cfg: &GameOverConfig) -> bool {
    let age = now - sample.ball.spawned_at;
    sample.y > boundary_y
        && sample.velocity_y.abs() < cfg.rest_velocity_epsilon
        && age >= cfg.settle_grace_secs
}

pub fn any_resting_above<'a>(
    samples: impl IntoIterator<Item = &'a BallSample>,
    boundary_y: f32,
    now: f32,
    cfg: &GameOverConfig,
) -> bool {
    samples
        .into_iter()
        .any(|s| rests_above_boundary(s, boundary_y, now, cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    fn sample(y: f32, velocity_y: f32, spawned_at: f32) -> BallSample {
        BallSample {
            ball: Ball::new(Level::MIN, spawned_at),
            y,
            velocity_y,
        }
    }

    #[test]
    fn moving_ball_above_line_is_ignored() {
        let cfg = GameOverConfig::default();
        assert!(!rests_above_boundary(&sample(300.0, -120.0, 0.0), 200.0, 10.0, &cfg));
    }

    #[test]
    fn resting_ball_above_line_ends_game() {
        let cfg = GameOverConfig::default();
        assert!(rests_above_boundary(&sample(300.0, 0.5, 0.0), 200.0, 10.0, &cfg));
    }

    #[test]
    fn resting_ball_below_line_is_fine() {
        let cfg = GameOverConfig::default();
        assert!(!rests_above_boundary(&sample(150.0, 0.0, 0.0), 200.0, 10.0, &cfg));
    }

    #[test]
    fn fresh_drop_is_within_grace() {
        let cfg = GameOverConfig::default();
        assert!(!rests_above_boundary(&sample(300.0, 0.0, 9.8), 200.0, 10.0, &cfg));
    }

    #[test]
    fn any_checks_every_sample() {
        let cfg = GameOverConfig::default();
        let samples = [sample(0.0, 0.0, 0.0), sample(250.0, 1.0, 0.0)];
        assert!(any_resting_above(&samples, 200.0, 5.0, &cfg));
        assert!(!any_resting_above(&samples[..1], 200.0, 5.0, &cfg));
    }
}
