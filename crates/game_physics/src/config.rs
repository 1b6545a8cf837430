use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct PhysicsConfig {
    pub pixels_per_meter: f32,
    pub gravity: Vec2,
    pub ball_restitution: f32,
    pub ball_friction: f32,
    pub wall_friction: f32,
    pub linear_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 50.0,
            gravity: Vec2::new(0.0, -980.0),
            ball_restitution: 0.15,
            ball_friction: 0.4,
            wall_friction: 0.6,
            linear_damping: 0.1,
        }
    }
}
