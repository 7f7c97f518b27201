use glam::Vec2;

use super::actor::{Actor, ActorId, Body};
use crate::collision::Shape;

pub const SHOT_HALF: Vec2 = Vec2::new(2.0, 8.0);
/// Vertical speed in world units per second, both directions.
pub const SHOT_SPEED: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Alien,
}

/// Straight-line mover. Player shots travel up, alien shots down; neither
/// steers after launch.
#[derive(Debug, Clone)]
pub struct Projectile {
    body: Body,
    pub velocity: Vec2,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn player_shot(id: ActorId, pos: Vec2) -> Self {
        Self {
            body: Body::new_rect(id, pos, SHOT_HALF),
            velocity: Vec2::new(0.0, SHOT_SPEED),
            owner: ProjectileOwner::Player,
        }
    }

    pub fn alien_shot(id: ActorId, pos: Vec2) -> Self {
        Self {
            body: Body::new_rect(id, pos, SHOT_HALF),
            velocity: Vec2::new(0.0, -SHOT_SPEED),
            owner: ProjectileOwner::Alien,
        }
    }

    pub fn update(&mut self, dt: f32) {
        let offset = self.velocity * dt;
        self.body.move_by(offset);
    }
}

impl Actor for Projectile {
    fn id(&self) -> ActorId {
        self.body.id()
    }

    fn position(&self) -> Vec2 {
        self.body.pos()
    }

    fn cshape(&self) -> Shape {
        self.body.cshape()
    }
}
