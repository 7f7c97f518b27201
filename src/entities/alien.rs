use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::actor::{Actor, ActorId, Body};
use crate::collision::Shape;

pub const ALIEN_HALF: Vec2 = Vec2::new(18.0, 12.0);

pub const MYSTERY_RADIUS: f32 = 15.0;
/// Horizontal speed of the bonus ship in world units per second.
pub const MYSTERY_SPEED: f32 = 150.0;
pub const MYSTERY_SCORES: [u32; 4] = [10, 50, 100, 200];

/// Row-dependent alien breed; decides the point value and the glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlienKind {
    /// Bottom two rows.
    Octopus,
    /// Middle two rows.
    Crab,
    /// Top row.
    Squid,
}

impl AlienKind {
    pub fn points(self) -> u32 {
        match self {
            AlienKind::Octopus => 10,
            AlienKind::Crab => 20,
            AlienKind::Squid => 40,
        }
    }
}

/// One invader in the marching grid. It has no behavior of its own; the
/// formation moves it in lock-step and the column fires from it.
#[derive(Debug, Clone)]
pub struct Alien {
    body: Body,
    pub kind: AlienKind,
}

impl Alien {
    pub fn new(id: ActorId, pos: Vec2, kind: AlienKind) -> Self {
        Self {
            body: Body::new_rect(id, pos, ALIEN_HALF),
            kind,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.body.move_by(offset);
    }
}

impl Actor for Alien {
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

/// Bonus ship crossing the top of the field; worth a random score from
/// [`MYSTERY_SCORES`].
#[derive(Debug, Clone)]
pub struct MysteryShip {
    body: Body,
    points: u32,
}

impl MysteryShip {
    pub fn new(id: ActorId, pos: Vec2, rng: &mut impl Rng) -> Self {
        let points = MYSTERY_SCORES
            .choose(rng)
            .copied()
            .unwrap_or(MYSTERY_SCORES[0]);
        Self {
            body: Body::new_circle(id, pos, MYSTERY_RADIUS),
            points,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn update(&mut self, dt: f32) {
        self.body.move_by(Vec2::new(MYSTERY_SPEED * dt, 0.0));
    }
}

impl Actor for MysteryShip {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::IdGen;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_points_by_kind() {
        assert_eq!(AlienKind::Octopus.points(), 10);
        assert_eq!(AlienKind::Crab.points(), 20);
        assert_eq!(AlienKind::Squid.points(), 40);
    }

    #[test]
    fn test_mystery_score_comes_from_fixed_set() {
        let mut ids = IdGen::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let ship = MysteryShip::new(ids.alloc(), Vec2::new(50.0, 600.0), &mut rng);
            assert!(MYSTERY_SCORES.contains(&ship.points()));
        }
    }

    #[test]
    fn test_mystery_ship_drifts_right() {
        let mut ids = IdGen::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut ship = MysteryShip::new(ids.alloc(), Vec2::new(50.0, 600.0), &mut rng);
        ship.update(0.1);
        assert_eq!(ship.position(), Vec2::new(65.0, 600.0));
    }
}
