use glam::Vec2;

use crate::collision::Shape;

/// Stable identity of an actor on the field. Ids are handed out by
/// [`IdGen`] and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u32);

/// Monotonic id allocator; one per game session.
#[derive(Debug, Default)]
pub struct IdGen {
    next: u32,
}

impl IdGen {
    pub fn alloc(&mut self) -> ActorId {
        let id = ActorId(self.next);
        self.next += 1;
        id
    }
}

/// Shared state of anything on the field: identity, position and the
/// bounding shape the broad-phase index tests. The shape is kept centered
/// on the position.
#[derive(Debug, Clone)]
pub struct Body {
    id: ActorId,
    pos: Vec2,
    cshape: Shape,
}

impl Body {
    pub fn new_rect(id: ActorId, pos: Vec2, half: Vec2) -> Self {
        Self {
            id,
            pos,
            cshape: Shape::rect(pos, half),
        }
    }

    pub fn new_circle(id: ActorId, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            cshape: Shape::circle(pos, radius),
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn cshape(&self) -> Shape {
        self.cshape
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.pos += offset;
        self.cshape = self.cshape.recentered(self.pos);
    }
}

/// What the broad-phase index needs from an actor.
pub trait Actor {
    fn id(&self) -> ActorId;
    fn position(&self) -> Vec2;
    fn cshape(&self) -> Shape;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idgen_allocates_unique_ids() {
        let mut ids = IdGen::default();
        let a = ids.alloc();
        let b = ids.alloc();
        let c = ids.alloc();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_move_by_recenters_shape() {
        let mut ids = IdGen::default();
        let mut body = Body::new_rect(ids.alloc(), Vec2::new(10.0, 20.0), Vec2::new(4.0, 4.0));
        body.move_by(Vec2::new(5.0, -5.0));
        assert_eq!(body.pos(), Vec2::new(15.0, 15.0));
        assert_eq!(body.cshape().center(), body.pos());
    }

    #[test]
    fn test_circle_body_keeps_radius_when_moved() {
        let mut ids = IdGen::default();
        let mut body = Body::new_circle(ids.alloc(), Vec2::new(50.0, 600.0), 15.0);
        body.move_by(Vec2::new(30.0, 0.0));
        match body.cshape() {
            Shape::Circle { center, radius } => {
                assert_eq!(center, Vec2::new(80.0, 600.0));
                assert_eq!(radius, 15.0);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }
}
