use glam::Vec2;

use super::actor::{Actor, ActorId, Body};
use crate::collision::Shape;
use crate::input::InputState;

pub const PLAYER_HALF: Vec2 = Vec2::new(24.0, 14.0);
/// Horizontal speed in world units per second.
pub const PLAYER_SPEED: f32 = 200.0;
/// Vertical offset above the hull where shots leave the cannon.
pub const GUN_OFFSET: f32 = 50.0;

#[derive(Debug, Clone)]
pub struct PlayerCannon {
    body: Body,
}

impl PlayerCannon {
    pub fn new(id: ActorId, x: f32, y: f32) -> Self {
        Self {
            body: Body::new_rect(id, Vec2::new(x, y), PLAYER_HALF),
        }
    }

    /// Applies this frame's held-key movement. The cannon's half-width
    /// always stays inside [0, field_width].
    pub fn update(&mut self, dt: f32, input: &InputState, field_width: f32) {
        let movement = i32::from(input.right) - i32::from(input.left);
        if movement == 0 {
            return;
        }
        let target = (self.body.pos().x + PLAYER_SPEED * movement as f32 * dt)
            .clamp(PLAYER_HALF.x, field_width - PLAYER_HALF.x);
        let offset = target - self.body.pos().x;
        self.body.move_by(Vec2::new(offset, 0.0));
    }

    /// Where a newly fired shot appears.
    pub fn gun_position(&self) -> Vec2 {
        self.body.pos() + Vec2::new(0.0, GUN_OFFSET)
    }
}

impl Actor for PlayerCannon {
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

    fn cannon(x: f32) -> PlayerCannon {
        PlayerCannon::new(IdGen::default().alloc(), x, 50.0)
    }

    fn held(left: bool, right: bool) -> InputState {
        InputState {
            left,
            right,
            fire: false,
        }
    }

    #[test]
    fn test_moves_right_by_speed_times_dt() {
        let mut player = cannon(400.0);
        player.update(0.1, &held(false, true), 800.0);
        assert_eq!(player.position().x, 420.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut player = cannon(400.0);
        player.update(0.1, &held(true, true), 800.0);
        assert_eq!(player.position().x, 400.0);
    }

    #[test]
    fn test_shot_spawns_above_the_hull() {
        let player = cannon(400.0);
        assert_eq!(player.gun_position(), Vec2::new(400.0, 100.0));
    }

    #[test]
    fn test_move_updates_bounding_shape() {
        let mut player = cannon(400.0);
        player.update(0.1, &held(true, false), 800.0);
        assert_eq!(player.cshape().center(), player.position());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_half_width_stays_inside_field(
                initial_x in 24.0f32..776.0,
                moves in prop::collection::vec(prop::bool::ANY, 0..200)
            ) {
                let mut player = cannon(initial_x);
                for move_right in moves {
                    player.update(0.05, &held(!move_right, move_right), 800.0);
                    prop_assert!(player.position().x >= PLAYER_HALF.x);
                    prop_assert!(player.position().x <= 800.0 - PLAYER_HALF.x);
                }
            }
        }
    }
}
