use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, ActorId, IdGen};
use super::alien::{Alien, AlienKind};
use super::projectile::Projectile;

/// Distance from either wall at which the bottom-most alien of a column
/// triggers a direction reversal.
pub const TURN_MARGIN: f32 = 50.0;
pub const ROW_SPACING: f32 = 60.0;
pub const COLUMN_SPACING: f32 = 60.0;
pub const COLUMN_COUNT: usize = 10;
/// Seconds per lock-step move of the whole formation.
pub const STEP_PERIOD: f32 = 1.0;
/// Horizontal distance covered by one lock-step move.
pub const STEP_SPEED: f32 = 10.0;
/// Vertical drop taken instead of a horizontal move when a side is reached.
pub const DESCENT: f32 = 10.0;
/// Shots per second fired by a non-empty column.
pub const COLUMN_FIRE_RATE: f32 = 0.06;
/// Shots leave this far below the bottom-most alien.
const SHOT_DROP: f32 = 50.0;

/// Bottom-to-top breeds of a fresh column.
const ROWS: [AlienKind; 5] = [
    AlienKind::Octopus,
    AlienKind::Octopus,
    AlienKind::Crab,
    AlienKind::Crab,
    AlienKind::Squid,
];

/// One vertical slice of the invader grid. Index 0 is the bottom-most
/// alien; it decides wall turns and is the one that fires.
#[derive(Debug)]
pub struct AlienColumn {
    pub aliens: Vec<Alien>,
}

impl AlienColumn {
    pub fn new(ids: &mut IdGen, x: f32, y: f32) -> Self {
        let aliens = ROWS
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                Alien::new(
                    ids.alloc(),
                    Vec2::new(x, y + i as f32 * ROW_SPACING),
                    kind,
                )
            })
            .collect();
        Self { aliens }
    }

    /// True when the bottom-most alien has crossed the turn margin on the
    /// side the group is currently heading for. Empty columns never turn.
    pub fn should_turn(&self, direction: i8, field_width: f32) -> bool {
        let Some(alien) = self.aliens.first() else {
            return false;
        };
        let x = alien.position().x;
        (direction > 0 && x >= field_width - TURN_MARGIN)
            || (direction < 0 && x <= TURN_MARGIN)
    }

    /// Removes an alien by id. Ids that are not members are silently
    /// ignored; the rest of the column is never disturbed. Returns whether
    /// anything was removed.
    pub fn remove(&mut self, id: ActorId) -> bool {
        match self.aliens.iter().position(|a| a.id() == id) {
            Some(i) => {
                self.aliens.remove(i);
                true
            }
            None => false,
        }
    }

    /// Fires from the bottom-most alien with probability
    /// `COLUMN_FIRE_RATE * dt`. Empty columns never fire.
    pub fn try_shoot(
        &self,
        rng: &mut impl Rng,
        dt: f32,
        ids: &mut IdGen,
    ) -> Option<Projectile> {
        let alien = self.aliens.first()?;
        if !rng.random_bool(f64::from((COLUMN_FIRE_RATE * dt).min(1.0))) {
            return None;
        }
        let origin = alien.position() - Vec2::new(0.0, SHOT_DROP);
        Some(Projectile::alien_shot(ids.alloc(), origin))
    }
}

/// The whole invader grid: columns marching in lock-step, reversing and
/// descending at the walls.
#[derive(Debug)]
pub struct AlienGroup {
    pub columns: Vec<AlienColumn>,
    /// +1 = right, -1 = left.
    pub direction: i8,
    elapsed: f32,
}

impl AlienGroup {
    pub fn new(ids: &mut IdGen, x: f32, y: f32) -> Self {
        let columns = (0..COLUMN_COUNT)
            .map(|i| AlienColumn::new(ids, x + i as f32 * COLUMN_SPACING, y))
            .collect();
        Self {
            columns,
            direction: 1,
            elapsed: 0.0,
        }
    }

    /// Aliens in column-major, bottom-to-top order.
    pub fn iter(&self) -> impl Iterator<Item = &Alien> {
        self.columns.iter().flat_map(|c| c.aliens.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.columns.iter_mut().flat_map(|c| c.aliens.iter_mut())
    }

    pub fn alien_count(&self) -> usize {
        self.columns.iter().map(|c| c.aliens.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.aliens.is_empty())
    }

    /// Removes an alien by id from whichever column holds it. Unknown ids
    /// are ignored.
    pub fn remove(&mut self, id: ActorId) -> bool {
        self.columns.iter_mut().any(|c| c.remove(id))
    }

    pub fn side_reached(&self, field_width: f32) -> bool {
        self.columns
            .iter()
            .any(|c| c.should_turn(self.direction, field_width))
    }

    /// Advances the march. Every full period buys one lock-step move: a
    /// horizontal shift, or — when any column reached a side — a direction
    /// flip plus a pure vertical drop. A large `dt` buys several moves, so
    /// formation timing does not depend on the frame rate.
    pub fn update(&mut self, dt: f32, field_width: f32) {
        self.elapsed += dt;
        while self.elapsed >= STEP_PERIOD {
            self.elapsed -= STEP_PERIOD;
            let offset = if self.side_reached(field_width) {
                self.direction = -self.direction;
                Vec2::new(0.0, -DESCENT)
            } else {
                Vec2::new(f32::from(self.direction) * STEP_SPEED, 0.0)
            };
            for alien in self.iter_mut() {
                alien.move_by(offset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const FIELD: f32 = 800.0;

    fn group_at(x: f32) -> (AlienGroup, IdGen) {
        let mut ids = IdGen::default();
        let group = AlienGroup::new(&mut ids, x, 300.0);
        (group, ids)
    }

    #[test]
    fn test_fresh_column_rows_bottom_to_top() {
        let mut ids = IdGen::default();
        let column = AlienColumn::new(&mut ids, 100.0, 300.0);
        assert_eq!(column.aliens.len(), 5);
        let kinds: Vec<_> = column.aliens.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlienKind::Octopus,
                AlienKind::Octopus,
                AlienKind::Crab,
                AlienKind::Crab,
                AlienKind::Squid,
            ]
        );
        // y ascends with the index; index 0 is the bottom-most
        for (i, alien) in column.aliens.iter().enumerate() {
            assert_eq!(alien.position().y, 300.0 + i as f32 * ROW_SPACING);
        }
    }

    #[test]
    fn test_remove_by_id_ignores_non_members() {
        let mut ids = IdGen::default();
        let mut column = AlienColumn::new(&mut ids, 100.0, 300.0);
        let victim = column.aliens[2].id();
        assert!(column.remove(victim));
        assert_eq!(column.aliens.len(), 4);
        // Removing it again is a no-op
        assert!(!column.remove(victim));
        assert_eq!(column.aliens.len(), 4);
    }

    #[test]
    fn test_should_turn_respects_margin_and_direction() {
        let mut ids = IdGen::default();
        let center = AlienColumn::new(&mut ids, 400.0, 300.0);
        assert!(!center.should_turn(1, FIELD));
        assert!(!center.should_turn(-1, FIELD));

        let at_left = AlienColumn::new(&mut ids, 50.0, 300.0);
        assert!(at_left.should_turn(-1, FIELD));
        assert!(!at_left.should_turn(1, FIELD));

        let at_right = AlienColumn::new(&mut ids, 750.0, 300.0);
        assert!(at_right.should_turn(1, FIELD));
        assert!(!at_right.should_turn(-1, FIELD));
    }

    #[test]
    fn test_empty_column_never_turns_or_fires() {
        let mut ids = IdGen::default();
        let mut column = AlienColumn::new(&mut ids, 50.0, 300.0);
        column.aliens.clear();
        assert!(!column.should_turn(-1, FIELD));
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(column.try_shoot(&mut rng, 1.0, &mut ids).is_none());
        }
    }

    #[test]
    fn test_column_fires_from_bottom_most_alien() {
        let mut ids = IdGen::default();
        let column = AlienColumn::new(&mut ids, 100.0, 300.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut fired = 0;
        for _ in 0..2000 {
            if let Some(shot) = column.try_shoot(&mut rng, 1.0, &mut ids) {
                fired += 1;
                assert_eq!(shot.position(), Vec2::new(100.0, 250.0));
            }
        }
        assert!(fired > 0);
    }

    #[test]
    fn test_group_iterates_column_major_bottom_to_top() {
        let (group, _) = group_at(100.0);
        assert_eq!(group.alien_count(), 50);
        let positions: Vec<Vec2> = group.iter().map(|a| a.position()).collect();
        for (i, pos) in positions.iter().enumerate() {
            let column = i / 5;
            let row = i % 5;
            assert_eq!(
                *pos,
                Vec2::new(
                    100.0 + column as f32 * COLUMN_SPACING,
                    300.0 + row as f32 * ROW_SPACING
                )
            );
        }
    }

    #[test]
    fn test_update_marches_horizontally_once_per_period() {
        let (mut group, _) = group_at(100.0);
        group.update(0.5, FIELD);
        assert_eq!(group.iter().next().map(|a| a.position().x), Some(100.0));
        group.update(0.5, FIELD);
        assert_eq!(group.iter().next().map(|a| a.position().x), Some(110.0));
    }

    #[test]
    fn test_update_catches_up_over_multiple_periods() {
        let (mut group, _) = group_at(100.0);
        group.update(3.5, FIELD);
        for alien in group.iter() {
            assert_eq!(alien.position().x % 10.0, 0.0);
        }
        assert_eq!(group.iter().next().map(|a| a.position().x), Some(130.0));
    }

    #[test]
    fn test_side_reached_flips_direction_and_descends() {
        let (mut group, _) = group_at(100.0);
        group.direction = -1;
        // Drag the whole grid so the leftmost column sits inside the margin
        for alien in group.iter_mut() {
            alien.move_by(Vec2::new(-60.0, 0.0));
        }
        let before: Vec<Vec2> = group.iter().map(|a| a.position()).collect();

        group.update(1.0, FIELD);

        assert_eq!(group.direction, 1);
        for (alien, pos) in group.iter().zip(before) {
            assert_eq!(alien.position().x, pos.x);
            assert_eq!(alien.position().y, pos.y - DESCENT);
        }
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_group_moves_in_lock_step(
                steps in prop::collection::vec(0.1f32..2.5, 1..40)
            ) {
                let (mut group, _) = group_at(100.0);
                let start: Vec<Vec2> = group.iter().map(|a| a.position()).collect();
                for dt in steps {
                    group.update(dt, FIELD);
                }
                // Every alien has taken exactly the same total offset
                let offsets: Vec<Vec2> = group
                    .iter()
                    .zip(&start)
                    .map(|(a, s)| a.position() - *s)
                    .collect();
                for offset in &offsets {
                    prop_assert_eq!(*offset, offsets[0]);
                }
            }

            #[test]
            fn test_bottom_row_never_escapes_the_walls(
                steps in prop::collection::vec(0.2f32..1.5, 1..200)
            ) {
                let (mut group, _) = group_at(100.0);
                for dt in steps {
                    group.update(dt, FIELD);
                    for column in &group.columns {
                        let x = column.aliens[0].position().x;
                        // One step past the margin is the worst case before
                        // the turn takes effect
                        prop_assert!(x >= TURN_MARGIN - STEP_SPEED);
                        prop_assert!(x <= FIELD - TURN_MARGIN + STEP_SPEED);
                    }
                }
            }
        }
    }
}
