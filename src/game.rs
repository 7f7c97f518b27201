use glam::Vec2;
use rand::Rng;

use crate::collision::CollisionGrid;
use crate::entities::player::PLAYER_HALF;
use crate::entities::{
    Actor, ActorId, AlienGroup, IdGen, MysteryShip, PlayerCannon, Projectile,
};
use crate::input::InputState;

/// World size, y-up with the origin at the bottom-left.
pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 650.0;

const PLAYER_BASELINE: f32 = 50.0;
const GROUP_ORIGIN: Vec2 = Vec2::new(100.0, 300.0);
/// Mystery ship spawns per second.
const MYSTERY_SPAWN_RATE: f32 = 0.06;
const MYSTERY_SPAWN_POS: Vec2 = Vec2::new(50.0, FIELD_HEIGHT - 50.0);
const STARTING_LIVES: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
    GameWon,
}

/// Notification sink for everything shown outside the field. The game
/// layer pushes into it synchronously; it never reads back.
pub trait Hud {
    fn update_score(&mut self, score: u32);
    fn update_lives(&mut self, lives: i32);
    fn show_game_over(&mut self);
    fn show_game_won(&mut self);
}

/// What a broad-phase partner turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    /// An alien or the mystery ship; dies to a player shot and scores.
    Invader { points: u32 },
    PlayerShot,
    AlienShot,
    Player,
}

/// The frame loop: owns every actor on the field plus the broad-phase
/// index, score and lives. One `update` call per rendered frame; after a
/// terminal transition (game over / game won) further calls are no-ops.
pub struct GameLayer {
    pub score: u32,
    pub lives: i32,
    pub player: PlayerCannon,
    pub alien_group: AlienGroup,
    /// The single live player shot; firing is blocked while this is Some.
    pub player_shot: Option<Projectile>,
    pub alien_shots: Vec<Projectile>,
    pub mystery_ships: Vec<MysteryShip>,
    collman: CollisionGrid,
    ids: IdGen,
    scheduled: bool,
}

impl GameLayer {
    pub fn new(hud: &mut dyn Hud) -> Self {
        let mut ids = IdGen::default();
        let player = Self::fresh_player(&mut ids);
        let alien_group = AlienGroup::new(&mut ids, GROUP_ORIGIN.x, GROUP_ORIGIN.y);

        // Recommended cell size is the widest actor * 1.25
        let cell = PLAYER_HALF.x * 2.0 * 1.25;
        let layer = Self {
            score: 0,
            lives: STARTING_LIVES,
            player,
            alien_group,
            player_shot: None,
            alien_shots: Vec::new(),
            mystery_ships: Vec::new(),
            collman: CollisionGrid::new(FIELD_WIDTH, FIELD_HEIGHT, cell),
            ids,
            scheduled: true,
        };
        hud.update_score(layer.score);
        hud.update_lives(layer.lives);
        layer
    }

    fn fresh_player(ids: &mut IdGen) -> PlayerCannon {
        PlayerCannon::new(ids.alloc(), FIELD_WIDTH / 2.0, PLAYER_BASELINE)
    }

    /// False once the session ended in game over or game won.
    pub fn is_running(&self) -> bool {
        self.scheduled
    }

    pub fn alloc_id(&mut self) -> ActorId {
        self.ids.alloc()
    }

    /// Advances the game by one frame.
    pub fn update(&mut self, dt: f32, input: &InputState, hud: &mut dyn Hud) {
        if !self.scheduled {
            return;
        }

        self.rebuild_index();

        self.resolve_player_shot(hud);

        if self.player_hit() {
            self.respawn_player(hud);
        }

        if self.alien_group.is_empty() {
            self.scheduled = false;
            hud.show_game_won();
        }

        let mut rng = rand::rng();
        for i in 0..self.alien_group.columns.len() {
            if let Some(shot) = self.alien_group.columns[i].try_shoot(&mut rng, dt, &mut self.ids)
            {
                self.alien_shots.push(shot);
            }
        }

        if input.fire && self.player_shot.is_none() {
            let shot = Projectile::player_shot(self.ids.alloc(), self.player.gun_position());
            self.player_shot = Some(shot);
        }

        self.player.update(dt, input, FIELD_WIDTH);
        if let Some(shot) = self.player_shot.as_mut() {
            shot.update(dt);
        }
        for shot in &mut self.alien_shots {
            shot.update(dt);
        }
        for ship in &mut self.mystery_ships {
            ship.update(dt);
        }

        self.alien_group.update(dt, FIELD_WIDTH);

        if rng.random_bool(f64::from((MYSTERY_SPAWN_RATE * dt).min(1.0))) {
            let ship = MysteryShip::new(self.ids.alloc(), MYSTERY_SPAWN_POS, &mut rng);
            self.mystery_ships.push(ship);
        }
    }

    /// Re-derives the broad-phase index from the scene, then drops whatever
    /// the index refused — that is how actors that left the field die. The
    /// player is clamped to the field and cannot become unknown.
    fn rebuild_index(&mut self) {
        self.collman.clear();
        self.collman.add(&self.player);
        if let Some(shot) = &self.player_shot {
            self.collman.add(shot);
        }
        for shot in &self.alien_shots {
            self.collman.add(shot);
        }
        for ship in &self.mystery_ships {
            self.collman.add(ship);
        }
        for alien in self.alien_group.iter() {
            self.collman.add(alien);
        }

        let collman = &self.collman;
        if self.player_shot.as_ref().is_some_and(|s| !collman.knows(s.id())) {
            self.player_shot = None;
        }
        self.alien_shots.retain(|s| collman.knows(s.id()));
        self.mystery_ships.retain(|s| collman.knows(s.id()));
        let strays: Vec<ActorId> = self
            .alien_group
            .iter()
            .filter(|a| !collman.knows(a.id()))
            .map(|a| a.id())
            .collect();
        for id in strays {
            self.alien_group.remove(id);
        }
    }

    /// The singleton player shot resolves against at most one partner per
    /// frame; only invaders die to it and score.
    fn resolve_player_shot(&mut self, hud: &mut dyn Hud) {
        let Some(shot) = &self.player_shot else {
            return;
        };
        let Some(&other) = self.collman.iter_colliding(shot.id()).first() else {
            return;
        };
        if let Some(Hit::Invader { points }) = self.classify(other) {
            self.remove_actor(other);
            self.player_shot = None;
            self.score += points;
            hud.update_score(self.score);
        }
    }

    /// Any contact kills the player and the first partner found.
    fn player_hit(&mut self) -> bool {
        let Some(&other) = self.collman.iter_colliding(self.player.id()).first() else {
            return false;
        };
        self.remove_actor(other);
        true
    }

    fn respawn_player(&mut self, hud: &mut dyn Hud) {
        self.lives -= 1;
        if self.lives < 0 {
            self.scheduled = false;
            hud.show_game_over();
        } else {
            self.player = Self::fresh_player(&mut self.ids);
            hud.update_lives(self.lives);
        }
    }

    fn classify(&self, id: ActorId) -> Option<Hit> {
        if self.player.id() == id {
            return Some(Hit::Player);
        }
        if self.player_shot.as_ref().is_some_and(|s| s.id() == id) {
            return Some(Hit::PlayerShot);
        }
        if self.alien_shots.iter().any(|s| s.id() == id) {
            return Some(Hit::AlienShot);
        }
        if let Some(ship) = self.mystery_ships.iter().find(|s| s.id() == id) {
            return Some(Hit::Invader {
                points: ship.points(),
            });
        }
        if let Some(alien) = self.alien_group.iter().find(|a| a.id() == id) {
            return Some(Hit::Invader {
                points: alien.points(),
            });
        }
        None
    }

    /// Removes an actor by id wherever it lives. Unknown ids are ignored.
    fn remove_actor(&mut self, id: ActorId) {
        if self.player_shot.as_ref().is_some_and(|s| s.id() == id) {
            self.player_shot = None;
            return;
        }
        if self.alien_group.remove(id) {
            return;
        }
        self.alien_shots.retain(|s| s.id() != id);
        self.mystery_ships.retain(|s| s.id() != id);
    }
}
