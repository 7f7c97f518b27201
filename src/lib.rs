// Library exports for testing
pub use collision::{CollisionGrid, Shape};
pub use entities::{
    Actor, ActorId, Alien, AlienColumn, AlienGroup, AlienKind, Body, IdGen, MysteryShip,
    PlayerCannon, Projectile, ProjectileOwner,
};
pub use game::{GameLayer, GameState, Hud};
pub use input::InputState;

pub mod app;
pub mod audio;
pub mod collision;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;
