pub mod actor;
pub mod alien;
pub mod formation;
pub mod player;
pub mod projectile;

// Re-export all public types
pub use actor::{Actor, ActorId, Body, IdGen};
pub use alien::{Alien, AlienKind, MysteryShip};
pub use formation::{AlienColumn, AlienGroup};
pub use player::PlayerCannon;
pub use projectile::{Projectile, ProjectileOwner};
