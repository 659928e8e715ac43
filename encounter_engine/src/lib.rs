//! # Encounter Engine
//!
//! The behaviour side of the encounter system. Everything that rolls dice
//! lives here and operates on the typed values from `game_rules`.
//!
//! ## Core Components
//!
//! - **rng**: Seeded random source threaded through a whole command
//! - **catalog**: Skill generators grouped by slot applicability
//! - **generator**: Procedural equipment with rarity, stats, names, and skills
//! - **combat**: Round loop, damage primitive, enrage state, battle log, rewards
//! - **loot**: Reconciles a drop against same-named held items
//! - **monster**: Bestiary scenes and level-scaled spawning
//! - **store**: Player and equipment store seams with in-memory backends
//! - **encounter**: The thin orchestrator serialising every command
//!
//! ## Design Philosophy
//!
//! - **Snapshots in, deltas out**: Engines never hold references into storage
//! - **Injected services**: Configuration and rng are passed in, never global
//! - **Seedable**: Every random decision flows through one `GameRng`

pub mod catalog;
pub mod combat;
pub mod encounter;
pub mod error;
pub mod generator;
pub mod loot;
pub mod monster;
pub mod rng;
pub mod store;

pub use catalog::*;
pub use combat::*;
pub use encounter::*;
pub use error::*;
pub use generator::*;
pub use loot::*;
pub use monster::*;
pub use rng::*;
pub use store::*;
