//! Deterministic core of the drop-catching game
//!
//! Platform free: time, randomness and rendering all come in from the host
//! through [`RoundController::advance`], [`GameRng`] and the [`Surface`] trait.

pub mod components;
pub mod config;
pub mod messages;
pub mod params;
pub mod resources;
pub mod round;
pub mod scheduler;
pub mod surface;
pub mod systems;

pub use components::*;
pub use config::*;
pub use params::*;
pub use resources::*;
pub use round::*;
pub use scheduler::*;
pub use surface::*;
pub use systems::*;
