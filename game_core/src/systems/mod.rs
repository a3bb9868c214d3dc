pub mod feedback;
pub mod lifecycle;
pub mod scoring;
pub mod spawner;

pub use feedback::*;
pub use lifecycle::*;
pub use scoring::*;
pub use spawner::*;
