// Models module - game state, reference data and planning results

pub mod airline;
pub mod aircraft;
pub mod fleet;
pub mod plan;
pub mod reference;
pub mod resource;
pub mod route;

// Re-export all models for easier imports
pub use airline::*;
pub use aircraft::*;
pub use fleet::*;
pub use plan::*;
pub use reference::*;
pub use resource::*;
pub use route::*;
