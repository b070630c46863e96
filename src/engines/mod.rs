//! Search engine module
//!
//! Defines the engine value type, the owning manager with its bang index,
//! and the field validation used by editing surfaces.

mod engine;
mod manager;
mod validation;

pub use engine::{build_bang_for_name, SearchEngine};
pub use manager::{ManagerEvent, ObserverId, SearchEngineManager};
pub use validation::{
    validate_address, validate_bang, validate_name, EngineField, ValidationError,
};
