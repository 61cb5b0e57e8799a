pub mod core;
pub mod events;
pub mod factory;
pub mod lending;
pub mod registry;
pub mod vault;
pub mod wrapper;
