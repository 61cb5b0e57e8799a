pub mod contract;
pub mod state;
pub mod swap;
