pub mod harness;
pub mod mock;
pub mod vault_handler;
