use chamber_rs::vault::{VaultExecuteMsg, VaultInstantiateMsg, VaultMigrateMsg, VaultQueryMsg};
use cosmwasm_schema::write_api;

fn main() {
    write_api! {
        instantiate: VaultInstantiateMsg,
        execute: VaultExecuteMsg,
        query: VaultQueryMsg,
        migrate: VaultMigrateMsg,
    }
}
