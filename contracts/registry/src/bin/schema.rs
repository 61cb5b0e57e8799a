use chamber_rs::registry::{
    RegistryExecuteMsg, RegistryInstantiateMsg, RegistryMigrateMsg, RegistryQueryMsg,
};
use cosmwasm_schema::write_api;

fn main() {
    write_api! {
        instantiate: RegistryInstantiateMsg,
        execute: RegistryExecuteMsg,
        query: RegistryQueryMsg,
        migrate: RegistryMigrateMsg,
    }
}
