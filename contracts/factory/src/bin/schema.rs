use chamber_rs::factory::{
    FactoryExecuteMsg, FactoryInstantiateMsg, FactoryMigrateMsg, FactoryQueryMsg,
};
use cosmwasm_schema::write_api;

fn main() {
    write_api! {
        instantiate: FactoryInstantiateMsg,
        execute: FactoryExecuteMsg,
        query: FactoryQueryMsg,
        migrate: FactoryMigrateMsg,
    }
}
