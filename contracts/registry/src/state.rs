use chamber_rs::{factory::VaultRecord, registry::RegistryConfig};
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<RegistryConfig> = Item::new("config");
pub const OWNERS: Map<&Addr, u32> = Map::new("owners_v1");
pub const VAULTS: Map<&Addr, Vec<VaultRecord>> = Map::new("vaults_v1");
