use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

use crate::factory::VaultRecord;

#[cw_serde]
pub struct RegistryInstantiateMsg {
    pub admin: Option<Addr>,
}

#[cw_serde]
pub struct RegistryMigrateMsg {}

#[cw_serde]
pub struct RegistryConfig {
    pub admin: Addr,
    pub factory: Option<Addr>,
}

#[cw_serde]
pub struct VaultOwner {
    pub owner: Addr,
    pub count: u32,
}

#[cw_serde]
pub enum RegistryExecuteMsg {
    SetFactory { factory: Addr },
    StoreVault { owner: Addr, instance: Addr },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum RegistryQueryMsg {
    #[returns(RegistryConfig)]
    Config {},
    #[returns(VaultOwner)]
    VaultOwner { owner: Addr },
    #[returns(Vec<VaultRecord>)]
    Vaults { owner: Addr },
}
