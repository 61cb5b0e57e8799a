use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Coin};
use sha2::{Digest, Sha256};

use crate::wrapper::NativeWrapper;

pub const DEFAULT_MAX_VAULTS_PER_OWNER: u32 = 5;

#[cw_serde]
pub struct FactoryInstantiateMsg {
    pub vault_code_id: u64,
    pub registry: Addr,
    pub treasury: Addr,
    pub fee: Coin,
    pub native_denom: String,
    pub wrapper: Option<NativeWrapper>,
    pub max_vaults_per_owner: Option<u32>,
}

#[cw_serde]
pub struct FactoryMigrateMsg {
    pub vault_code_id: Option<u64>,
}

#[cw_serde]
pub struct FactoryConfig {
    pub owner: Addr,
    pub vault_code_id: u64,
    pub registry: Addr,
    pub treasury: Addr,
    pub fee: Coin,
    pub native_denom: String,
    pub wrapper: Option<NativeWrapper>,
    pub max_vaults_per_owner: u32,
}

#[cw_serde]
pub struct VaultRecord {
    pub owner: Addr,
    pub instance: Addr,
    pub initialized: bool,
}

/// Instantiate2 salts are capped at 64 bytes, so the owner and instance
/// number are hashed down to a fixed 32.
pub fn vault_salt(owner: &Addr, instance_number: u64) -> Binary {
    let mut hasher = Sha256::new();
    hasher.update(owner.as_str().as_bytes());
    hasher.update(instance_number.to_be_bytes());
    Binary::from(hasher.finalize().to_vec())
}

#[cw_serde]
pub enum FactoryExecuteMsg {
    DeployVault {},
    SetFee { fee: Coin },
    SetTreasury { treasury: Addr },
    SetVaultCodeId { code_id: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum FactoryQueryMsg {
    #[returns(FactoryConfig)]
    Config {},
    #[returns(Coin)]
    Fee {},
    #[returns(Addr)]
    Treasury {},
    #[returns(Vec<VaultRecord>)]
    Vaults { owner: Addr },
    #[returns(VaultRecord)]
    Vault { owner: Addr },
    #[returns(u64)]
    InstanceCount {},
}
