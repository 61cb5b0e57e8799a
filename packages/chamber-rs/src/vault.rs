use std::fmt::Display;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, HexBinary, Uint128};
use sha2::{Digest, Sha256};

use crate::wrapper::NativeWrapper;

#[cw_serde]
pub struct VaultInstantiateMsg {
    pub owner: Addr,
    pub native_denom: String,
    pub wrapper: Option<NativeWrapper>,
}

#[cw_serde]
pub struct VaultMigrateMsg {}

#[cw_serde]
pub struct VaultConfig {
    pub owner: Addr,
    pub operator: Option<Addr>,
    pub factory: Addr,
    pub status: VaultStatus,
    pub native_denom: String,
    pub wrapper: Option<NativeWrapper>,
}

#[cw_serde]
#[derive(Copy, Eq, PartialOrd, Ord)]
pub enum VaultStatus {
    Active = 0,
    Paused = 1,
    Deprecated = 2,
}

impl VaultStatus {
    pub fn can_transition_to(&self, next: &VaultStatus) -> bool {
        match (self, next) {
            (VaultStatus::Deprecated, _) => false,
            (current, next) => current != next,
        }
    }
}

impl Display for VaultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultStatus::Active => write!(f, "active"),
            VaultStatus::Paused => write!(f, "paused"),
            VaultStatus::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// Closed set of capabilities a sender can hold over a vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Owner,
    Operator,
    Neither,
}

impl VaultConfig {
    pub fn role_of(&self, sender: &Addr) -> Role {
        if *sender == self.owner {
            Role::Owner
        } else if self.operator.as_ref() == Some(sender) {
            Role::Operator
        } else {
            Role::Neither
        }
    }

    pub fn is_native(&self, asset: &str) -> bool {
        asset == self.native_denom
    }
}

#[cw_serde]
#[derive(Copy)]
pub enum StrategyStatus {
    Active = 0,
    Deactivated = 1,
}

#[cw_serde]
pub struct Strategy {
    pub hash_id: HexBinary,
    pub idx: u32,
    pub buy_asset: String,
    pub sell_asset: String,
    pub amount: Uint128,
    pub frequency: u64,
    pub timestamp: u64,
    pub last_swap: u64,
    pub swap_count: u64,
    pub status: StrategyStatus,
}

impl Strategy {
    /// First execution is always eligible.
    pub fn next_execution(&self) -> u64 {
        if self.last_swap == 0 {
            return 0;
        }
        self.last_swap.saturating_add(self.frequency)
    }
}

#[cw_serde]
pub struct StrategyUpdate {
    pub hash_id: HexBinary,
    pub buy_asset: String,
    pub sell_asset: String,
    pub amount: Uint128,
    pub frequency: u64,
}

pub fn strategy_hash_id(owner: &Addr, buy_asset: &str, sell_asset: &str) -> HexBinary {
    let mut hasher = Sha256::new();
    hasher.update(owner.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(buy_asset.as_bytes());
    hasher.update([0u8]);
    hasher.update(sell_asset.as_bytes());
    HexBinary::from(hasher.finalize().to_vec())
}

pub fn strategy_hash_from_name(name: &str) -> HexBinary {
    HexBinary::from(Sha256::digest(name.as_bytes()).to_vec())
}

#[cw_serde]
pub enum VaultExecuteMsg {
    Deposit {
        asset: String,
        amount: Uint128,
    },
    DepositNative {},
    Withdraw {
        asset: String,
        amount: Uint128,
    },
    WithdrawNative {
        amount: Uint128,
    },
    WrapNative {
        amount: Uint128,
    },
    UnwrapNative {
        amount: Uint128,
    },
    SetOperator {
        operator: Option<Addr>,
    },
    SetStatus {
        status: VaultStatus,
    },
    ExecuteSwap {
        sell_asset: String,
        buy_asset: String,
        amount: Uint128,
        allowance_target: Addr,
        call_target: Addr,
        call_data: Binary,
    },
    CreateStrategy {
        hash_id: Option<HexBinary>,
        buy_asset: String,
        sell_asset: String,
        amount: Uint128,
        frequency: u64,
    },
    UpdateStrategy {
        update: StrategyUpdate,
    },
    DeprecateStrategy {
        hash_id: HexBinary,
    },
    DeleteStrategy {
        hash_id: HexBinary,
    },
    ExecuteStrategy {
        hash_id: HexBinary,
        allowance_target: Addr,
        call_target: Addr,
        call_data: Binary,
    },
    Supply {
        market: Addr,
        asset: String,
        amount: Uint128,
        receipt_asset: String,
    },
    Redeem {
        market: Addr,
        receipt_asset: String,
        amount: Uint128,
        asset: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum VaultQueryMsg {
    #[returns(VaultConfig)]
    Config {},
    #[returns(Addr)]
    Owner {},
    #[returns(Option<Addr>)]
    Operator {},
    #[returns(Addr)]
    Factory {},
    #[returns(VaultStatus)]
    Status {},
    #[returns(Uint128)]
    BalanceOf { asset: String },
    #[returns(Strategy)]
    Strategy { hash_id: HexBinary },
    #[returns(Vec<Strategy>)]
    Strategies {},
    #[returns(Vec<Strategy>)]
    ActiveStrategies {},
    #[returns(HexBinary)]
    StrategyHash {
        buy_asset: String,
        sell_asset: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> VaultConfig {
        VaultConfig {
            owner: Addr::unchecked("owner"),
            operator: Some(Addr::unchecked("operator")),
            factory: Addr::unchecked("factory"),
            status: VaultStatus::Active,
            native_denom: "rune".to_string(),
            wrapper: None,
        }
    }

    #[test]
    fn resolves_roles() {
        let config = config();

        assert_eq!(config.role_of(&Addr::unchecked("owner")), Role::Owner);
        assert_eq!(config.role_of(&Addr::unchecked("operator")), Role::Operator);
        assert_eq!(config.role_of(&Addr::unchecked("rando")), Role::Neither);
    }

    #[test]
    fn unset_operator_grants_nothing() {
        let config = VaultConfig {
            operator: None,
            ..config()
        };

        assert_eq!(config.role_of(&Addr::unchecked("operator")), Role::Neither);
    }

    #[test]
    fn deprecated_is_terminal() {
        assert!(VaultStatus::Active.can_transition_to(&VaultStatus::Paused));
        assert!(VaultStatus::Paused.can_transition_to(&VaultStatus::Active));
        assert!(VaultStatus::Paused.can_transition_to(&VaultStatus::Deprecated));
        assert!(!VaultStatus::Active.can_transition_to(&VaultStatus::Active));
        assert!(!VaultStatus::Deprecated.can_transition_to(&VaultStatus::Active));
        assert!(VaultStatus::Active < VaultStatus::Deprecated);
    }

    #[test]
    fn status_codes_are_stable() {
        assert_eq!(StrategyStatus::Active as u8, 0);
        assert_eq!(StrategyStatus::Deactivated as u8, 1);
        assert_eq!(VaultStatus::Deprecated as u8, 2);
    }

    #[test]
    fn derived_hash_depends_on_every_component() {
        let owner = Addr::unchecked("owner");
        let hash = strategy_hash_id(&owner, "uatom", "uusdc");

        assert_eq!(hash.len(), 32);
        assert_eq!(hash, strategy_hash_id(&owner, "uatom", "uusdc"));
        assert_ne!(hash, strategy_hash_id(&owner, "uusdc", "uatom"));
        assert_ne!(hash, strategy_hash_id(&Addr::unchecked("other"), "uatom", "uusdc"));
        assert_ne!(
            strategy_hash_id(&owner, "ua", "tomuusdc"),
            strategy_hash_id(&owner, "uatom", "uusdc")
        );
    }

    #[test]
    fn named_hash_is_sha256_of_name() {
        assert_eq!(
            strategy_hash_from_name("First Strategy"),
            HexBinary::from(Sha256::digest(b"First Strategy").to_vec())
        );
        assert_ne!(
            strategy_hash_from_name("First Strategy"),
            strategy_hash_from_name("Second Strategy")
        );
    }

    #[test]
    fn next_execution_respects_frequency() {
        let mut strategy = Strategy {
            hash_id: strategy_hash_from_name("First Strategy"),
            idx: 0,
            buy_asset: "uatom".to_string(),
            sell_asset: "uusdc".to_string(),
            amount: Uint128::new(100),
            frequency: 7,
            timestamp: 10,
            last_swap: 0,
            swap_count: 0,
            status: StrategyStatus::Active,
        };

        assert_eq!(strategy.next_execution(), 0);

        strategy.last_swap = 100;
        assert_eq!(strategy.next_execution(), 107);
    }
}
