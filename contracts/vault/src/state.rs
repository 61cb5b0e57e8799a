use chamber_rs::{
    core::ContractError,
    vault::{Strategy, StrategyStatus, VaultConfig},
};
use cosmwasm_std::{HexBinary, Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::swap::PendingSwap;

pub const CONFIG: Item<VaultConfig> = Item::new("config");
pub const PENDING_SWAP: Item<PendingSwap> = Item::new("pending_swap");

/// Accounted fungible balances. May trail the raw bank balance when assets
/// arrive outside of deposits and swaps.
pub struct AssetLedger {
    balances: Map<&'static str, Uint128>,
}

impl AssetLedger {
    pub fn balance(&self, storage: &dyn Storage, asset: &str) -> StdResult<Uint128> {
        Ok(self.balances.may_load(storage, asset)?.unwrap_or_default())
    }

    pub fn credit(
        &self,
        storage: &mut dyn Storage,
        asset: &str,
        amount: Uint128,
    ) -> Result<Uint128, ContractError> {
        let balance = self.balance(storage, asset)?.checked_add(amount)?;
        self.balances.save(storage, asset, &balance)?;
        Ok(balance)
    }

    pub fn debit(
        &self,
        storage: &mut dyn Storage,
        asset: &str,
        amount: Uint128,
    ) -> Result<Uint128, ContractError> {
        let available = self.balance(storage, asset)?;

        if available < amount {
            return Err(ContractError::InsufficientBalance {
                asset: asset.to_string(),
                available,
                requested: amount,
            });
        }

        let balance = available - amount;

        if balance.is_zero() {
            self.balances.remove(storage, asset);
        } else {
            self.balances.save(storage, asset, &balance)?;
        }

        Ok(balance)
    }
}

pub const LEDGER: AssetLedger = AssetLedger {
    balances: Map::new("ledger_v1"),
};

/// Dense arena of strategies addressed by hash. Slots `0..count` are always
/// occupied; removal moves the last slot into the hole.
pub struct StrategyStore {
    strategies: Map<u32, Strategy>,
    index: Map<&'static [u8], u32>,
    count: Item<u32>,
}

impl StrategyStore {
    pub fn count(&self, storage: &dyn Storage) -> StdResult<u32> {
        Ok(self.count.may_load(storage)?.unwrap_or_default())
    }

    pub fn get(&self, storage: &dyn Storage, hash_id: &HexBinary) -> StdResult<Option<Strategy>> {
        match self.index.may_load(storage, hash_id.as_slice())? {
            Some(idx) => self.strategies.may_load(storage, idx),
            None => Ok(None),
        }
    }

    pub fn load(
        &self,
        storage: &dyn Storage,
        hash_id: &HexBinary,
    ) -> Result<Strategy, ContractError> {
        self.get(storage, hash_id)?
            .ok_or_else(|| ContractError::not_found(format!("Strategy {}", hash_id)))
    }

    pub fn add(
        &self,
        storage: &mut dyn Storage,
        strategy: Strategy,
    ) -> Result<Strategy, ContractError> {
        if self.index.has(storage, strategy.hash_id.as_slice()) {
            return Err(ContractError::DuplicateStrategy {
                hash_id: strategy.hash_id,
            });
        }

        let idx = self.count(storage)?;
        let strategy = Strategy { idx, ..strategy };

        self.strategies.save(storage, idx, &strategy)?;
        self.index.save(storage, strategy.hash_id.as_slice(), &idx)?;
        self.count.save(storage, &(idx + 1))?;

        Ok(strategy)
    }

    /// Overwrites a stored strategy in place. The slot is looked up by hash so
    /// a stale `idx` on the caller's copy cannot clobber another record.
    pub fn save(&self, storage: &mut dyn Storage, strategy: &Strategy) -> Result<(), ContractError> {
        let idx = self
            .index
            .may_load(storage, strategy.hash_id.as_slice())?
            .ok_or_else(|| ContractError::not_found(format!("Strategy {}", strategy.hash_id)))?;

        self.strategies.save(
            storage,
            idx,
            &Strategy {
                idx,
                ..strategy.clone()
            },
        )?;

        Ok(())
    }

    pub fn remove(
        &self,
        storage: &mut dyn Storage,
        hash_id: &HexBinary,
    ) -> Result<Strategy, ContractError> {
        let removed = self.load(storage, hash_id)?;
        let last = self.count(storage)? - 1;

        if removed.idx != last {
            let moved = Strategy {
                idx: removed.idx,
                ..self.strategies.load(storage, last)?
            };
            self.strategies.save(storage, removed.idx, &moved)?;
            self.index
                .save(storage, moved.hash_id.as_slice(), &removed.idx)?;
        }

        self.strategies.remove(storage, last);
        self.index.remove(storage, hash_id.as_slice());
        self.count.save(storage, &last)?;

        Ok(removed)
    }

    pub fn all(&self, storage: &dyn Storage) -> StdResult<Vec<Strategy>> {
        self.strategies
            .range(storage, None, None, Order::Ascending)
            .map(|item| item.map(|(_, strategy)| strategy))
            .collect()
    }

    pub fn active(&self, storage: &dyn Storage) -> StdResult<Vec<Strategy>> {
        Ok(self
            .all(storage)?
            .into_iter()
            .filter(|strategy| strategy.status == StrategyStatus::Active)
            .collect())
    }
}

pub const STRATEGIES: StrategyStore = StrategyStore {
    strategies: Map::new("strategies_v1"),
    index: Map::new("strategies_v1__hash"),
    count: Item::new("strategies_v1__count"),
};
