use std::fmt::Debug;

use chamber_rs::vault::{
    strategy_hash_from_name, Strategy, StrategyStatus, StrategyUpdate, VaultExecuteMsg,
    VaultStatus,
};
use cosmwasm_std::{to_json_binary, Addr, Coin, HexBinary, Uint128};
use cw_multi_test::{error::AnyResult, AppResponse};

use crate::{
    harness::{ChamberTestApp, DEPLOY_FEE, NATIVE_DENOM},
    mock::MockAggregatorExecuteMsg,
};

pub struct VaultHandler<'a> {
    pub vault_addr: Addr,
    pub owner: Addr,
    pub operator: Addr,
    pub harness: &'a mut ChamberTestApp,
}

impl Debug for VaultHandler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultHandler")
            .field("vault_addr", &self.vault_addr)
            .field("owner", &self.owner)
            .field("operator", &self.operator)
            .finish()
    }
}

impl<'a> VaultHandler<'a> {
    /// Deploys a vault for the harness owner, paying the default fee, and
    /// appoints the harness operator.
    pub fn deploy(harness: &'a mut ChamberTestApp) -> Self {
        let owner = harness.owner.clone();
        let operator = harness.operator.clone();

        let vault_addr = harness
            .deploy_vault(&owner, &[Coin::new(DEPLOY_FEE, NATIVE_DENOM)])
            .unwrap();

        harness
            .execute_vault(
                &owner,
                &vault_addr,
                &VaultExecuteMsg::SetOperator {
                    operator: Some(operator.clone()),
                },
                &[],
            )
            .unwrap();

        Self {
            vault_addr,
            owner,
            operator,
            harness,
        }
    }

    fn try_execute(
        &mut self,
        sender: &Addr,
        msg: VaultExecuteMsg,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        let vault_addr = self.vault_addr.clone();
        self.harness.execute_vault(sender, &vault_addr, &msg, funds)
    }

    // Chain helpers

    pub fn advance_time(&mut self, seconds: u64) -> &mut Self {
        println!(
            "[VaultHandler] Advancing time by {} seconds (vault: {})",
            seconds, self.vault_addr
        );
        self.harness.advance_time(seconds);
        self
    }

    // Ledger helpers

    pub fn deposit(&mut self, coin: Coin) -> &mut Self {
        println!("[VaultHandler] Depositing {coin}");
        let owner = self.owner.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::Deposit {
                asset: coin.denom.clone(),
                amount: coin.amount,
            },
            &[coin],
        )
        .unwrap();
        self
    }

    pub fn deposit_native(&mut self, amount: u128) -> &mut Self {
        println!("[VaultHandler] Depositing {amount}{NATIVE_DENOM}");
        let owner = self.owner.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::DepositNative {},
            &[Coin::new(amount, NATIVE_DENOM)],
        )
        .unwrap();
        self
    }

    pub fn try_withdraw(
        &mut self,
        sender: &Addr,
        asset: &str,
        amount: u128,
    ) -> AnyResult<AppResponse> {
        self.try_execute(
            sender,
            VaultExecuteMsg::Withdraw {
                asset: asset.to_string(),
                amount: Uint128::new(amount),
            },
            &[],
        )
    }

    pub fn withdraw(&mut self, asset: &str, amount: u128) -> &mut Self {
        println!("[VaultHandler] Withdrawing {amount}{asset}");
        let owner = self.owner.clone();
        self.try_withdraw(&owner, asset, amount).unwrap();
        self
    }

    pub fn wrap_native(&mut self, amount: u128) -> &mut Self {
        println!("[VaultHandler] Wrapping {amount}{NATIVE_DENOM}");
        let owner = self.owner.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::WrapNative {
                amount: Uint128::new(amount),
            },
            &[],
        )
        .unwrap();
        self
    }

    pub fn unwrap_native(&mut self, amount: u128) -> &mut Self {
        println!("[VaultHandler] Unwrapping {amount} wrapped {NATIVE_DENOM}");
        let owner = self.owner.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::UnwrapNative {
                amount: Uint128::new(amount),
            },
            &[],
        )
        .unwrap();
        self
    }

    pub fn set_status(&mut self, status: VaultStatus) -> &mut Self {
        println!("[VaultHandler] Setting vault status to {status}");
        let owner = self.owner.clone();
        self.try_execute(&owner, VaultExecuteMsg::SetStatus { status }, &[])
            .unwrap();
        self
    }

    // Swap helpers

    pub fn swap_msg(
        &self,
        sell: Coin,
        buy_asset: &str,
        received: u128,
        allowance_target: Option<Addr>,
    ) -> VaultExecuteMsg {
        let aggregator = self.harness.aggregator_addr.clone();

        VaultExecuteMsg::ExecuteSwap {
            sell_asset: sell.denom,
            buy_asset: buy_asset.to_string(),
            amount: sell.amount,
            allowance_target: allowance_target.unwrap_or_else(|| aggregator.clone()),
            call_target: aggregator,
            call_data: to_json_binary(&MockAggregatorExecuteMsg::Swap {
                buy_asset: buy_asset.to_string(),
                amount: Uint128::new(received),
            })
            .unwrap(),
        }
    }

    pub fn try_swap(&mut self, sender: &Addr, msg: VaultExecuteMsg) -> AnyResult<AppResponse> {
        self.try_execute(sender, msg, &[])
    }

    pub fn swap(&mut self, sell: Coin, buy_asset: &str, received: u128) -> &mut Self {
        println!("[VaultHandler] Swapping {sell} for {received}{buy_asset}");
        let operator = self.operator.clone();
        let msg = self.swap_msg(sell, buy_asset, received, None);
        self.try_swap(&operator, msg).unwrap();
        self
    }

    // Strategy helpers

    pub fn create_strategy(
        &mut self,
        name: &str,
        sell: Coin,
        buy_asset: &str,
        frequency: u64,
    ) -> &mut Self {
        println!(
            "[VaultHandler] Creating strategy {name}: {sell} for {buy_asset} every {frequency}s"
        );
        self.try_create_strategy(name, sell, buy_asset, frequency)
            .unwrap();
        self
    }

    pub fn try_create_strategy(
        &mut self,
        name: &str,
        sell: Coin,
        buy_asset: &str,
        frequency: u64,
    ) -> AnyResult<AppResponse> {
        let owner = self.owner.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::CreateStrategy {
                hash_id: Some(strategy_hash_from_name(name)),
                buy_asset: buy_asset.to_string(),
                sell_asset: sell.denom,
                amount: sell.amount,
                frequency,
            },
            &[],
        )
    }

    pub fn update_strategy(
        &mut self,
        name: &str,
        sell: Coin,
        buy_asset: &str,
        frequency: u64,
    ) -> &mut Self {
        println!("[VaultHandler] Updating strategy {name}");
        let owner = self.owner.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::UpdateStrategy {
                update: StrategyUpdate {
                    hash_id: strategy_hash_from_name(name),
                    buy_asset: buy_asset.to_string(),
                    sell_asset: sell.denom,
                    amount: sell.amount,
                    frequency,
                },
            },
            &[],
        )
        .unwrap();
        self
    }

    pub fn deprecate_strategy(&mut self, name: &str) -> &mut Self {
        println!("[VaultHandler] Deprecating strategy {name}");
        let owner = self.owner.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::DeprecateStrategy {
                hash_id: strategy_hash_from_name(name),
            },
            &[],
        )
        .unwrap();
        self
    }

    pub fn delete_strategy(&mut self, name: &str) -> &mut Self {
        println!("[VaultHandler] Deleting strategy {name}");
        let owner = self.owner.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::DeleteStrategy {
                hash_id: strategy_hash_from_name(name),
            },
            &[],
        )
        .unwrap();
        self
    }

    pub fn try_execute_strategy(
        &mut self,
        name: &str,
        buy_asset: &str,
        received: u128,
    ) -> AnyResult<AppResponse> {
        let operator = self.operator.clone();
        let aggregator = self.harness.aggregator_addr.clone();

        self.try_execute(
            &operator,
            VaultExecuteMsg::ExecuteStrategy {
                hash_id: strategy_hash_from_name(name),
                allowance_target: aggregator.clone(),
                call_target: aggregator,
                call_data: to_json_binary(&MockAggregatorExecuteMsg::Swap {
                    buy_asset: buy_asset.to_string(),
                    amount: Uint128::new(received),
                })
                .unwrap(),
            },
            &[],
        )
    }

    pub fn execute_strategy(&mut self, name: &str, buy_asset: &str, received: u128) -> &mut Self {
        println!("[VaultHandler] Executing strategy {name}");
        self.try_execute_strategy(name, buy_asset, received).unwrap();
        self
    }

    // Lending helpers

    pub fn supply(&mut self, supplied: Coin, receipt_asset: &str) -> &mut Self {
        println!("[VaultHandler] Supplying {supplied}");
        let owner = self.owner.clone();
        let market = self.harness.market_addr.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::Supply {
                market,
                asset: supplied.denom,
                amount: supplied.amount,
                receipt_asset: receipt_asset.to_string(),
            },
            &[],
        )
        .unwrap();
        self
    }

    pub fn redeem(&mut self, receipt: Coin, asset: &str) -> &mut Self {
        println!("[VaultHandler] Redeeming {receipt}");
        let owner = self.owner.clone();
        let market = self.harness.market_addr.clone();
        self.try_execute(
            &owner,
            VaultExecuteMsg::Redeem {
                market,
                receipt_asset: receipt.denom,
                amount: receipt.amount,
                asset: asset.to_string(),
            },
            &[],
        )
        .unwrap();
        self
    }

    pub fn strategy(&self, name: &str) -> Strategy {
        self.harness
            .query_strategy(&self.vault_addr, &strategy_hash_from_name(name))
            .unwrap()
    }

    // Assertion helpers

    pub fn assert_ledger_balance(&mut self, asset: &str, expected: u128) -> &mut Self {
        println!("[VaultHandler] Asserting ledger balance of {asset} is {expected}");
        let balance = self.harness.query_vault_balance(&self.vault_addr, asset);
        assert_eq!(
            balance,
            Uint128::new(expected),
            "Expected ledger balance of {asset} to be {expected}, got {balance}"
        );
        self
    }

    pub fn assert_bank_balance(&mut self, denom: &str, expected: u128) -> &mut Self {
        println!("[VaultHandler] Asserting bank balance of {denom} is {expected}");
        let balance = self.harness.query_bank_balance(&self.vault_addr, denom);
        assert_eq!(
            balance,
            Uint128::new(expected),
            "Expected bank balance of {denom} to be {expected}, got {balance}"
        );
        self
    }

    pub fn assert_swap_count(&mut self, name: &str, expected: u64) -> &mut Self {
        println!("[VaultHandler] Asserting strategy {name} swap count is {expected}");
        let strategy = self.strategy(name);
        assert_eq!(
            strategy.swap_count, expected,
            "Expected swap count {expected}, got {strategy:#?}"
        );
        self
    }

    pub fn assert_last_swap(&mut self, name: &str, expected: u64) -> &mut Self {
        println!("[VaultHandler] Asserting strategy {name} last swapped at {expected}");
        let strategy = self.strategy(name);
        assert_eq!(
            strategy.last_swap, expected,
            "Expected last swap {expected}, got {strategy:#?}"
        );
        self
    }

    pub fn assert_strategy_status(&mut self, name: &str, expected: StrategyStatus) -> &mut Self {
        println!("[VaultHandler] Asserting strategy {name} status is {expected:?}");
        let strategy = self.strategy(name);
        assert_eq!(
            strategy.status, expected,
            "Expected status {expected:?}, got {strategy:#?}"
        );
        self
    }

    pub fn assert_active_strategies(&mut self, expected: Vec<HexBinary>) -> &mut Self {
        println!("[VaultHandler] Asserting active strategies are {expected:?}");
        let active = self
            .harness
            .query_active_strategies(&self.vault_addr)
            .into_iter()
            .map(|s| s.hash_id)
            .collect::<Vec<_>>();
        assert_eq!(active, expected);
        self
    }
}
