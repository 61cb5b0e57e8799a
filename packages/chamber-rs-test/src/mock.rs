use chamber_rs::{lending::LendingExecuteMsg, vault::VaultExecuteMsg, wrapper::WrapperExecuteMsg};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, BankMsg, Binary, Coin, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdError, StdResult, Uint128, WasmMsg,
};

/// Stand-in for an off-chain quoted aggregator route: pays out a fixed
/// amount of `buy_asset` to the caller regardless of what was attached.
#[cw_serde]
pub enum MockAggregatorExecuteMsg {
    Swap { buy_asset: String, amount: Uint128 },
    /// Pays out through the caller's own `Deposit` entry point.
    SwapViaDeposit { buy_asset: String, amount: Uint128 },
    Fail { reason: String },
}

pub mod aggregator {
    use super::*;

    pub fn instantiate(
        _deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: Empty,
    ) -> StdResult<Response> {
        Ok(Response::default())
    }

    pub fn execute(
        _deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: MockAggregatorExecuteMsg,
    ) -> StdResult<Response> {
        match msg {
            MockAggregatorExecuteMsg::Swap { buy_asset, amount } => {
                Ok(Response::default().add_message(BankMsg::Send {
                    to_address: info.sender.to_string(),
                    amount: vec![Coin::new(amount, buy_asset)],
                }))
            }
            MockAggregatorExecuteMsg::SwapViaDeposit { buy_asset, amount } => {
                Ok(Response::default().add_message(WasmMsg::Execute {
                    contract_addr: info.sender.to_string(),
                    msg: to_json_binary(&VaultExecuteMsg::Deposit {
                        asset: buy_asset.clone(),
                        amount,
                    })?,
                    funds: vec![Coin::new(amount, buy_asset)],
                }))
            }
            MockAggregatorExecuteMsg::Fail { reason } => Err(StdError::generic_err(reason)),
        }
    }

    pub fn query(_deps: Deps, _env: Env, _msg: Empty) -> StdResult<Binary> {
        Err(StdError::generic_err("aggregator has no queries"))
    }
}

pub fn receipt_denom(denom: &str) -> String {
    format!("c{}", denom)
}

/// Lending market minting receipt tokens 1:1 against the supplied asset.
pub mod lending_market {
    use super::*;

    pub fn instantiate(
        _deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: Empty,
    ) -> StdResult<Response> {
        Ok(Response::default())
    }

    pub fn execute(
        _deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: LendingExecuteMsg,
    ) -> StdResult<Response> {
        if info.funds.is_empty() {
            return Err(StdError::generic_err("no funds attached"));
        }

        let (beneficiary, payout) = match msg {
            LendingExecuteMsg::Supply { beneficiary } => (
                beneficiary,
                info.funds
                    .iter()
                    .map(|coin| Coin::new(coin.amount, receipt_denom(&coin.denom)))
                    .collect::<Vec<_>>(),
            ),
            LendingExecuteMsg::Redeem { beneficiary } => (
                beneficiary,
                info.funds
                    .iter()
                    .map(|coin| {
                        coin.denom
                            .strip_prefix('c')
                            .map(|underlying| Coin::new(coin.amount, underlying))
                            .ok_or_else(|| {
                                StdError::generic_err(format!(
                                    "{} is not a receipt token",
                                    coin.denom
                                ))
                            })
                    })
                    .collect::<StdResult<Vec<_>>>()?,
            ),
        };

        Ok(Response::default().add_message(BankMsg::Send {
            to_address: beneficiary.to_string(),
            amount: payout,
        }))
    }

    pub fn query(_deps: Deps, _env: Env, _msg: Empty) -> StdResult<Binary> {
        Err(StdError::generic_err("lending market has no queries"))
    }
}

pub fn wrapped_denom(denom: &str) -> String {
    format!("w{}", denom)
}

/// Native wrapper converting 1:1 between a denom and its `w` prefixed token.
pub mod native_wrapper {
    use super::*;

    pub fn instantiate(
        _deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: Empty,
    ) -> StdResult<Response> {
        Ok(Response::default())
    }

    pub fn execute(
        _deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: WrapperExecuteMsg,
    ) -> StdResult<Response> {
        if info.funds.is_empty() {
            return Err(StdError::generic_err("no funds attached"));
        }

        let payout = match msg {
            WrapperExecuteMsg::Wrap {} => info
                .funds
                .iter()
                .map(|coin| Coin::new(coin.amount, wrapped_denom(&coin.denom)))
                .collect::<Vec<_>>(),
            WrapperExecuteMsg::Unwrap {} => info
                .funds
                .iter()
                .map(|coin| {
                    coin.denom
                        .strip_prefix('w')
                        .map(|native| Coin::new(coin.amount, native))
                        .ok_or_else(|| {
                            StdError::generic_err(format!("{} is not a wrapped token", coin.denom))
                        })
                })
                .collect::<StdResult<Vec<_>>>()?,
        };

        Ok(Response::default().add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: payout,
        }))
    }

    pub fn query(_deps: Deps, _env: Env, _msg: Empty) -> StdResult<Binary> {
        Err(StdError::generic_err("wrapper has no queries"))
    }
}
