use chamber_rs::{
    core::{ContractError, ContractResult, ExternalCall},
    events::DomainEvent,
    vault::VaultConfig,
};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    Addr, Binary, Coin, DepsMut, Env, Event, HexBinary, Reply, Response, SubMsg, SubMsgResult,
    Uint128,
};

use crate::state::{CONFIG, LEDGER, PENDING_SWAP, STRATEGIES};

pub const SWAP_REPLY_ID: u64 = 1;

#[cw_serde]
pub enum SwapOrigin {
    Swap,
    Strategy { hash_id: HexBinary },
    Supply { market: Addr },
    Redeem { market: Addr },
    Wrap { wrapper: Addr },
    Unwrap { wrapper: Addr },
}

#[cw_serde]
pub struct PendingSwap {
    pub sell_asset: String,
    pub buy_asset: String,
    pub amount: Uint128,
    pub buy_balance_before: Uint128,
    pub origin: SwapOrigin,
}

pub struct SwapCommand {
    pub sell_asset: String,
    pub buy_asset: String,
    pub amount: Uint128,
    pub allowance_target: Addr,
    pub target: Addr,
    pub msg: Binary,
    pub origin: SwapOrigin,
}

/// The only path by which the vault hands assets to an external contract.
/// Authorisation is the caller's job; this checks funds and books the swap.
pub fn dispatch_swap(
    deps: DepsMut,
    env: &Env,
    config: &VaultConfig,
    command: SwapCommand,
) -> ContractResult {
    if PENDING_SWAP.exists(deps.storage) {
        return Err(ContractError::SwapInProgress {});
    }

    if command.sell_asset == command.buy_asset {
        return Err(ContractError::InvalidAsset {
            asset: command.buy_asset,
        });
    }

    if command.amount.is_zero() {
        return Err(ContractError::generic_err(
            "Must provide a non-zero amount to swap",
        ));
    }

    if config.is_native(&command.sell_asset) {
        let available = deps
            .querier
            .query_balance(&env.contract.address, &command.sell_asset)?
            .amount;

        if available < command.amount {
            return Err(ContractError::InsufficientBalance {
                asset: command.sell_asset,
                available,
                requested: command.amount,
            });
        }
    } else {
        LEDGER.debit(deps.storage, &command.sell_asset, command.amount)?;
    }

    let buy_balance_before = deps
        .querier
        .query_balance(&env.contract.address, &command.buy_asset)?
        .amount;

    PENDING_SWAP.save(
        deps.storage,
        &PendingSwap {
            sell_asset: command.sell_asset.clone(),
            buy_asset: command.buy_asset.clone(),
            amount: command.amount,
            buy_balance_before,
            origin: command.origin,
        },
    )?;

    deps.api.debug(&format!(
        "vault {}: swapping {}{} for {} via {}",
        env.contract.address, command.amount, command.sell_asset, command.buy_asset, command.target
    ));

    let (escrow, call) = ExternalCall {
        allowance_target: command.allowance_target,
        target: command.target,
        msg: command.msg,
        funds: vec![Coin::new(command.amount, command.sell_asset)],
    }
    .into_msgs();

    let response = match escrow {
        Some(escrow) => Response::default().add_message(escrow),
        None => Response::default(),
    };

    Ok(response.add_submessage(SubMsg::reply_always(call, SWAP_REPLY_ID)))
}

/// Books whatever the external call produced. The output is not checked
/// against a quote.
pub fn handle_swap_reply(deps: DepsMut, env: Env, reply: Reply) -> ContractResult {
    let pending = PENDING_SWAP
        .may_load(deps.storage)?
        .ok_or_else(|| ContractError::generic_err("No swap in progress"))?;

    PENDING_SWAP.remove(deps.storage);

    if let SubMsgResult::Err(reason) = reply.result {
        return Err(ContractError::SwapFailed { reason });
    }

    let config = CONFIG.load(deps.storage)?;

    let buy_balance_after = deps
        .querier
        .query_balance(&env.contract.address, &pending.buy_asset)?
        .amount;

    let received = buy_balance_after.saturating_sub(pending.buy_balance_before);

    if !config.is_native(&pending.buy_asset) && !received.is_zero() {
        LEDGER.credit(deps.storage, &pending.buy_asset, received)?;
    }

    let contract_address = env.contract.address.clone();

    let swap_executed = DomainEvent::SwapExecuted {
        contract_address: contract_address.clone(),
        sell_asset: pending.sell_asset.clone(),
        buy_asset: pending.buy_asset.clone(),
        amount: pending.amount,
        received,
    };

    let events = match pending.origin {
        SwapOrigin::Swap => vec![swap_executed],
        SwapOrigin::Strategy { hash_id } => {
            let mut strategy = STRATEGIES.load(deps.storage, &hash_id)?;

            strategy.last_swap = env.block.time.seconds();
            strategy.swap_count += 1;

            STRATEGIES.save(deps.storage, &strategy)?;

            vec![
                swap_executed,
                DomainEvent::StrategyExecuted {
                    contract_address,
                    hash_id,
                    swap_count: strategy.swap_count,
                },
            ]
        }
        SwapOrigin::Supply { market } => vec![DomainEvent::Supplied {
            contract_address,
            market,
            asset: pending.sell_asset,
            amount: pending.amount,
            received,
        }],
        SwapOrigin::Redeem { market } => vec![DomainEvent::Redeemed {
            contract_address,
            market,
            asset: pending.buy_asset,
            amount: pending.amount,
            received,
        }],
        SwapOrigin::Wrap { wrapper } => vec![DomainEvent::Wrapped {
            contract_address,
            wrapper,
            amount: pending.amount,
            received,
        }],
        SwapOrigin::Unwrap { wrapper } => vec![DomainEvent::Unwrapped {
            contract_address,
            wrapper,
            amount: pending.amount,
            received,
        }],
    };

    Ok(Response::default().add_events(events.into_iter().map(Event::from)))
}
