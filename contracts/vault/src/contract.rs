use chamber_rs::{
    core::{ContractError, ContractResult},
    events::DomainEvent,
    lending::LendingExecuteMsg,
    vault::{
        strategy_hash_id, Role, Strategy, StrategyStatus, VaultConfig, VaultExecuteMsg,
        VaultInstantiateMsg, VaultMigrateMsg, VaultQueryMsg, VaultStatus,
    },
    wrapper::{NativeWrapper, WrapperExecuteMsg},
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, BankMsg, Binary, Coin, Deps, DepsMut, Env, Event, MessageInfo, Reply,
    Response, StdError, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_utils::must_pay;

use crate::state::{CONFIG, LEDGER, PENDING_SWAP, STRATEGIES};
use crate::swap::{dispatch_swap, handle_swap_reply, SwapCommand, SwapOrigin, SWAP_REPLY_ID};

const CONTRACT_NAME: &str = "crates.io:chamber-vault";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: VaultInstantiateMsg,
) -> ContractResult {
    deps.api.addr_validate(msg.owner.as_str())?;

    if msg.native_denom.is_empty() {
        return Err(ContractError::InvalidAsset {
            asset: msg.native_denom,
        });
    }

    if let Some(wrapper) = &msg.wrapper {
        deps.api.addr_validate(wrapper.contract.as_str())?;
        wrapper.validate(&msg.native_denom)?;
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    CONFIG.save(
        deps.storage,
        &VaultConfig {
            owner: msg.owner.clone(),
            operator: None,
            factory: info.sender.clone(),
            status: VaultStatus::Active,
            native_denom: msg.native_denom,
            wrapper: msg.wrapper,
        },
    )?;

    Ok(Response::default()
        .add_attribute("contract_address", env.contract.address)
        .add_attribute("owner", msg.owner)
        .add_attribute("factory", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: VaultMigrateMsg) -> ContractResult {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default().add_attribute("migrated", "true"))
}

fn ensure_owner(config: &VaultConfig, info: &MessageInfo) -> Result<(), ContractError> {
    match config.role_of(&info.sender) {
        Role::Owner => Ok(()),
        Role::Operator | Role::Neither => Err(ContractError::Unauthorized {}),
    }
}

fn ensure_executor(config: &VaultConfig, info: &MessageInfo) -> Result<(), ContractError> {
    match config.role_of(&info.sender) {
        Role::Owner | Role::Operator => Ok(()),
        Role::Neither => Err(ContractError::Unauthorized {}),
    }
}

fn ensure_active(config: &VaultConfig) -> Result<(), ContractError> {
    if config.status != VaultStatus::Active {
        return Err(ContractError::VaultNotActive {});
    }
    Ok(())
}

fn ensure_not_deprecated(config: &VaultConfig) -> Result<(), ContractError> {
    if config.status == VaultStatus::Deprecated {
        return Err(ContractError::VaultNotActive {});
    }
    Ok(())
}

// Funds arriving mid-swap would be booked by the reply's balance delta.
fn ensure_no_pending_swap(deps: Deps) -> Result<(), ContractError> {
    if PENDING_SWAP.exists(deps.storage) {
        return Err(ContractError::SwapInProgress {});
    }
    Ok(())
}

fn ensure_non_zero(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::generic_err(
            "Must provide a non-zero amount to withdraw",
        ));
    }
    Ok(())
}

fn native_wrapper(config: &VaultConfig) -> Result<NativeWrapper, ContractError> {
    config
        .wrapper
        .clone()
        .ok_or_else(|| ContractError::InvalidAsset {
            asset: config.native_denom.clone(),
        })
}

fn validate_strategy_assets(
    buy_asset: &str,
    sell_asset: &str,
    amount: Uint128,
) -> Result<(), ContractError> {
    if buy_asset.is_empty() || sell_asset.is_empty() {
        return Err(ContractError::InvalidStrategy {
            reason: "assets must not be empty".to_string(),
        });
    }

    if buy_asset == sell_asset {
        return Err(ContractError::InvalidStrategy {
            reason: "buy and sell assets must differ".to_string(),
        });
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidStrategy {
            reason: "amount must be greater than zero".to_string(),
        });
    }

    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: VaultExecuteMsg,
) -> ContractResult {
    let mut config = CONFIG.load(deps.storage)?;
    let contract_address = env.contract.address.clone();

    match msg {
        VaultExecuteMsg::Deposit { asset, amount } => {
            ensure_not_deprecated(&config)?;
            ensure_no_pending_swap(deps.as_ref())?;

            if config.is_native(&asset) {
                return Err(ContractError::InvalidAsset { asset });
            }

            let paid = must_pay(&info, &asset).map_err(|e| ContractError::TransferFailed {
                reason: e.to_string(),
            })?;

            if paid != amount {
                return Err(ContractError::TransferFailed {
                    reason: format!("expected {}{}, received {}{}", amount, asset, paid, asset),
                });
            }

            LEDGER.credit(deps.storage, &asset, amount)?;

            Ok(Response::default().add_event(Event::from(DomainEvent::Deposited {
                contract_address,
                asset,
                amount,
            })))
        }
        VaultExecuteMsg::DepositNative {} => {
            ensure_not_deprecated(&config)?;
            ensure_no_pending_swap(deps.as_ref())?;

            let amount = must_pay(&info, &config.native_denom).map_err(|e| {
                ContractError::TransferFailed {
                    reason: e.to_string(),
                }
            })?;

            Ok(Response::default().add_event(Event::from(DomainEvent::Deposited {
                contract_address,
                asset: config.native_denom,
                amount,
            })))
        }
        VaultExecuteMsg::Withdraw { asset, amount } => {
            ensure_owner(&config, &info)?;
            ensure_non_zero(amount)?;

            if config.is_native(&asset) {
                return Err(ContractError::InvalidAsset { asset });
            }

            LEDGER.debit(deps.storage, &asset, amount)?;

            Ok(Response::default()
                .add_message(BankMsg::Send {
                    to_address: config.owner.to_string(),
                    amount: vec![Coin::new(amount, asset.clone())],
                })
                .add_event(Event::from(DomainEvent::Withdrawn {
                    contract_address,
                    to: config.owner,
                    asset,
                    amount,
                })))
        }
        VaultExecuteMsg::WithdrawNative { amount } => {
            ensure_owner(&config, &info)?;
            ensure_non_zero(amount)?;

            let available = deps
                .querier
                .query_balance(&contract_address, &config.native_denom)?
                .amount;

            if available < amount {
                return Err(ContractError::InsufficientBalance {
                    asset: config.native_denom,
                    available,
                    requested: amount,
                });
            }

            Ok(Response::default()
                .add_message(BankMsg::Send {
                    to_address: config.owner.to_string(),
                    amount: vec![Coin::new(amount, config.native_denom.clone())],
                })
                .add_event(Event::from(DomainEvent::Withdrawn {
                    contract_address,
                    to: config.owner,
                    asset: config.native_denom,
                    amount,
                })))
        }
        VaultExecuteMsg::WrapNative { amount } => {
            ensure_owner(&config, &info)?;
            ensure_active(&config)?;

            let wrapper = native_wrapper(&config)?;

            dispatch_swap(
                deps,
                &env,
                &config,
                SwapCommand {
                    sell_asset: config.native_denom.clone(),
                    buy_asset: wrapper.wrapped_denom,
                    amount,
                    allowance_target: wrapper.contract.clone(),
                    target: wrapper.contract.clone(),
                    msg: to_json_binary(&WrapperExecuteMsg::Wrap {})?,
                    origin: SwapOrigin::Wrap {
                        wrapper: wrapper.contract,
                    },
                },
            )
        }
        VaultExecuteMsg::UnwrapNative { amount } => {
            ensure_owner(&config, &info)?;
            ensure_active(&config)?;

            let wrapper = native_wrapper(&config)?;

            dispatch_swap(
                deps,
                &env,
                &config,
                SwapCommand {
                    sell_asset: wrapper.wrapped_denom,
                    buy_asset: config.native_denom.clone(),
                    amount,
                    allowance_target: wrapper.contract.clone(),
                    target: wrapper.contract.clone(),
                    msg: to_json_binary(&WrapperExecuteMsg::Unwrap {})?,
                    origin: SwapOrigin::Unwrap {
                        wrapper: wrapper.contract,
                    },
                },
            )
        }
        VaultExecuteMsg::SetOperator { operator } => {
            ensure_owner(&config, &info)?;

            if let Some(operator) = &operator {
                deps.api.addr_validate(operator.as_str())?;
            }

            config.operator = operator.clone();
            CONFIG.save(deps.storage, &config)?;

            Ok(
                Response::default().add_event(Event::from(DomainEvent::OperatorChanged {
                    contract_address,
                    operator,
                })),
            )
        }
        VaultExecuteMsg::SetStatus { status } => {
            ensure_owner(&config, &info)?;

            if !config.status.can_transition_to(&status) {
                return Err(ContractError::InvalidStatusTransition {
                    from: config.status.to_string(),
                    to: status.to_string(),
                });
            }

            config.status = status;
            CONFIG.save(deps.storage, &config)?;

            Ok(
                Response::default().add_event(Event::from(DomainEvent::StatusChanged {
                    contract_address,
                    status,
                })),
            )
        }
        VaultExecuteMsg::ExecuteSwap {
            sell_asset,
            buy_asset,
            amount,
            allowance_target,
            call_target,
            call_data,
        } => {
            ensure_executor(&config, &info)?;
            ensure_active(&config)?;

            dispatch_swap(
                deps,
                &env,
                &config,
                SwapCommand {
                    sell_asset,
                    buy_asset,
                    amount,
                    allowance_target,
                    target: call_target,
                    msg: call_data,
                    origin: SwapOrigin::Swap,
                },
            )
        }
        VaultExecuteMsg::CreateStrategy {
            hash_id,
            buy_asset,
            sell_asset,
            amount,
            frequency,
        } => {
            ensure_owner(&config, &info)?;
            ensure_not_deprecated(&config)?;
            validate_strategy_assets(&buy_asset, &sell_asset, amount)?;

            let hash_id =
                hash_id.unwrap_or_else(|| strategy_hash_id(&config.owner, &buy_asset, &sell_asset));

            if hash_id.is_empty() {
                return Err(ContractError::InvalidStrategy {
                    reason: "hash id must not be empty".to_string(),
                });
            }

            let strategy = STRATEGIES.add(
                deps.storage,
                Strategy {
                    hash_id,
                    idx: 0,
                    buy_asset,
                    sell_asset,
                    amount,
                    frequency,
                    timestamp: env.block.time.seconds(),
                    last_swap: 0,
                    swap_count: 0,
                    status: StrategyStatus::Active,
                },
            )?;

            Ok(
                Response::default().add_event(Event::from(DomainEvent::StrategyCreated {
                    contract_address,
                    hash_id: strategy.hash_id,
                    amount: strategy.amount,
                    frequency: strategy.frequency,
                })),
            )
        }
        VaultExecuteMsg::UpdateStrategy { update } => {
            ensure_owner(&config, &info)?;

            let strategy = STRATEGIES.load(deps.storage, &update.hash_id)?;

            validate_strategy_assets(&update.buy_asset, &update.sell_asset, update.amount)?;

            STRATEGIES.save(
                deps.storage,
                &Strategy {
                    buy_asset: update.buy_asset,
                    sell_asset: update.sell_asset,
                    amount: update.amount,
                    frequency: update.frequency,
                    ..strategy
                },
            )?;

            Ok(
                Response::default().add_event(Event::from(DomainEvent::StrategyUpdated {
                    contract_address,
                    hash_id: update.hash_id,
                })),
            )
        }
        VaultExecuteMsg::DeprecateStrategy { hash_id } => {
            ensure_owner(&config, &info)?;

            let strategy = STRATEGIES.load(deps.storage, &hash_id)?;

            STRATEGIES.save(
                deps.storage,
                &Strategy {
                    status: StrategyStatus::Deactivated,
                    ..strategy
                },
            )?;

            Ok(
                Response::default().add_event(Event::from(DomainEvent::StrategyDeprecated {
                    contract_address,
                    hash_id,
                })),
            )
        }
        VaultExecuteMsg::DeleteStrategy { hash_id } => {
            ensure_owner(&config, &info)?;

            STRATEGIES.remove(deps.storage, &hash_id)?;

            Ok(
                Response::default().add_event(Event::from(DomainEvent::StrategyDeleted {
                    contract_address,
                    hash_id,
                })),
            )
        }
        VaultExecuteMsg::ExecuteStrategy {
            hash_id,
            allowance_target,
            call_target,
            call_data,
        } => {
            ensure_executor(&config, &info)?;
            ensure_active(&config)?;

            let strategy = STRATEGIES.load(deps.storage, &hash_id)?;

            if strategy.status != StrategyStatus::Active {
                return Err(ContractError::StrategyInactive { hash_id });
            }

            let next_execution = strategy.next_execution();

            if env.block.time.seconds() < next_execution {
                return Err(ContractError::TooSoon {
                    hash_id,
                    next_execution,
                });
            }

            dispatch_swap(
                deps,
                &env,
                &config,
                SwapCommand {
                    sell_asset: strategy.sell_asset,
                    buy_asset: strategy.buy_asset,
                    amount: strategy.amount,
                    allowance_target,
                    target: call_target,
                    msg: call_data,
                    origin: SwapOrigin::Strategy { hash_id },
                },
            )
        }
        VaultExecuteMsg::Supply {
            market,
            asset,
            amount,
            receipt_asset,
        } => {
            ensure_owner(&config, &info)?;
            ensure_active(&config)?;
            deps.api.addr_validate(market.as_str())?;

            dispatch_swap(
                deps,
                &env,
                &config,
                SwapCommand {
                    sell_asset: asset,
                    buy_asset: receipt_asset,
                    amount,
                    allowance_target: market.clone(),
                    target: market.clone(),
                    msg: to_json_binary(&LendingExecuteMsg::Supply {
                        beneficiary: contract_address,
                    })?,
                    origin: SwapOrigin::Supply { market },
                },
            )
        }
        VaultExecuteMsg::Redeem {
            market,
            receipt_asset,
            amount,
            asset,
        } => {
            ensure_owner(&config, &info)?;
            ensure_active(&config)?;
            deps.api.addr_validate(market.as_str())?;

            dispatch_swap(
                deps,
                &env,
                &config,
                SwapCommand {
                    sell_asset: receipt_asset,
                    buy_asset: asset,
                    amount,
                    allowance_target: market.clone(),
                    target: market.clone(),
                    msg: to_json_binary(&LendingExecuteMsg::Redeem {
                        beneficiary: contract_address,
                    })?,
                    origin: SwapOrigin::Redeem { market },
                },
            )
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, reply: Reply) -> ContractResult {
    match reply.id {
        SWAP_REPLY_ID => handle_swap_reply(deps, env, reply),
        id => Err(ContractError::generic_err(format!(
            "unhandled vault reply id: {}",
            id
        ))),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: VaultQueryMsg) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;

    match msg {
        VaultQueryMsg::Config {} => to_json_binary(&config),
        VaultQueryMsg::Owner {} => to_json_binary(&config.owner),
        VaultQueryMsg::Operator {} => to_json_binary(&config.operator),
        VaultQueryMsg::Factory {} => to_json_binary(&config.factory),
        VaultQueryMsg::Status {} => to_json_binary(&config.status),
        VaultQueryMsg::BalanceOf { asset } => {
            if config.is_native(&asset) {
                to_json_binary(
                    &deps
                        .querier
                        .query_balance(&env.contract.address, asset)?
                        .amount,
                )
            } else {
                to_json_binary(&LEDGER.balance(deps.storage, &asset)?)
            }
        }
        VaultQueryMsg::Strategy { hash_id } => to_json_binary(
            &STRATEGIES
                .get(deps.storage, &hash_id)?
                .ok_or_else(|| StdError::not_found(format!("Strategy {}", hash_id)))?,
        ),
        VaultQueryMsg::Strategies {} => to_json_binary(&STRATEGIES.all(deps.storage)?),
        VaultQueryMsg::ActiveStrategies {} => to_json_binary(&STRATEGIES.active(deps.storage)?),
        VaultQueryMsg::StrategyHash {
            buy_asset,
            sell_asset,
        } => to_json_binary(&strategy_hash_id(&config.owner, &buy_asset, &sell_asset)),
    }
}

#[cfg(test)]
fn default_create_strategy_msg(name: &str) -> VaultExecuteMsg {
    VaultExecuteMsg::CreateStrategy {
        hash_id: Some(chamber_rs::vault::strategy_hash_from_name(name)),
        buy_asset: "uatom".to_string(),
        sell_asset: "uusdc".to_string(),
        amount: Uint128::new(100),
        frequency: 7,
    }
}

#[cfg(test)]
mod instantiate_tests {
    use super::*;
    use cosmwasm_std::{
        from_json,
        testing::{message_info, mock_dependencies, mock_env},
        Addr,
    };

    #[test]
    fn binds_owner_and_factory() {
        let mut deps = mock_dependencies();
        let env = mock_env();
        let owner = deps.api.addr_make("owner");
        let factory = deps.api.addr_make("factory");

        instantiate(
            deps.as_mut(),
            env.clone(),
            message_info(&factory, &[]),
            VaultInstantiateMsg {
                owner: owner.clone(),
                native_denom: "rune".to_string(),
                wrapper: None,
            },
        )
        .unwrap();

        let config =
            from_json::<VaultConfig>(query(deps.as_ref(), env.clone(), VaultQueryMsg::Config {}).unwrap())
                .unwrap();

        assert_eq!(
            config,
            VaultConfig {
                owner,
                operator: None,
                factory: factory.clone(),
                status: VaultStatus::Active,
                native_denom: "rune".to_string(),
                wrapper: None,
            }
        );

        let queried_factory =
            from_json::<Addr>(query(deps.as_ref(), env, VaultQueryMsg::Factory {}).unwrap())
                .unwrap();

        assert_eq!(queried_factory, factory);
    }

    #[test]
    fn rejects_invalid_owner() {
        let mut deps = mock_dependencies();
        let factory = deps.api.addr_make("factory");

        assert!(instantiate(
            deps.as_mut(),
            mock_env(),
            message_info(&factory, &[]),
            VaultInstantiateMsg {
                owner: Addr::unchecked("not-an-address"),
                native_denom: "rune".to_string(),
                wrapper: None,
            },
        )
        .is_err());
    }
}



#[cfg(test)]
mod status_tests {
    use super::*;
    use cosmwasm_std::{
        from_json,
        testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage},
        Addr, OwnedDeps,
    };

    fn setup() -> (OwnedDeps<MockStorage, MockApi, MockQuerier>, Env, Addr) {
        let mut deps = mock_dependencies();
        let env = mock_env();
        let owner = deps.api.addr_make("owner");
        let factory = deps.api.addr_make("factory");

        instantiate(
            deps.as_mut(),
            env.clone(),
            message_info(&factory, &[]),
            VaultInstantiateMsg {
                owner: owner.clone(),
                native_denom: "rune".to_string(),
                wrapper: None,
            },
        )
        .unwrap();

        execute(
            deps.as_mut(),
            env.clone(),
            message_info(&owner, &[Coin::new(1_000u128, "uusdc")]),
            VaultExecuteMsg::Deposit {
                asset: "uusdc".to_string(),
                amount: Uint128::new(1_000),
            },
        )
        .unwrap();

        (deps, env, owner)
    }

    fn set_status(
        deps: DepsMut,
        env: &Env,
        owner: &Addr,
        status: VaultStatus,
    ) -> ContractResult {
        execute(
            deps,
            env.clone(),
            message_info(owner, &[]),
            VaultExecuteMsg::SetStatus { status },
        )
    }

    fn swap_msg(deps: &OwnedDeps<MockStorage, MockApi, MockQuerier>) -> VaultExecuteMsg {
        VaultExecuteMsg::ExecuteSwap {
            sell_asset: "uusdc".to_string(),
            buy_asset: "uatom".to_string(),
            amount: Uint128::new(100),
            allowance_target: deps.api.addr_make("aggregator"),
            call_target: deps.api.addr_make("aggregator"),
            call_data: Binary::default(),
        }
    }

    #[test]
    fn owner_can_deprecate_vault() {
        let (mut deps, env, owner) = setup();

        set_status(deps.as_mut(), &env, &owner, VaultStatus::Deprecated).unwrap();

        let status =
            from_json::<VaultStatus>(query(deps.as_ref(), env, VaultQueryMsg::Status {}).unwrap())
                .unwrap();

        assert_eq!(status, VaultStatus::Deprecated);
    }

    #[test]
    fn deprecation_is_terminal() {
        let (mut deps, env, owner) = setup();

        set_status(deps.as_mut(), &env, &owner, VaultStatus::Deprecated).unwrap();

        assert_eq!(
            set_status(deps.as_mut(), &env, &owner, VaultStatus::Active).unwrap_err(),
            ContractError::InvalidStatusTransition {
                from: "deprecated".to_string(),
                to: "active".to_string(),
            }
        );
    }

    #[test]
    fn paused_vault_rejects_swaps_until_resumed() {
        let (mut deps, env, owner) = setup();
        let msg = swap_msg(&deps);

        set_status(deps.as_mut(), &env, &owner, VaultStatus::Paused).unwrap();

        assert_eq!(
            execute(
                deps.as_mut(),
                env.clone(),
                message_info(&owner, &[]),
                msg.clone()
            )
            .unwrap_err(),
            ContractError::VaultNotActive {}
        );

        set_status(deps.as_mut(), &env, &owner, VaultStatus::Active).unwrap();

        assert!(execute(deps.as_mut(), env, message_info(&owner, &[]), msg).is_ok());
    }

    #[test]
    fn deprecated_vault_still_allows_withdrawals() {
        let (mut deps, env, owner) = setup();

        set_status(deps.as_mut(), &env, &owner, VaultStatus::Deprecated).unwrap();

        assert_eq!(
            execute(
                deps.as_mut(),
                env.clone(),
                message_info(&owner, &[Coin::new(1u128, "uusdc")]),
                VaultExecuteMsg::Deposit {
                    asset: "uusdc".to_string(),
                    amount: Uint128::new(1),
                },
            )
            .unwrap_err(),
            ContractError::VaultNotActive {}
        );

        assert!(execute(
            deps.as_mut(),
            env,
            message_info(&owner, &[]),
            VaultExecuteMsg::Withdraw {
                asset: "uusdc".to_string(),
                amount: Uint128::new(1_000),
            },
        )
        .is_ok());
    }
}

#[cfg(test)]
mod swap_tests {
    use super::*;
    use cosmwasm_std::{
        testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage},
        Addr, CosmosMsg, OwnedDeps, SubMsgResult, WasmMsg,
    };

    fn setup() -> (OwnedDeps<MockStorage, MockApi, MockQuerier>, Env, Addr) {
        let mut deps = mock_dependencies();
        let env = mock_env();
        let owner = deps.api.addr_make("owner");
        let factory = deps.api.addr_make("factory");

        instantiate(
            deps.as_mut(),
            env.clone(),
            message_info(&factory, &[]),
            VaultInstantiateMsg {
                owner: owner.clone(),
                native_denom: "rune".to_string(),
                wrapper: None,
            },
        )
        .unwrap();

        execute(
            deps.as_mut(),
            env.clone(),
            message_info(&owner, &[Coin::new(100u128, "uusdc")]),
            VaultExecuteMsg::Deposit {
                asset: "uusdc".to_string(),
                amount: Uint128::new(100),
            },
        )
        .unwrap();

        (deps, env, owner)
    }

    #[test]
    fn swap_debits_ledger_and_dispatches_call_with_funds() {
        let (mut deps, env, owner) = setup();
        let aggregator = deps.api.addr_make("aggregator");
        let call_data = to_json_binary(&"quote").unwrap();

        let response = execute(
            deps.as_mut(),
            env.clone(),
            message_info(&owner, &[]),
            VaultExecuteMsg::ExecuteSwap {
                sell_asset: "uusdc".to_string(),
                buy_asset: "uatom".to_string(),
                amount: Uint128::new(100),
                allowance_target: aggregator.clone(),
                call_target: aggregator.clone(),
                call_data: call_data.clone(),
            },
        )
        .unwrap();

        assert_eq!(
            response.messages[0].msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: aggregator.to_string(),
                msg: call_data,
                funds: vec![Coin::new(100u128, "uusdc")],
            })
        );
        assert_eq!(
            LEDGER.balance(deps.as_ref().storage, "uusdc").unwrap(),
            Uint128::zero()
        );
        assert!(PENDING_SWAP.exists(deps.as_ref().storage));
    }

    #[test]
    fn swap_beyond_ledger_fails() {
        let (mut deps, env, owner) = setup();
        let aggregator = deps.api.addr_make("aggregator");

        let err = execute(
            deps.as_mut(),
            env,
            message_info(&owner, &[]),
            VaultExecuteMsg::ExecuteSwap {
                sell_asset: "uusdc".to_string(),
                buy_asset: "uatom".to_string(),
                amount: Uint128::new(101),
                allowance_target: aggregator.clone(),
                call_target: aggregator,
                call_data: Binary::default(),
            },
        )
        .unwrap_err();

        assert!(matches!(err, ContractError::InsufficientBalance { .. }));
    }

    #[test]
    fn swap_of_native_checks_bank_balance() {
        let (mut deps, env, owner) = setup();
        let aggregator = deps.api.addr_make("aggregator");

        deps.querier
            .bank
            .update_balance(&env.contract.address, vec![Coin::new(50u128, "rune")]);

        let msg = |amount: u128| VaultExecuteMsg::ExecuteSwap {
            sell_asset: "rune".to_string(),
            buy_asset: "uatom".to_string(),
            amount: Uint128::new(amount),
            allowance_target: aggregator.clone(),
            call_target: aggregator.clone(),
            call_data: Binary::default(),
        };

        assert!(matches!(
            execute(deps.as_mut(), env.clone(), message_info(&owner, &[]), msg(51)).unwrap_err(),
            ContractError::InsufficientBalance { .. }
        ));
        assert!(execute(deps.as_mut(), env, message_info(&owner, &[]), msg(50)).is_ok());
    }

    #[test]
    fn swap_between_identical_assets_fails() {
        let (mut deps, env, owner) = setup();
        let aggregator = deps.api.addr_make("aggregator");

        let err = execute(
            deps.as_mut(),
            env,
            message_info(&owner, &[]),
            VaultExecuteMsg::ExecuteSwap {
                sell_asset: "uusdc".to_string(),
                buy_asset: "uusdc".to_string(),
                amount: Uint128::new(10),
                allowance_target: aggregator.clone(),
                call_target: aggregator,
                call_data: Binary::default(),
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            ContractError::InvalidAsset {
                asset: "uusdc".to_string()
            }
        );
    }

    #[test]
    fn failed_external_call_surfaces_swap_failed() {
        let (mut deps, env, owner) = setup();
        let aggregator = deps.api.addr_make("aggregator");

        execute(
            deps.as_mut(),
            env.clone(),
            message_info(&owner, &[]),
            VaultExecuteMsg::ExecuteSwap {
                sell_asset: "uusdc".to_string(),
                buy_asset: "uatom".to_string(),
                amount: Uint128::new(100),
                allowance_target: aggregator.clone(),
                call_target: aggregator,
                call_data: Binary::default(),
            },
        )
        .unwrap();

        let err = reply(
            deps.as_mut(),
            env,
            Reply {
                id: crate::swap::SWAP_REPLY_ID,
                payload: Binary::default(),
                gas_used: 0,
                result: SubMsgResult::Err("quote expired".to_string()),
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            ContractError::SwapFailed {
                reason: "quote expired".to_string()
            }
        );
    }

    #[test]
    fn deposits_wait_for_pending_swap() {
        let (mut deps, env, owner) = setup();
        let aggregator = deps.api.addr_make("aggregator");

        execute(
            deps.as_mut(),
            env.clone(),
            message_info(&owner, &[]),
            VaultExecuteMsg::ExecuteSwap {
                sell_asset: "uusdc".to_string(),
                buy_asset: "uatom".to_string(),
                amount: Uint128::new(100),
                allowance_target: aggregator.clone(),
                call_target: aggregator.clone(),
                call_data: Binary::default(),
            },
        )
        .unwrap();

        assert_eq!(
            execute(
                deps.as_mut(),
                env.clone(),
                message_info(&aggregator, &[Coin::new(95u128, "uatom")]),
                VaultExecuteMsg::Deposit {
                    asset: "uatom".to_string(),
                    amount: Uint128::new(95),
                },
            )
            .unwrap_err(),
            ContractError::SwapInProgress {}
        );
        assert_eq!(
            execute(
                deps.as_mut(),
                env,
                message_info(&aggregator, &[Coin::new(95u128, "rune")]),
                VaultExecuteMsg::DepositNative {},
            )
            .unwrap_err(),
            ContractError::SwapInProgress {}
        );
        assert_eq!(
            LEDGER.balance(deps.as_ref().storage, "uatom").unwrap(),
            Uint128::zero()
        );
    }

    #[test]
    fn unknown_reply_id_fails() {
        let (mut deps, env, _) = setup();

        assert!(reply(
            deps.as_mut(),
            env,
            Reply {
                id: 99,
                payload: Binary::default(),
                gas_used: 0,
                result: SubMsgResult::Err("boom".to_string()),
            },
        )
        .is_err());
    }
}
