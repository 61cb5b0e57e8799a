use chamber_rs::{
    core::{Contract, ContractError, ContractResult},
    events::DomainEvent,
    factory::{
        vault_salt, FactoryConfig, FactoryExecuteMsg, FactoryInstantiateMsg, FactoryMigrateMsg,
        FactoryQueryMsg, VaultRecord, DEFAULT_MAX_VAULTS_PER_OWNER,
    },
    registry::RegistryExecuteMsg,
    vault::VaultInstantiateMsg,
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    instantiate2_address, to_json_binary, BankMsg, Binary, Coin, Deps, DepsMut, Env, Event,
    MessageInfo, Reply, Response, StdError, StdResult, SubMsg, WasmMsg,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crate::state::{add_vault, mark_initialized, vaults_of, CONFIG, INSTANCE_COUNT, PENDING_VAULT};

const CONTRACT_NAME: &str = "crates.io:chamber-factory";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEPLOY_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: FactoryInstantiateMsg,
) -> ContractResult {
    deps.api.addr_validate(msg.registry.as_str())?;
    deps.api.addr_validate(msg.treasury.as_str())?;

    let max_vaults_per_owner = msg
        .max_vaults_per_owner
        .unwrap_or(DEFAULT_MAX_VAULTS_PER_OWNER);

    if max_vaults_per_owner == 0 {
        return Err(ContractError::generic_err(
            "max_vaults_per_owner must be greater than zero",
        ));
    }

    if let Some(wrapper) = &msg.wrapper {
        deps.api.addr_validate(wrapper.contract.as_str())?;
        wrapper.validate(&msg.native_denom)?;
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    CONFIG.save(
        deps.storage,
        &FactoryConfig {
            owner: info.sender.clone(),
            vault_code_id: msg.vault_code_id,
            registry: msg.registry,
            treasury: msg.treasury,
            fee: msg.fee,
            native_denom: msg.native_denom,
            wrapper: msg.wrapper,
            max_vaults_per_owner,
        },
    )?;

    INSTANCE_COUNT.save(deps.storage, &0)?;

    Ok(Response::default().add_attribute("owner", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: FactoryMigrateMsg) -> ContractResult {
    let mut config = CONFIG.load(deps.storage)?;

    if let Some(vault_code_id) = msg.vault_code_id {
        config.vault_code_id = vault_code_id;
        CONFIG.save(deps.storage, &config)?;
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::default().add_attribute("vault_code_id", config.vault_code_id.to_string()))
}

fn ensure_owner(config: &FactoryConfig, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: FactoryExecuteMsg,
) -> ContractResult {
    let mut config = CONFIG.load(deps.storage)?;

    match msg {
        FactoryExecuteMsg::DeployVault {} => {
            let owner = info.sender.clone();

            if vaults_of(deps.storage, &owner)?.len() as u32 >= config.max_vaults_per_owner {
                return Err(ContractError::MaxVaultsReached {
                    max: config.max_vaults_per_owner,
                });
            }

            if !config.fee.amount.is_zero() {
                let received = info
                    .funds
                    .iter()
                    .find(|coin| coin.denom == config.fee.denom)
                    .cloned()
                    .unwrap_or_else(|| Coin::new(0u128, config.fee.denom.clone()));

                if received.amount < config.fee.amount {
                    return Err(ContractError::InsufficientFee {
                        required: config.fee,
                        received,
                    });
                }
            }

            let instance_number = INSTANCE_COUNT.load(deps.storage)? + 1;
            let salt = vault_salt(&owner, instance_number);

            let instance = deps.api.addr_humanize(&instantiate2_address(
                deps.querier
                    .query_wasm_code_info(config.vault_code_id)?
                    .checksum
                    .as_slice(),
                &deps.api.addr_canonicalize(env.contract.address.as_str())?,
                &salt,
            )?)?;

            let record = VaultRecord {
                owner: owner.clone(),
                instance: instance.clone(),
                initialized: false,
            };

            add_vault(deps.storage, record.clone())?;
            INSTANCE_COUNT.save(deps.storage, &instance_number)?;
            PENDING_VAULT.save(deps.storage, &record)?;

            deps.api.debug(&format!(
                "factory: deploying vault #{} for {} at {}",
                instance_number, owner, instance
            ));

            let instantiate_vault_msg = WasmMsg::Instantiate2 {
                admin: Some(owner.to_string()),
                code_id: config.vault_code_id,
                label: format!("Chamber Vault {}", instance_number),
                msg: to_json_binary(&VaultInstantiateMsg {
                    owner: owner.clone(),
                    native_denom: config.native_denom,
                    wrapper: config.wrapper,
                })?,
                funds: vec![],
                salt,
            };

            let response = if info.funds.is_empty() {
                Response::default()
            } else {
                Response::default().add_message(BankMsg::Send {
                    to_address: config.treasury.to_string(),
                    amount: info.funds,
                })
            };

            Ok(response
                .add_submessage(SubMsg::reply_on_success(
                    instantiate_vault_msg,
                    DEPLOY_REPLY_ID,
                ))
                .add_event(Event::from(DomainEvent::VaultCreated { owner, instance })))
        }
        FactoryExecuteMsg::SetFee { fee } => {
            ensure_owner(&config, &info)?;
            nonpayable(&info)?;

            config.fee = fee.clone();
            CONFIG.save(deps.storage, &config)?;

            Ok(Response::default().add_event(Event::from(DomainEvent::FeeChanged { fee })))
        }
        FactoryExecuteMsg::SetTreasury { treasury } => {
            ensure_owner(&config, &info)?;
            nonpayable(&info)?;

            config.treasury = deps.api.addr_validate(treasury.as_str())?;
            CONFIG.save(deps.storage, &config)?;

            Ok(Response::default().add_event(Event::from(DomainEvent::TreasuryChanged { treasury })))
        }
        FactoryExecuteMsg::SetVaultCodeId { code_id } => {
            ensure_owner(&config, &info)?;
            nonpayable(&info)?;

            config.vault_code_id = code_id;
            CONFIG.save(deps.storage, &config)?;

            Ok(
                Response::default()
                    .add_event(Event::from(DomainEvent::VaultCodeIdChanged { code_id })),
            )
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, reply: Reply) -> ContractResult {
    if reply.id != DEPLOY_REPLY_ID {
        return Err(ContractError::generic_err(format!(
            "unhandled factory reply id: {}",
            reply.id
        )));
    }

    let record = PENDING_VAULT
        .may_load(deps.storage)?
        .ok_or_else(|| ContractError::generic_err("No vault deployment in progress"))?;

    PENDING_VAULT.remove(deps.storage);

    mark_initialized(deps.storage, &record.owner, &record.instance)?;

    let config = CONFIG.load(deps.storage)?;

    Ok(Response::default().add_message(Contract(config.registry).call(
        to_json_binary(&RegistryExecuteMsg::StoreVault {
            owner: record.owner,
            instance: record.instance,
        })?,
        vec![],
    )))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: FactoryQueryMsg) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;

    match msg {
        FactoryQueryMsg::Config {} => to_json_binary(&config),
        FactoryQueryMsg::Fee {} => to_json_binary(&config.fee),
        FactoryQueryMsg::Treasury {} => to_json_binary(&config.treasury),
        FactoryQueryMsg::Vaults { owner } => {
            let vaults = vaults_of(deps.storage, &owner)?;

            if vaults.is_empty() {
                return Err(StdError::not_found(format!("Vaults for {}", owner)));
            }

            to_json_binary(&vaults)
        }
        FactoryQueryMsg::Vault { owner } => to_json_binary(
            &vaults_of(deps.storage, &owner)?
                .into_iter()
                .next()
                .ok_or_else(|| StdError::not_found(format!("Vault for {}", owner)))?,
        ),
        FactoryQueryMsg::InstanceCount {} => to_json_binary(&INSTANCE_COUNT.load(deps.storage)?),
    }
}
