use chamber_rs::{
    core::{ContractError, ContractResult},
    events::DomainEvent,
    factory::VaultRecord,
    registry::{
        RegistryConfig, RegistryExecuteMsg, RegistryInstantiateMsg, RegistryMigrateMsg,
        RegistryQueryMsg, VaultOwner,
    },
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crate::state::{CONFIG, OWNERS, VAULTS};

const CONTRACT_NAME: &str = "crates.io:chamber-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: RegistryInstantiateMsg,
) -> ContractResult {
    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(admin.as_str())?,
        None => info.sender,
    };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    CONFIG.save(
        deps.storage,
        &RegistryConfig {
            admin: admin.clone(),
            factory: None,
        },
    )?;

    Ok(Response::default().add_attribute("admin", admin))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: RegistryMigrateMsg) -> ContractResult {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default().add_attribute("migrated", "true"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: RegistryExecuteMsg,
) -> ContractResult {
    nonpayable(&info)?;

    let mut config = CONFIG.load(deps.storage)?;

    match msg {
        RegistryExecuteMsg::SetFactory { factory } => {
            if info.sender != config.admin {
                return Err(ContractError::Unauthorized {});
            }

            config.factory = Some(deps.api.addr_validate(factory.as_str())?);
            CONFIG.save(deps.storage, &config)?;

            Ok(Response::default().add_event(Event::from(DomainEvent::FactoryChanged { factory })))
        }
        RegistryExecuteMsg::StoreVault { owner, instance } => {
            if config.factory.as_ref() != Some(&info.sender) {
                return Err(ContractError::Unauthorized {});
            }

            let mut vaults = VAULTS.may_load(deps.storage, &owner)?.unwrap_or_default();

            vaults.push(VaultRecord {
                owner: owner.clone(),
                instance: instance.clone(),
                initialized: true,
            });

            VAULTS.save(deps.storage, &owner, &vaults)?;
            OWNERS.save(deps.storage, &owner, &(vaults.len() as u32))?;

            Ok(Response::default()
                .add_event(Event::from(DomainEvent::VaultStored { owner, instance })))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: RegistryQueryMsg) -> StdResult<Binary> {
    match msg {
        RegistryQueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        RegistryQueryMsg::VaultOwner { owner } => {
            let count = OWNERS
                .may_load(deps.storage, &owner)?
                .ok_or_else(|| StdError::not_found(format!("Vault owner {}", owner)))?;

            to_json_binary(&VaultOwner { owner, count })
        }
        RegistryQueryMsg::Vaults { owner } => to_json_binary(
            &VAULTS
                .may_load(deps.storage, &owner)?
                .ok_or_else(|| StdError::not_found(format!("Vaults for {}", owner)))?,
        ),
    }
}
