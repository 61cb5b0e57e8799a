use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Event, HexBinary, Uint128};

use crate::vault::VaultStatus;

#[cw_serde]
pub enum DomainEvent {
    VaultCreated {
        owner: Addr,
        instance: Addr,
    },
    FeeChanged {
        fee: Coin,
    },
    TreasuryChanged {
        treasury: Addr,
    },
    VaultCodeIdChanged {
        code_id: u64,
    },
    OperatorChanged {
        contract_address: Addr,
        operator: Option<Addr>,
    },
    StatusChanged {
        contract_address: Addr,
        status: VaultStatus,
    },
    Deposited {
        contract_address: Addr,
        asset: String,
        amount: Uint128,
    },
    Withdrawn {
        contract_address: Addr,
        to: Addr,
        asset: String,
        amount: Uint128,
    },
    StrategyCreated {
        contract_address: Addr,
        hash_id: HexBinary,
        amount: Uint128,
        frequency: u64,
    },
    StrategyUpdated {
        contract_address: Addr,
        hash_id: HexBinary,
    },
    StrategyDeprecated {
        contract_address: Addr,
        hash_id: HexBinary,
    },
    StrategyDeleted {
        contract_address: Addr,
        hash_id: HexBinary,
    },
    StrategyExecuted {
        contract_address: Addr,
        hash_id: HexBinary,
        swap_count: u64,
    },
    SwapExecuted {
        contract_address: Addr,
        sell_asset: String,
        buy_asset: String,
        amount: Uint128,
        received: Uint128,
    },
    Supplied {
        contract_address: Addr,
        market: Addr,
        asset: String,
        amount: Uint128,
        received: Uint128,
    },
    Redeemed {
        contract_address: Addr,
        market: Addr,
        asset: String,
        amount: Uint128,
        received: Uint128,
    },
    Wrapped {
        contract_address: Addr,
        wrapper: Addr,
        amount: Uint128,
        received: Uint128,
    },
    Unwrapped {
        contract_address: Addr,
        wrapper: Addr,
        amount: Uint128,
        received: Uint128,
    },
    VaultStored {
        owner: Addr,
        instance: Addr,
    },
    FactoryChanged {
        factory: Addr,
    },
}

impl From<DomainEvent> for Event {
    fn from(event: DomainEvent) -> Self {
        match event {
            DomainEvent::VaultCreated { owner, instance } => Event::new("new_vault")
                .add_attribute("owner", owner.as_str())
                .add_attribute("instance", instance.as_str()),
            DomainEvent::FeeChanged { fee } => {
                Event::new("fee_change").add_attribute("fee", fee.to_string())
            }
            DomainEvent::TreasuryChanged { treasury } => {
                Event::new("treasury_change").add_attribute("treasury", treasury.as_str())
            }
            DomainEvent::VaultCodeIdChanged { code_id } => {
                Event::new("vault_code_id_change").add_attribute("code_id", code_id.to_string())
            }
            DomainEvent::OperatorChanged {
                contract_address,
                operator,
            } => Event::new("new_operator")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute(
                    "operator",
                    operator.map(|o| o.to_string()).unwrap_or_default(),
                ),
            DomainEvent::StatusChanged {
                contract_address,
                status,
            } => Event::new("status_change")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("status", status.to_string()),
            DomainEvent::Deposited {
                contract_address,
                asset,
                amount,
            } => Event::new("deposit")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("asset", asset)
                .add_attribute("amount", amount.to_string()),
            DomainEvent::Withdrawn {
                contract_address,
                to,
                asset,
                amount,
            } => Event::new("withdraw")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("to", to.as_str())
                .add_attribute("asset", asset)
                .add_attribute("amount", amount.to_string()),
            DomainEvent::StrategyCreated {
                contract_address,
                hash_id,
                amount,
                frequency,
            } => Event::new("new_strategy")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("hash_id", hash_id.to_hex())
                .add_attribute("amount", amount.to_string())
                .add_attribute("frequency", frequency.to_string()),
            DomainEvent::StrategyUpdated {
                contract_address,
                hash_id,
            } => Event::new("update_strategy")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("hash_id", hash_id.to_hex()),
            DomainEvent::StrategyDeprecated {
                contract_address,
                hash_id,
            } => Event::new("deprecate_strategy")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("hash_id", hash_id.to_hex()),
            DomainEvent::StrategyDeleted {
                contract_address,
                hash_id,
            } => Event::new("delete_strategy")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("hash_id", hash_id.to_hex()),
            DomainEvent::StrategyExecuted {
                contract_address,
                hash_id,
                swap_count,
            } => Event::new("execute_strategy")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("hash_id", hash_id.to_hex())
                .add_attribute("swap_count", swap_count.to_string()),
            DomainEvent::SwapExecuted {
                contract_address,
                sell_asset,
                buy_asset,
                amount,
                received,
            } => Event::new("execute_swap")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("sell_asset", sell_asset)
                .add_attribute("buy_asset", buy_asset)
                .add_attribute("amount", amount.to_string())
                .add_attribute("received", received.to_string()),
            DomainEvent::Supplied {
                contract_address,
                market,
                asset,
                amount,
                received,
            } => Event::new("supply")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("market", market.as_str())
                .add_attribute("asset", asset)
                .add_attribute("amount", amount.to_string())
                .add_attribute("received", received.to_string()),
            DomainEvent::Redeemed {
                contract_address,
                market,
                asset,
                amount,
                received,
            } => Event::new("redeem")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("market", market.as_str())
                .add_attribute("asset", asset)
                .add_attribute("amount", amount.to_string())
                .add_attribute("received", received.to_string()),
            DomainEvent::Wrapped {
                contract_address,
                wrapper,
                amount,
                received,
            } => Event::new("wrap_native")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("wrapper", wrapper.as_str())
                .add_attribute("amount", amount.to_string())
                .add_attribute("received", received.to_string()),
            DomainEvent::Unwrapped {
                contract_address,
                wrapper,
                amount,
                received,
            } => Event::new("unwrap_native")
                .add_attribute("contract_address", contract_address.as_str())
                .add_attribute("wrapper", wrapper.as_str())
                .add_attribute("amount", amount.to_string())
                .add_attribute("received", received.to_string()),
            DomainEvent::VaultStored { owner, instance } => Event::new("store_vault")
                .add_attribute("owner", owner.as_str())
                .add_attribute("instance", instance.as_str()),
            DomainEvent::FactoryChanged { factory } => {
                Event::new("new_factory").add_attribute("factory", factory.as_str())
            }
        }
    }
}
