use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    Addr, BankMsg, Binary, Coin, CosmosMsg, HexBinary, Instantiate2AddressError, OverflowError,
    Response, StdError, Uint128, WasmMsg,
};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    OverflowError(#[from] OverflowError),

    #[error("{0}")]
    Instantiate2Address(#[from] Instantiate2AddressError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Insufficient balance of {asset}: available {available}, requested {requested}")]
    InsufficientBalance {
        asset: String,
        available: Uint128,
        requested: Uint128,
    },

    #[error("{kind} not found")]
    NotFound { kind: String },

    #[error("Strategy with that id already exists: {hash_id}")]
    DuplicateStrategy { hash_id: HexBinary },

    #[error("Strategy {hash_id} is not active")]
    StrategyInactive { hash_id: HexBinary },

    #[error("Strategy {hash_id} cannot execute before {next_execution}")]
    TooSoon {
        hash_id: HexBinary,
        next_execution: u64,
    },

    #[error("Invalid strategy: {reason}")]
    InvalidStrategy { reason: String },

    #[error("You have reached max vault amount ({max})")]
    MaxVaultsReached { max: u32 },

    #[error("Insufficient fee: required {required}, received {received}")]
    InsufficientFee { required: Coin, received: Coin },

    #[error("Swap failed: {reason}")]
    SwapFailed { reason: String },

    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Invalid asset: {asset}")]
    InvalidAsset { asset: String },

    #[error("Vault is not active")]
    VaultNotActive {},

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("A swap is already in progress")]
    SwapInProgress {},
}

impl ContractError {
    pub fn generic_err(msg: impl Into<String>) -> Self {
        ContractError::Std(StdError::generic_err(msg.into()))
    }

    pub fn not_found(kind: impl Into<String>) -> Self {
        ContractError::NotFound { kind: kind.into() }
    }
}

pub type ContractResult = Result<Response, ContractError>;

pub struct Contract(pub Addr);

impl Contract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: Binary, funds: Vec<Coin>) -> CosmosMsg {
        WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds,
        }
        .into()
    }
}

/// A pre-quoted call against an arbitrary contract. The vault never inspects
/// `msg`; callers are trusted only by role.
#[cw_serde]
pub struct ExternalCall {
    pub allowance_target: Addr,
    pub target: Addr,
    pub msg: Binary,
    pub funds: Vec<Coin>,
}

impl ExternalCall {
    /// Bank assets have no allowances, so the funds either travel with the
    /// call or are escrowed with the allowance target ahead of it.
    pub fn into_msgs(self) -> (Option<CosmosMsg>, CosmosMsg) {
        if self.allowance_target == self.target || self.funds.is_empty() {
            return (None, Contract(self.target).call(self.msg, self.funds));
        }

        let escrow = BankMsg::Send {
            to_address: self.allowance_target.to_string(),
            amount: self.funds,
        };

        (
            Some(escrow.into()),
            Contract(self.target).call(self.msg, vec![]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::to_json_binary;

    #[test]
    fn external_call_attaches_funds_when_targets_match() {
        let target = Addr::unchecked("aggregator");
        let call = ExternalCall {
            allowance_target: target.clone(),
            target: target.clone(),
            msg: to_json_binary(&"swap").unwrap(),
            funds: vec![Coin::new(100u128, "uusdc")],
        };

        let (escrow, msg) = call.clone().into_msgs();

        assert!(escrow.is_none());
        assert_eq!(
            msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: target.to_string(),
                msg: call.msg,
                funds: vec![Coin::new(100u128, "uusdc")],
            })
        );
    }

    #[test]
    fn external_call_escrows_funds_with_distinct_allowance_target() {
        let call = ExternalCall {
            allowance_target: Addr::unchecked("proxy"),
            target: Addr::unchecked("aggregator"),
            msg: to_json_binary(&"swap").unwrap(),
            funds: vec![Coin::new(100u128, "uusdc")],
        };

        let (escrow, msg) = call.clone().into_msgs();

        assert_eq!(
            escrow,
            Some(CosmosMsg::Bank(BankMsg::Send {
                to_address: "proxy".to_string(),
                amount: vec![Coin::new(100u128, "uusdc")],
            }))
        );
        assert_eq!(
            msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: "aggregator".to_string(),
                msg: call.msg,
                funds: vec![],
            })
        );
    }
}
