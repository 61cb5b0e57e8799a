use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;

/// Lending market surface. The supplied or redeemed asset travels as the
/// funds attached to the call; proceeds are sent to `beneficiary`.
#[cw_serde]
pub enum LendingExecuteMsg {
    Supply { beneficiary: Addr },
    Redeem { beneficiary: Addr },
}
