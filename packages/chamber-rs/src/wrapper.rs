use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;

use crate::core::ContractError;

/// Contract that converts the native denom into a ledgered token and back.
#[cw_serde]
pub struct NativeWrapper {
    pub contract: Addr,
    pub wrapped_denom: String,
}

impl NativeWrapper {
    pub fn validate(&self, native_denom: &str) -> Result<(), ContractError> {
        if self.wrapped_denom.is_empty() || self.wrapped_denom == native_denom {
            return Err(ContractError::InvalidAsset {
                asset: self.wrapped_denom.clone(),
            });
        }
        Ok(())
    }
}

/// The converted asset travels as the funds attached to the call and the
/// output is returned to the sender.
#[cw_serde]
pub enum WrapperExecuteMsg {
    Wrap {},
    Unwrap {},
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_denom_must_differ_from_native() {
        let wrapper = |denom: &str| NativeWrapper {
            contract: Addr::unchecked("wrapper"),
            wrapped_denom: denom.to_string(),
        };

        assert!(wrapper("wrune").validate("rune").is_ok());
        assert_eq!(
            wrapper("rune").validate("rune").unwrap_err(),
            ContractError::InvalidAsset {
                asset: "rune".to_string()
            }
        );
        assert!(wrapper("").validate("rune").is_err());
    }
}
