use chamber_rs::{
    factory::{FactoryConfig, FactoryExecuteMsg, FactoryInstantiateMsg, FactoryQueryMsg, VaultRecord},
    registry::{RegistryExecuteMsg, RegistryInstantiateMsg, RegistryQueryMsg, VaultOwner},
    vault::{Strategy, VaultConfig, VaultExecuteMsg, VaultQueryMsg},
    wrapper::NativeWrapper,
};
use cosmwasm_std::{Addr, Coin, Empty, HexBinary, StdResult, Uint128};
use cw_multi_test::{error::AnyResult, App, AppResponse, ContractWrapper, Executor};

use crate::mock::{aggregator, lending_market, native_wrapper, receipt_denom, wrapped_denom};

pub const NATIVE_DENOM: &str = "rune";
pub const STABLE_DENOM: &str = "uusdc";
pub const TARGET_DENOM: &str = "uatom";

/// 0.05 of an 8-decimal native asset.
pub const DEPLOY_FEE: u128 = 5_000_000;

pub struct ChamberTestApp {
    pub app: App,
    pub factory_addr: Addr,
    pub registry_addr: Addr,
    pub aggregator_addr: Addr,
    pub market_addr: Addr,
    pub wrapper_addr: Addr,
    pub vault_code_id: u64,
    pub admin: Addr,
    pub treasury: Addr,
    pub owner: Addr,
    pub operator: Addr,
}

impl ChamberTestApp {
    pub fn setup() -> Self {
        Self::setup_with_fee(Coin::new(DEPLOY_FEE, NATIVE_DENOM))
    }

    pub fn setup_with_fee(fee: Coin) -> Self {
        let mut app = App::default();

        let vault_code_id = app.store_code(Box::new(
            ContractWrapper::new(
                chamber_vault::contract::execute,
                chamber_vault::contract::instantiate,
                chamber_vault::contract::query,
            )
            .with_reply(chamber_vault::contract::reply),
        ));

        let factory_code_id = app.store_code(Box::new(
            ContractWrapper::new(
                chamber_factory::contract::execute,
                chamber_factory::contract::instantiate,
                chamber_factory::contract::query,
            )
            .with_reply(chamber_factory::contract::reply),
        ));

        let registry_code_id = app.store_code(Box::new(ContractWrapper::new(
            chamber_registry::contract::execute,
            chamber_registry::contract::instantiate,
            chamber_registry::contract::query,
        )));

        let aggregator_code_id = app.store_code(Box::new(ContractWrapper::new(
            aggregator::execute,
            aggregator::instantiate,
            aggregator::query,
        )));

        let market_code_id = app.store_code(Box::new(ContractWrapper::new(
            lending_market::execute,
            lending_market::instantiate,
            lending_market::query,
        )));

        let wrapper_code_id = app.store_code(Box::new(ContractWrapper::new(
            native_wrapper::execute,
            native_wrapper::instantiate,
            native_wrapper::query,
        )));

        let admin = app.api().addr_make("admin");
        let treasury = app.api().addr_make("treasury");
        let owner = app.api().addr_make("owner");
        let operator = app.api().addr_make("operator");

        let registry_addr = app
            .instantiate_contract(
                registry_code_id,
                admin.clone(),
                &RegistryInstantiateMsg { admin: None },
                &[],
                "chamber-registry",
                Some(admin.to_string()),
            )
            .unwrap();

        let wrapper_addr = app
            .instantiate_contract(
                wrapper_code_id,
                admin.clone(),
                &Empty {},
                &[],
                "mock-native-wrapper",
                None,
            )
            .unwrap();

        let factory_addr = app
            .instantiate_contract(
                factory_code_id,
                admin.clone(),
                &FactoryInstantiateMsg {
                    vault_code_id,
                    registry: registry_addr.clone(),
                    treasury: treasury.clone(),
                    fee,
                    native_denom: NATIVE_DENOM.to_string(),
                    wrapper: Some(NativeWrapper {
                        contract: wrapper_addr.clone(),
                        wrapped_denom: wrapped_denom(NATIVE_DENOM),
                    }),
                    max_vaults_per_owner: None,
                },
                &[],
                "chamber-factory",
                Some(admin.to_string()),
            )
            .unwrap();

        app.execute_contract(
            admin.clone(),
            registry_addr.clone(),
            &RegistryExecuteMsg::SetFactory {
                factory: factory_addr.clone(),
            },
            &[],
        )
        .unwrap();

        let aggregator_addr = app
            .instantiate_contract(
                aggregator_code_id,
                admin.clone(),
                &Empty {},
                &[],
                "mock-aggregator",
                None,
            )
            .unwrap();

        let market_addr = app
            .instantiate_contract(
                market_code_id,
                admin.clone(),
                &Empty {},
                &[],
                "mock-lending-market",
                None,
            )
            .unwrap();

        app.init_modules(|router, _, storage| {
            router
                .bank
                .init_balance(
                    storage,
                    &owner,
                    vec![
                        Coin::new(1_000_000_000_000u128, NATIVE_DENOM),
                        Coin::new(1_000_000_000_000u128, STABLE_DENOM),
                    ],
                )
                .unwrap();

            router
                .bank
                .init_balance(
                    storage,
                    &aggregator_addr,
                    vec![
                        Coin::new(1_000_000_000_000u128, NATIVE_DENOM),
                        Coin::new(1_000_000_000_000u128, STABLE_DENOM),
                        Coin::new(1_000_000_000_000u128, TARGET_DENOM),
                    ],
                )
                .unwrap();

            router
                .bank
                .init_balance(
                    storage,
                    &market_addr,
                    vec![
                        Coin::new(1_000_000_000_000u128, receipt_denom(STABLE_DENOM)),
                        Coin::new(1_000_000_000_000u128, STABLE_DENOM),
                    ],
                )
                .unwrap();

            router
                .bank
                .init_balance(
                    storage,
                    &wrapper_addr,
                    vec![
                        Coin::new(1_000_000_000_000u128, NATIVE_DENOM),
                        Coin::new(1_000_000_000_000u128, wrapped_denom(NATIVE_DENOM)),
                    ],
                )
                .unwrap();
        });

        Self {
            app,
            factory_addr,
            registry_addr,
            aggregator_addr,
            market_addr,
            wrapper_addr,
            vault_code_id,
            admin,
            treasury,
            owner,
            operator,
        }
    }

    // Factory helpers

    pub fn deploy_vault(&mut self, owner: &Addr, funds: &[Coin]) -> AnyResult<Addr> {
        println!("[ChamberTestApp] Deploying vault for {owner} with funds {funds:?}");

        self.app.execute_contract(
            owner.clone(),
            self.factory_addr.clone(),
            &FactoryExecuteMsg::DeployVault {},
            funds,
        )?;

        let vaults = self.query_factory_vaults(owner)?;

        vaults
            .last()
            .map(|record| record.instance.clone())
            .ok_or_else(|| anyhow::anyhow!("no vault recorded for {owner}"))
    }

    pub fn query_factory_config(&self) -> FactoryConfig {
        self.app
            .wrap()
            .query_wasm_smart(self.factory_addr.clone(), &FactoryQueryMsg::Config {})
            .unwrap()
    }

    pub fn query_factory_vaults(&self, owner: &Addr) -> StdResult<Vec<VaultRecord>> {
        self.app.wrap().query_wasm_smart(
            self.factory_addr.clone(),
            &FactoryQueryMsg::Vaults {
                owner: owner.clone(),
            },
        )
    }

    pub fn query_instance_count(&self) -> u64 {
        self.app
            .wrap()
            .query_wasm_smart(self.factory_addr.clone(), &FactoryQueryMsg::InstanceCount {})
            .unwrap()
    }

    // Registry helpers

    pub fn query_registry_owner(&self, owner: &Addr) -> StdResult<VaultOwner> {
        self.app.wrap().query_wasm_smart(
            self.registry_addr.clone(),
            &RegistryQueryMsg::VaultOwner {
                owner: owner.clone(),
            },
        )
    }

    pub fn query_registry_vaults(&self, owner: &Addr) -> StdResult<Vec<VaultRecord>> {
        self.app.wrap().query_wasm_smart(
            self.registry_addr.clone(),
            &RegistryQueryMsg::Vaults {
                owner: owner.clone(),
            },
        )
    }

    // Vault helpers

    pub fn execute_vault(
        &mut self,
        sender: &Addr,
        vault_addr: &Addr,
        msg: &VaultExecuteMsg,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        self.app
            .execute_contract(sender.clone(), vault_addr.clone(), msg, funds)
    }

    pub fn query_vault_config(&self, vault_addr: &Addr) -> VaultConfig {
        self.app
            .wrap()
            .query_wasm_smart(vault_addr, &VaultQueryMsg::Config {})
            .unwrap()
    }

    pub fn query_vault_balance(&self, vault_addr: &Addr, asset: &str) -> Uint128 {
        self.app
            .wrap()
            .query_wasm_smart(
                vault_addr,
                &VaultQueryMsg::BalanceOf {
                    asset: asset.to_string(),
                },
            )
            .unwrap()
    }

    pub fn query_strategy(&self, vault_addr: &Addr, hash_id: &HexBinary) -> StdResult<Strategy> {
        self.app.wrap().query_wasm_smart(
            vault_addr,
            &VaultQueryMsg::Strategy {
                hash_id: hash_id.clone(),
            },
        )
    }

    pub fn query_active_strategies(&self, vault_addr: &Addr) -> Vec<Strategy> {
        self.app
            .wrap()
            .query_wasm_smart(vault_addr, &VaultQueryMsg::ActiveStrategies {})
            .unwrap()
    }

    // Chain helpers

    pub fn query_bank_balance(&self, addr: &Addr, denom: &str) -> Uint128 {
        self.app.wrap().query_balance(addr, denom).unwrap().amount
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += 1;
        });
    }
}
