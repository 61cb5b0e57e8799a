use chamber_rs::factory::{FactoryConfig, VaultRecord};
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<FactoryConfig> = Item::new("config");
pub const INSTANCE_COUNT: Item<u64> = Item::new("instance_count");
pub const PENDING_VAULT: Item<VaultRecord> = Item::new("pending_vault");

const VAULTS: Map<&Addr, Vec<VaultRecord>> = Map::new("vaults_v1");

pub fn vaults_of(store: &dyn Storage, owner: &Addr) -> StdResult<Vec<VaultRecord>> {
    Ok(VAULTS.may_load(store, owner)?.unwrap_or_default())
}

pub fn add_vault(store: &mut dyn Storage, record: VaultRecord) -> StdResult<Vec<VaultRecord>> {
    let mut vaults = vaults_of(store, &record.owner)?;
    let owner = record.owner.clone();
    vaults.push(record);
    VAULTS.save(store, &owner, &vaults)?;
    Ok(vaults)
}

pub fn mark_initialized(store: &mut dyn Storage, owner: &Addr, instance: &Addr) -> StdResult<()> {
    let vaults = vaults_of(store, owner)?
        .into_iter()
        .map(|record| {
            if record.instance == *instance {
                VaultRecord {
                    initialized: true,
                    ..record
                }
            } else {
                record
            }
        })
        .collect::<Vec<_>>();

    VAULTS.save(store, owner, &vaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    fn record(owner: &str, instance: &str) -> VaultRecord {
        VaultRecord {
            owner: Addr::unchecked(owner),
            instance: Addr::unchecked(instance),
            initialized: false,
        }
    }

    #[test]
    fn appends_vaults_per_owner() {
        let store = &mut MockStorage::default();

        add_vault(store, record("alice", "vault-1")).unwrap();
        add_vault(store, record("alice", "vault-2")).unwrap();
        add_vault(store, record("bob", "vault-3")).unwrap();

        assert_eq!(
            vaults_of(store, &Addr::unchecked("alice")).unwrap(),
            vec![record("alice", "vault-1"), record("alice", "vault-2")]
        );
        assert_eq!(vaults_of(store, &Addr::unchecked("bob")).unwrap().len(), 1);
        assert!(vaults_of(store, &Addr::unchecked("carol"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn marks_only_matching_instance() {
        let store = &mut MockStorage::default();
        let alice = Addr::unchecked("alice");

        add_vault(store, record("alice", "vault-1")).unwrap();
        add_vault(store, record("alice", "vault-2")).unwrap();

        mark_initialized(store, &alice, &Addr::unchecked("vault-2")).unwrap();

        let vaults = vaults_of(store, &alice).unwrap();
        assert!(!vaults[0].initialized);
        assert!(vaults[1].initialized);
    }
}
