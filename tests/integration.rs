use rax_auth_manager::auth::{CredentialStore, Policy};
use rax_auth_manager::config::ManagerConfig;
use rax_auth_manager::error::{AuthError, ManagerError};
use rax_auth_manager::storage::table;
use std::path::PathBuf;
use tempfile::TempDir;

// Helper to create a fresh header-only table and open a store over it
fn open_store(dir: &TempDir, name: &str, policy: Policy) -> (CredentialStore, PathBuf) {
    let path = dir.path().join(name);
    table::create_empty(&path).unwrap();
    let store = CredentialStore::open(&path, policy, &ManagerConfig::default()).unwrap();
    (store, path)
}

#[test]
fn test_salted_hashed_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _path) = open_store(&dir, "saltDB.csv", Policy::SaltedHashed);

    assert!(store.register("mike", "pass").is_ok());
    assert!(matches!(
        store.register("mike", "pass"),
        Err(ManagerError::Auth(AuthError::UsernameTaken(_)))
    ));
    assert!(store.authenticate("mike", "pass").unwrap());
    assert!(!store.authenticate("mike", "word").unwrap());
    assert!(matches!(
        store.authenticate("john", "pass"),
        Err(ManagerError::Auth(AuthError::UsernameNotFound(_)))
    ));
}

#[test]
fn test_reloaded_store_preserves_login_behavior() {
    let dir = tempfile::tempdir().unwrap();

    for policy in [
        Policy::Plain,
        Policy::Hashed,
        Policy::SaltedUnhashed,
        Policy::SaltedHashed,
    ] {
        let name = format!("{policy:?}.csv");
        let (mut store, path) = open_store(&dir, &name, policy);
        store.register("mike", "pass").unwrap();
        store.register("john", "word").unwrap();
        drop(store);

        // A new instance over the same table must behave identically
        let reloaded = CredentialStore::open(&path, policy, &ManagerConfig::default()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.authenticate("mike", "pass").unwrap());
        assert!(reloaded.authenticate("john", "word").unwrap());
        assert!(!reloaded.authenticate("mike", "word").unwrap());
    }
}

#[test]
fn test_flag_construction_selects_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flags.csv");
    table::create_empty(&path).unwrap();

    let store =
        CredentialStore::open_with_flags(&path, true, true, &ManagerConfig::default()).unwrap();
    assert_eq!(store.policy(), Policy::SaltedHashed);

    let store =
        CredentialStore::open_with_flags(&path, false, false, &ManagerConfig::default()).unwrap();
    assert_eq!(store.policy(), Policy::Plain);
}

#[test]
fn test_clear_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, path) = open_store(&dir, "clear.csv", Policy::Hashed);

    store.register("mike", "pass").unwrap();
    store.clear().unwrap();
    drop(store);

    let reloaded = CredentialStore::open(&path, Policy::Hashed, &ManagerConfig::default()).unwrap();
    assert!(reloaded.is_empty());
    assert!(matches!(
        reloaded.authenticate("mike", "pass"),
        Err(ManagerError::Auth(AuthError::UsernameNotFound(_)))
    ));
}

#[test]
fn test_on_disk_value_is_transformed_under_hashed_policies() {
    let dir = tempfile::tempdir().unwrap();

    for policy in [Policy::Hashed, Policy::SaltedHashed] {
        let name = format!("disk_{policy:?}.csv");
        let (mut store, path) = open_store(&dir, &name, policy);
        store.register("mike", "pass").unwrap();
        drop(store);

        let rows = table::load(&path).unwrap();
        assert_ne!(rows["mike"], "pass", "policy {policy}");
    }
}
