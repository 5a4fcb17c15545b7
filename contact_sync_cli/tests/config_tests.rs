//! Configuration manager tests
//!
//! Tests that touch `CONTACT_SYNC_` environment variables run serially.

use contact_sync_cli::config::ConfigManager;
use contact_sync_core::MarkImportedPolicy;
use contact_sync_core::traits::WebsiteDirectory;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn create_test_config_manager(temp_dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(temp_dir.path().join("config.toml"))
}

#[test]
#[serial]
fn test_load_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config_manager(&temp_dir).load().unwrap();

    assert_eq!(config.orders.batch_limit, 100);
    assert!(config.output.color_enabled);
    assert!(config.websites.is_empty());
    assert!(config.database.path.ends_with("contact-sync.db"));
}

#[test]
#[serial]
fn test_set_creates_file_and_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    manager.set("orders.mark_failed_as_imported", "false").unwrap();
    manager.set("export.directory", "/srv/exports").unwrap();

    assert!(temp_dir.path().join("config.toml").exists());
    assert_eq!(manager.get("orders.mark_failed_as_imported").unwrap(), "false");
    assert_eq!(manager.get("export.directory").unwrap(), "/srv/exports");

    let config = manager.load().unwrap();
    assert_eq!(config.mark_imported_policy(), MarkImportedPolicy::OnlyQueued);
}

#[test]
#[serial]
fn test_unknown_key_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    let err = manager.get("orders.nope").unwrap_err();
    assert!(err.to_string().contains("orders.nope"));
}

#[test]
#[serial]
fn test_websites_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        r#"
[[websites]]
id = 1
code = "base"
name = "Main Website"
api_enabled = true
guest_sync_enabled = true
guest_address_book = "Guests"
mapped_store_name = "Main Store"
store_ids = [1, 2]

[[websites]]
id = 2
code = "b2b"
name = "Wholesale"
store_ids = [3]
"#,
    )
    .unwrap();

    let config = create_test_config_manager(&temp_dir).load().unwrap();
    assert_eq!(config.websites.len(), 2);
    assert!(config.websites[0].accepts_guest_sync());
    assert_eq!(config.websites[0].mapped_store_name(), "Main Store");
    assert!(!config.websites[1].accepts_guest_sync());

    let directory = config.website_directory().unwrap();
    assert_eq!(directory.website_id_for_store(3), Some(2));
}

#[test]
#[serial]
fn test_list_skips_website_tables() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);
    manager.set("orders.batch_limit", "10").unwrap();

    let items = manager.list().unwrap();
    assert!(items.contains(&("orders.batch_limit".to_string(), "10".to_string())));
    assert!(items.iter().all(|(key, _)| !key.starts_with("websites")));
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);
    manager.set("orders.batch_limit", "10").unwrap();

    // SAFETY: serialized with every other test in this file
    unsafe { std::env::set_var("CONTACT_SYNC_ORDERS__BATCH_LIMIT", "3") };
    let config = manager.load();
    unsafe { std::env::remove_var("CONTACT_SYNC_ORDERS__BATCH_LIMIT") };

    assert_eq!(config.unwrap().orders.batch_limit, 3);
    assert_eq!(manager.load().unwrap().orders.batch_limit, 10);
}
