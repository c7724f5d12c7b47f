//! The shipped `config.yaml` loads and validates.

#![allow(clippy::unwrap_used)]

use practice_api::config::{AssistantProvider, load_config};

#[test]
fn test_shipped_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.yaml");
    let config = load_config(Some(path)).unwrap();

    assert_eq!(config.downloads.linux, "TheraVault.AppImage");
    assert!(config.assistant.history_limit >= 1);
    if std::env::var("ASSISTANT_PROVIDER").is_err() {
        assert_eq!(config.assistant.provider, AssistantProvider::Stub);
    }
}
