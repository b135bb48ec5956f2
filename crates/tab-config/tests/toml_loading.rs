//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use tab_config::TabConfig;

fn layered() -> Figment {
    Figment::from(Serialized::defaults(TabConfig::default()))
        .merge(Toml::file("config.toml"))
        .merge(Env::prefixed("TABULA_").split("__"))
}

#[test]
fn loads_store_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
path = "./orders.db"
fold_identifiers = false
"#,
        )?;

        let config = TabConfig::from_figment(&layered()).expect("config loads");
        assert_eq!(config.store.path, "./orders.db");
        assert!(!config.store.fold_identifiers);
        assert!(!config.store.is_in_memory());
        Ok(())
    });
}

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_limit = 5
format = "json"
"#,
        )?;

        let config = TabConfig::from_figment(&layered()).expect("config loads");
        assert_eq!(config.general.default_limit, 5);
        assert_eq!(config.general.format, "json");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tabula")?;
        jail.create_file(
            ".tabula/config.toml",
            r#"
[general]
format = "raw"
"#,
        )?;

        let config = TabConfig::load().expect("config loads");
        assert_eq!(config.general.format, "raw");
        Ok(())
    });
}
