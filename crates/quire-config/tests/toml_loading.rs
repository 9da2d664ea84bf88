//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use quire_config::QuireConfig;
use std::path::PathBuf;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/quire/audit.db"

[search]
default_page_size = 50
max_page_size = 500

[dashboard]
activity_days = 7
active_documents = 5
recent_activity = 40
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(QuireConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = QuireConfig::from_figment(&figment).expect("valid config");

        assert_eq!(config.database.path, PathBuf::from("/var/lib/quire/audit.db"));
        assert_eq!(config.search.default_page_size, 50);
        assert_eq!(config.search.max_page_size, 500);
        assert_eq!(config.dashboard.activity_days, 7);
        assert_eq!(config.dashboard.active_documents, 5);
        assert_eq!(config.dashboard.recent_activity, 40);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[dashboard]
activity_days = 14
",
        )?;

        let figment = Figment::from(Serialized::defaults(QuireConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = QuireConfig::from_figment(&figment).expect("valid config");

        assert_eq!(config.dashboard.activity_days, 14);
        assert_eq!(config.dashboard.active_documents, 10);
        assert_eq!(config.search.default_page_size, 20);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".quire")?;
        jail.create_file(
            ".quire/config.toml",
            r#"
[database]
path = "project.db"
"#,
        )?;

        let config = QuireConfig::load().expect("config loads");
        assert_eq!(config.database.path, PathBuf::from("project.db"));
        Ok(())
    });
}

#[test]
fn inconsistent_page_sizes_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[search]
default_page_size = 300
max_page_size = 100
",
        )?;

        let figment = Figment::from(Serialized::defaults(QuireConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = QuireConfig::from_figment(&figment).unwrap_err();
        assert!(err.to_string().contains("search.default_page_size"));
        Ok(())
    });
}
