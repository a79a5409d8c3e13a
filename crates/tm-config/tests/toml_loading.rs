//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use tm_config::{ConfigError, TmConfig};

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/taskmaster/prod.db"

[server]
bind = "0.0.0.0:9000"

[auth]
token_ttl_minutes = 120

[scheduler]
interval_secs = 60

[general]
default_limit = 25
"#,
        )?;

        let config: TmConfig = Figment::from(Serialized::defaults(TmConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/taskmaster/prod.db");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.auth.token_ttl_minutes, 120);
        assert_eq!(config.scheduler.interval_secs, 60);
        assert_eq!(config.general.default_limit, 25);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[scheduler]
interval_secs = 5
"#,
        )?;

        let config: TmConfig = Figment::from(Serialized::defaults(TmConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.scheduler.interval_secs, 5);
        assert_eq!(config.database.path, "taskmaster.db");
        assert_eq!(config.auth.token_ttl_minutes, 30);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("TASKMASTER_DATABASE__PATH", "from-env.db");

        jail.create_file(
            "config.toml",
            r#"
[database]
path = "from-toml.db"

[server]
bind = "127.0.0.1:7000"
"#,
        )?;

        let config: TmConfig = Figment::from(Serialized::defaults(TmConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("TASKMASTER_").split("__"))
            .extract()?;

        assert_eq!(config.database.path, "from-env.db");
        assert_eq!(config.server.bind, "127.0.0.1:7000");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "taskmaster.toml",
            r#"
[general]
default_limit = 7
"#,
        )?;
        jail.set_env("TASKMASTER_AUTH__TOKEN_TTL_MINUTES", "45");

        let config = TmConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 7);
        assert_eq!(config.auth.token_ttl_minutes, 45);
        Ok(())
    });
}

#[test]
fn load_rejects_unparseable_bind_address() {
    Jail::expect_with(|jail| {
        jail.set_env("TASKMASTER_SERVER__BIND", "not-an-address");

        let result = TmConfig::load();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "server.bind"
        ));
        Ok(())
    });
}

/// Typo'd env var keys are silently ignored by figment.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("TASKMASTER_SCHEDULER__INTERVAL_SEC", "30");

        let config: TmConfig = Figment::from(Serialized::defaults(TmConfig::default()))
            .merge(Env::prefixed("TASKMASTER_").split("__"))
            .extract()?;

        assert_eq!(config.scheduler.interval_secs, 0);
        Ok(())
    });
}
