use anyhow::Context;
use serde::Deserialize;

const ENV_PREFIX: &str = "ANTEROOM";

/// Top-level configuration loaded from the environment.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub mongo: MongoSettings,
}

/// MongoDB endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoSettings {
    /// Connection URI; credentials, if any, travel inside it and never in code.
    #[serde(default = "MongoSettings::default_uri")]
    pub uri: String,
    /// Logical database name the connection is requested with.
    #[serde(default = "MongoSettings::default_database")]
    pub database: String,
}

impl MongoSettings {
    fn default_uri() -> String {
        "mongodb://mongo:27017".to_string()
    }

    fn default_database() -> String {
        "abshar".to_string()
    }
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: Self::default_uri(),
            database: Self::default_database(),
        }
    }
}

impl Settings {
    /// Load configuration from `ANTEROOM_`-prefixed environment variables,
    /// honoring a `.env` file when one is present.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("_"))
            .build()
            .with_context(|| "failed to build configuration")?;

        cfg.try_deserialize()
            .with_context(|| "failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::Mutex;

    use super::*;

    // Tests below mutate process-wide environment variables; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("ANTEROOM_MONGO_URI");
        env::remove_var("ANTEROOM_MONGO_DATABASE");
    }

    #[test]
    fn defaults_are_used_when_env_is_unset() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let settings = Settings::load().unwrap();
        assert_eq!(settings.mongo.uri, "mongodb://mongo:27017");
        assert_eq!(settings.mongo.database, "abshar");
    }

    #[test]
    fn environment_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("ANTEROOM_MONGO_URI", "mongodb://user:pw@db.internal:27018");
        env::set_var("ANTEROOM_MONGO_DATABASE", "staging");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.mongo.uri, "mongodb://user:pw@db.internal:27018");
        assert_eq!(settings.mongo.database, "staging");

        clear_env();
    }

    #[test]
    fn default_struct_matches_env_free_load() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let loaded = Settings::load().unwrap();
        let defaulted = Settings::default();
        assert_eq!(loaded.mongo.uri, defaulted.mongo.uri);
        assert_eq!(loaded.mongo.database, defaulted.mongo.database);
    }
}
