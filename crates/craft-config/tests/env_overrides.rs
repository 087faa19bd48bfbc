use craft_config::{CraftConfig, GeneratorBackend};
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn prefixed_env_selects_backend() {
    Jail::expect_with(|jail| {
        jail.set_env("AUTOCRAFT_GENERATOR__BACKEND", "openai");
        jail.set_env("AUTOCRAFT_GENERATOR__API_KEY", "sk-from-env");
        jail.set_env("AUTOCRAFT_STORAGE__DB_PATH", ":memory:");

        let config = CraftConfig::load().expect("config loads");
        assert_eq!(config.generator.backend, GeneratorBackend::OpenAi);
        assert_eq!(config.generator.api_key, "sk-from-env");
        assert!(config.storage.is_in_memory());
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn openai_api_key_fills_generator_key() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-raw");

        let config = CraftConfig::load().expect("config loads");
        assert_eq!(config.generator.api_key, "sk-raw");
        Ok(())
    });
}

#[test]
fn prefixed_key_beats_raw_openai_key() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-raw");
        jail.set_env("AUTOCRAFT_GENERATOR__API_KEY", "sk-prefixed");

        let config = CraftConfig::load().expect("config loads");
        assert_eq!(config.generator.api_key, "sk-prefixed");
        Ok(())
    });
}

#[test]
fn invalid_number_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("AUTOCRAFT_GENERATOR__MAX_ATTEMPTS", "many");
        assert!(CraftConfig::load().is_err());
        Ok(())
    });
}
