use anyhow::Context;

use craft_config::CraftConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CraftConfig> {
    let mut config = CraftConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(&mut config, flags);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn apply_overrides(config: &mut CraftConfig, flags: &GlobalFlags) {
    if let Some(db) = &flags.db {
        config.storage.db_path.clone_from(db);
    }
    if let Some(backend) = flags.backend {
        config.generator.backend = backend.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{BackendArg, OutputFormat};
    use craft_config::GeneratorBackend;

    #[test]
    fn flags_override_config() {
        let flags = GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            db: Some(":memory:".into()),
            backend: Some(BackendArg::Openai),
        };
        let mut config = CraftConfig::default();
        apply_overrides(&mut config, &flags);
        assert!(config.storage.is_in_memory());
        assert_eq!(config.generator.backend, GeneratorBackend::OpenAi);
    }

    #[test]
    fn absent_flags_keep_config() {
        let flags = GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            verbose: false,
            db: None,
            backend: None,
        };
        let mut config = CraftConfig::default();
        apply_overrides(&mut config, &flags);
        assert_eq!(config.storage.db_path, craft_config::DEFAULT_DB_PATH);
        assert_eq!(config.generator.backend, GeneratorBackend::Fixture);
    }
}
