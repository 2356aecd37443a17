//! Configuration loading from files.
//!
//! The YAML file is layered under `SAGASITE_*` environment variables, so a
//! single value can be overridden without editing the file
//! (`SAGASITE_SITE__OUTPUT=/tmp/out`).

use std::path::Path;

use super::{ConfigError, RootConfig};

const ENV_PREFIX: &str = "SAGASITE";

impl RootConfig {
    /// Load the config from the command line argument, defaulting to `sagasite.yaml`
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new("sagasite.yaml"));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let root: RootConfig = settings.try_deserialize()?;
        root.validate()?;

        tracing::debug!(
            path = %path.display(),
            sagas = root.sagas.len(),
            collections = root.collections.len(),
            "loaded configuration"
        );

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sagasite.yaml");
        std::fs::write(
            &path,
            r#"
site:
  name: Tales
  output: out
sagas:
  - name: Donut Saga
    source: ./donuts
    naming: prefixed
stylesheets:
  - source: style.less
    output: style.css
"#,
        )
        .unwrap();

        let config = RootConfig::load_from_file(&path).unwrap();
        assert_eq!(config.site.name, "Tales");
        assert_eq!(config.site.output, std::path::PathBuf::from("out"));
        assert_eq!(config.sagas[0].slug(), "donut-saga");
        assert_eq!(config.stylesheets[0].command, "lessc");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RootConfig::load_from_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sagasite.yaml");
        std::fs::write(
            &path,
            "site:\n  name: Tales\n  description: from the file\n",
        )
        .unwrap();

        // Other tests load configs concurrently, so only touch a key none of
        // them asserts on
        let key = "SAGASITE_SITE__DESCRIPTION";
        unsafe { std::env::set_var(key, "from the environment") };
        let loaded = RootConfig::load_from_file(&path);
        unsafe { std::env::remove_var(key) };

        let config = loaded.unwrap();
        assert_eq!(config.site.name, "Tales");
        assert_eq!(config.site.description, "from the environment");
    }
}
