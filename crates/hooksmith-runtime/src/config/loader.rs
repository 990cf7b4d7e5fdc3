//! Layered configuration loading with figment.
//!
//! Sources, lowest precedence first:
//!
//! 1. `HooksmithConfig::default()`
//! 2. values passed to [`ConfigLoader::merge`]
//! 3. the config file (`hooksmith.toml`, `config.toml`, or YAML variants)
//! 4. its profile sibling, e.g. `hooksmith.production.toml`
//! 5. `HOOKSMITH_*` environment variables, `__` separating nested keys
//!
//! ```text
//! HOOKSMITH_WEBHOOK__VALIDATION_TOKEN=secret   ->  webhook.validation_token
//! HOOKSMITH_SEND_API__PAGE_TOKEN=EAAB...       ->  send_api.page_token
//! HOOKSMITH_LOGGING__LEVEL=debug               ->  logging.level
//! ```
//!
//! `HOOKSMITH_PROFILE` picks the profile and is not itself a config key.
//!
//! TOML files need the `toml-config` feature (default), YAML files need
//! `yaml-config`. Without an explicit [`ConfigLoader::file`], the current
//! directory and `<config dir>/hooksmith` are searched and the first base
//! file found is used.
//!
//! ```rust,ignore
//! use hooksmith_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .profile("production")
//!     .search_path("/etc/hooksmith")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format;
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::HooksmithConfig;

const ENV_PREFIX: &str = "HOOKSMITH_";
const PROFILE_VAR: &str = "HOOKSMITH_PROFILE";

/// File stems tried in each search directory, in order.
const FILE_STEMS: [&str; 2] = ["hooksmith", "config"];

// =============================================================================
// Profile
// =============================================================================

/// Deployment profile, selecting the `<stem>.<profile>.<ext>` overlay file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Development,
    Production,
    Custom(String),
}

impl Profile {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Case-insensitive; `dev` and `prod` are accepted as short forms.
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "dev" | "development" => Self::Development,
            "prod" | "production" => Self::Production,
            _ => Self::Custom(name),
        }
    }

    /// The profile named by `HOOKSMITH_PROFILE`, or Development.
    pub fn from_env() -> Self {
        match std::env::var(PROFILE_VAR) {
            Ok(name) if !name.trim().is_empty() => Self::parse(&name),
            _ => Self::default(),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// File formats
// =============================================================================

/// A config file format enabled at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    #[cfg(feature = "toml-config")]
    Toml,
    #[cfg(feature = "yaml-config")]
    Yaml,
}

impl FileFormat {
    const ENABLED: &'static [FileFormat] = &[
        #[cfg(feature = "toml-config")]
        FileFormat::Toml,
        #[cfg(feature = "yaml-config")]
        FileFormat::Yaml,
    ];

    fn extensions(self) -> &'static [&'static str] {
        match self {
            #[cfg(feature = "toml-config")]
            Self::Toml => &["toml"],
            #[cfg(feature = "yaml-config")]
            Self::Yaml => &["yaml", "yml"],
        }
    }

    fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ENABLED
            .iter()
            .copied()
            .find(|format| format.extensions().contains(&ext))
    }

    fn merge_into(self, figment: Figment, path: &Path) -> Figment {
        match self {
            #[cfg(feature = "toml-config")]
            Self::Toml => figment.merge(figment::providers::Toml::file(path)),
            #[cfg(feature = "yaml-config")]
            Self::Yaml => figment.merge(figment::providers::Yaml::file(path)),
        }
    }
}

/// The explicit search paths, or the current directory and `<config dir>/hooksmith`.
fn search_dirs(explicit: &[PathBuf]) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    std::env::current_dir()
        .ok()
        .into_iter()
        .chain(dirs::config_dir().map(|dir| dir.join("hooksmith")))
        .collect()
}

/// `dir/stem.ext` -> `dir/stem.<profile>.ext`
fn profile_sibling(path: &Path, profile: &Profile) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let ext = path.extension()?.to_str()?;
    Some(path.with_file_name(format!("{stem}.{profile}.{ext}")))
}

// =============================================================================
// ConfigLoader
// =============================================================================

/// Builder that assembles the configuration sources and extracts a
/// [`HooksmithConfig`].
pub struct ConfigLoader {
    overrides: Figment,
    profile: Profile,
    search_paths: Vec<PathBuf>,
    file: Option<PathBuf>,
    read_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that searches the default locations, reads the environment
    /// and takes its profile from `HOOKSMITH_PROFILE`.
    pub fn new() -> Self {
        Self {
            overrides: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            file: None,
            read_env: true,
        }
    }

    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a directory to search. Once any is added, the default locations
    /// are no longer searched.
    pub fn search_path<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.search_paths.push(dir.as_ref().to_path_buf());
        self
    }

    /// Loads exactly this file instead of searching. It must exist.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env(mut self) -> Self {
        self.read_env = true;
        self
    }

    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// Layers `config` over the built-in defaults. Files and environment
    /// variables still win.
    pub fn merge(mut self, config: HooksmithConfig) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(config));
        self
    }

    /// Loads the configuration. The result is not validated; see
    /// [`validate_config`](super::validate_config).
    pub fn load(self) -> ConfigResult<HooksmithConfig> {
        let profile = self.profile.clone();
        let config: HooksmithConfig = self
            .figment()?
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;

        debug!(
            profile = %profile,
            webhook = %config.webhook.bind_addr(),
            path = %config.webhook.path,
            send_api = config.send_api.is_configured(),
            "Configuration loaded"
        );
        Ok(config)
    }

    fn figment(self) -> ConfigResult<Figment> {
        let mut figment =
            Figment::from(Serialized::defaults(HooksmithConfig::default())).merge(self.overrides);

        let base = match &self.file {
            Some(path) if !path.exists() => return Err(ConfigError::FileNotFound(path.clone())),
            Some(path) => Some(path.clone()),
            None => Self::search(&search_dirs(&self.search_paths)),
        };

        match base {
            Some(path) => {
                let format = FileFormat::for_path(&path)
                    .ok_or_else(|| ConfigError::UnsupportedFormat(path.clone()))?;
                info!(path = %path.display(), "Loading configuration file");
                figment = format.merge_into(figment, &path);

                if let Some(overlay) = profile_sibling(&path, &self.profile)
                    && overlay.exists()
                {
                    debug!(path = %overlay.display(), profile = %self.profile, "Loading profile overlay");
                    figment = format.merge_into(figment, &overlay);
                }
            }
            None => warn!("No configuration file found, using defaults"),
        }

        if self.read_env {
            trace!(prefix = ENV_PREFIX, "Reading environment overrides");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["profile"]).split("__"));
        }

        Ok(figment)
    }

    /// The first existing `<stem>.<ext>` across `dirs`, stems and enabled formats.
    fn search(dirs: &[PathBuf]) -> Option<PathBuf> {
        dirs.iter()
            .flat_map(|dir| {
                FILE_STEMS.iter().flat_map(move |stem| {
                    FileFormat::ENABLED
                        .iter()
                        .flat_map(|format| format.extensions())
                        .map(move |ext| dir.join(format!("{stem}.{ext}")))
                })
            })
            .find(|candidate| candidate.is_file())
    }
}

/// Loads configuration from the default locations and the environment.
pub fn load_config() -> ConfigResult<HooksmithConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from `path` and the environment.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<HooksmithConfig> {
    ConfigLoader::new().file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogLevel;
    use figment::Jail;

    fn load_from(jail: &Jail, loader: ConfigLoader) -> figment::Result<HooksmithConfig> {
        loader
            .search_path(jail.directory())
            .load()
            .map_err(|e| e.to_string().into())
    }

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|jail| {
            let config = load_from(jail, ConfigLoader::new().without_env())?;
            assert_eq!(config, HooksmithConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "hooksmith.toml",
                r#"
                [webhook]
                port = 3000
                validation_token = "from-file"

                [logging]
                level = "debug"
                "#,
            )?;
            jail.set_env("HOOKSMITH_WEBHOOK__VALIDATION_TOKEN", "from-env");
            jail.set_env("HOOKSMITH_SEND_API__PAGE_TOKEN", "page");

            let config = load_from(jail, ConfigLoader::new())?;
            assert_eq!(config.webhook.port, 3000);
            assert_eq!(config.webhook.validation_token, "from-env");
            assert_eq!(config.send_api.page_token.as_deref(), Some("page"));
            assert_eq!(config.logging.level, LogLevel::Debug);
            Ok(())
        });
    }

    #[test]
    fn test_hooksmith_toml_preferred_over_config_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[webhook]\nport = 1111\n")?;
            jail.create_file("hooksmith.toml", "[webhook]\nport = 2222\n")?;

            let config = load_from(jail, ConfigLoader::new().without_env())?;
            assert_eq!(config.webhook.port, 2222);
            Ok(())
        });
    }

    #[test]
    fn test_profile_overlay() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "hooksmith.toml",
                "[webhook]\nport = 3000\npath = \"/hook\"\n",
            )?;
            jail.create_file("hooksmith.production.toml", "[webhook]\nport = 443\n")?;

            let config = load_from(jail, ConfigLoader::new().profile("prod").without_env())?;
            assert_eq!(config.webhook.port, 443);
            assert_eq!(config.webhook.path, "/hook");

            let config = load_from(jail, ConfigLoader::new().profile("dev").without_env())?;
            assert_eq!(config.webhook.port, 3000);
            Ok(())
        });
    }

    #[test]
    fn test_merge_sits_below_files() {
        Jail::expect_with(|jail| {
            let mut base = HooksmithConfig::default();
            base.webhook.path = "/hooks".to_string();
            base.webhook.port = 9000;

            jail.create_file("hooksmith.toml", "[webhook]\nport = 3000\n")?;
            let config = load_from(jail, ConfigLoader::new().without_env().merge(base))?;
            assert_eq!(config.webhook.path, "/hooks");
            assert_eq!(config.webhook.port, 3000);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file() {
        Jail::expect_with(|jail| {
            jail.create_file("bot.toml", "[webhook]\nvalidation_token = \"t\"\n")?;
            let config = ConfigLoader::new()
                .file(jail.directory().join("bot.toml"))
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.webhook.validation_token, "t");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file() {
        let path = PathBuf::from("/definitely/not/here/hooksmith.toml");
        let result = ConfigLoader::new().file(&path).without_env().load();
        assert_eq!(result, Err(ConfigError::FileNotFound(path)));
    }

    #[test]
    fn test_unsupported_format() {
        Jail::expect_with(|jail| {
            jail.create_file("hooksmith.ini", "port = 1\n")?;
            let path = jail.directory().join("hooksmith.ini");
            let result = ConfigLoader::new().file(&path).without_env().load();
            assert_eq!(result, Err(ConfigError::UnsupportedFormat(path)));
            Ok(())
        });
    }

    #[test]
    fn test_profile_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("HOOKSMITH_PROFILE", "Production");
            assert_eq!(Profile::from_env(), Profile::Production);

            jail.set_env("HOOKSMITH_PROFILE", "staging");
            assert_eq!(Profile::from_env(), Profile::Custom("staging".to_string()));
            Ok(())
        });
    }

    #[test]
    fn test_profile_sibling_path() {
        let overlay = profile_sibling(Path::new("/etc/hooksmith/config.yaml"), &Profile::Production);
        assert_eq!(
            overlay,
            Some(PathBuf::from("/etc/hooksmith/config.production.yaml"))
        );
    }
}
