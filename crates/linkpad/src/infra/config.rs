//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::FieldSeparator;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".linkpad/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub sort: Sort,
    #[serde(default)]
    pub cut: Cut,
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Defaults {
    #[serde(default)]
    separator: Option<FieldSeparator>,
    #[serde(default)]
    log_level: Option<String>,
}

impl Defaults {
    /// Separator used by `cut` when none is given on the command line.
    pub fn separator(&self) -> FieldSeparator {
        self.separator.clone().unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    pub fn set_log_level(&mut self, level: impl Into<String>) {
        self.log_level = Some(level.into());
    }
}

/// Line sorting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sort {
    #[serde(default)]
    drop_empty_lines: Option<bool>,
}

impl Sort {
    pub fn drop_empty_lines(&self) -> bool {
        self.drop_empty_lines.unwrap_or(false)
    }
}

/// Field cutting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cut {
    #[serde(default)]
    lenient: Option<bool>,
}

impl Cut {
    /// Whether a failed cut should hand back the original text instead of an error.
    pub fn lenient(&self) -> bool {
        self.lenient.unwrap_or(false)
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    separator: Option<String>,
    log_level: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            separator: env::var("LINKPAD_SEPARATOR").ok(),
            log_level: env::var("LINKPAD_LOG").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(separator: &str, log_level: &str) -> Self {
        Self {
            separator: Some(separator.to_owned()),
            log_level: Some(log_level.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    /// Load defaults plus a single explicit config file, still honoring env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_layers(None, Some(path.to_path_buf()), EnvOverrides::from_env())
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            sort: Sort {
                drop_empty_lines: other.sort.drop_empty_lines.or(self.sort.drop_empty_lines),
            },
            cut: Cut {
                lenient: other.cut.lenient.or(self.cut.lenient),
            },
        }
    }
}

fn merge_defaults(base: Defaults, overlay: Defaults) -> Defaults {
    Defaults {
        separator: overlay.separator.or(base.separator),
        log_level: overlay.log_level.or(base.log_level),
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("linkpad/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(separator) = env.separator.filter(|value| !value.is_empty()) {
        config.defaults.separator = Some(FieldSeparator::new(separator));
    }
    if let Some(log_level) = env.log_level {
        config.defaults.set_log_level(log_level);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.defaults.separator().as_str(), ",");
        assert_eq!(config.defaults.log_level(), "warn");
        assert!(!config.sort.drop_empty_lines());
        assert!(!config.cut.lenient());
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[defaults]
separator = ";"
[sort]
drop_empty_lines = true
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".linkpad"))?;
        fs::create_dir_all(workspace_dir.join(".git"))?;
        fs::write(
            workspace_dir.join(".linkpad/config.toml"),
            r#"
[defaults]
log_level = "debug"
[cut]
lenient = true
"#,
        )?;

        let global_path = Some(global);
        let workspace_path = Some(workspace_dir.join(".linkpad/config.toml"));

        let config =
            Config::load_with_layers(global_path, workspace_path, EnvOverrides::default())?;

        assert_eq!(config.defaults.separator().as_str(), ";");
        assert_eq!(config.defaults.log_level(), "debug");
        assert!(config.sort.drop_empty_lines());
        assert!(config.cut.lenient());

        Ok(())
    }

    #[test]
    fn workspace_can_switch_a_flag_back_off() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("global.toml");
        fs::write(&global, "[sort]\ndrop_empty_lines = true\n")?;
        let workspace = temp.path().join("workspace.toml");
        fs::write(&workspace, "[sort]\ndrop_empty_lines = false\n")?;

        let config =
            Config::load_with_layers(Some(global), Some(workspace), EnvOverrides::default())?;
        assert!(!config.sort.drop_empty_lines());
        Ok(())
    }

    #[test]
    fn workspace_can_restore_default_values() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("global.toml");
        fs::write(
            &global,
            "[defaults]\nseparator = \";\"\nlog_level = \"debug\"\n",
        )?;
        let workspace = temp.path().join("workspace.toml");
        fs::write(
            &workspace,
            "[defaults]\nseparator = \",\"\nlog_level = \"warn\"\n",
        )?;

        let config =
            Config::load_with_layers(Some(global), Some(workspace), EnvOverrides::default())?;
        assert_eq!(config.defaults.separator().as_str(), ",");
        assert_eq!(config.defaults.log_level(), "warn");
        Ok(())
    }

    #[test]
    fn unset_values_fall_through_to_earlier_layers() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("global.toml");
        fs::write(&global, "[defaults]\nseparator = \"|\"\n")?;
        let workspace = temp.path().join("workspace.toml");
        fs::write(&workspace, "[defaults]\nlog_level = \"info\"\n")?;

        let config =
            Config::load_with_layers(Some(global), Some(workspace), EnvOverrides::default())?;
        assert_eq!(config.defaults.separator().as_str(), "|");
        assert_eq!(config.defaults.log_level(), "info");
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("\t", "trace");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.defaults.separator().as_str(), "\t");
        assert_eq!(config.defaults.log_level(), "trace");
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn finds_repo_root_from_nested_directory() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().join("repo");
        let nested = root.join("src/deep");
        fs::create_dir_all(&nested)?;
        fs::create_dir_all(root.join(".git"))?;

        assert_eq!(find_repo_root(&nested), Some(root));
        Ok(())
    }
}
