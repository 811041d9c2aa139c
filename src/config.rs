use crate::dispatch::CommandContext;
use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for git-push-mcp
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GitPushConfig {
    /// Request context applied when a caller sets nothing
    pub defaults: ContextDefaults,
    /// Git toolchain settings
    pub git: GitSettings,
    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContextDefaults {
    /// Stage modified and untracked files before committing
    pub auto_stage: bool,
    /// Push after every successful commit
    pub auto_push: bool,
    /// Prefix commit messages with a conventional type
    pub conventional_commits: bool,
    /// Number of entries returned by log queries
    pub log_limit: usize,
}

impl Default for ContextDefaults {
    fn default() -> Self {
        Self {
            auto_stage: true,
            auto_push: false,
            conventional_commits: true,
            log_limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GitSettings {
    /// Git executable name or path
    pub program: String,
    /// Remote used when a push names none
    pub default_remote: String,
    /// Directory to start repository discovery from (defaults to the process cwd)
    pub working_dir: Option<PathBuf>,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            default_remote: "origin".to_string(),
            working_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level, overridden by RUST_LOG or LOG_LEVEL
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl From<&ContextDefaults> for CommandContext {
    fn from(defaults: &ContextDefaults) -> Self {
        CommandContext {
            auto_stage: defaults.auto_stage,
            auto_push: defaults.auto_push,
            conventional_commits: defaults.conventional_commits,
            limit: defaults.log_limit,
            ..CommandContext::default()
        }
    }
}

impl GitPushConfig {
    pub const FILE_NAME: &'static str = "git-push-mcp.toml";
    pub const ENV_PREFIX: &'static str = "GIT_PUSH_MCP";

    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (git-push-mcp.toml)
    /// 3. Environment variables (GIT_PUSH_MCP_<SECTION>__<KEY>)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(Self::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut git_push_config: GitPushConfig = config.try_deserialize()?;

        // LOG_LEVEL is honored for compatibility with existing deployments
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            if !level.trim().is_empty() {
                git_push_config.logging.level = level;
            }
        }

        Ok(git_push_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load `.env` from the working directory if it exists.
    ///
    /// Runs before logging is set up, so callers log the returned path.
    pub fn load_env_file() -> Result<Option<PathBuf>> {
        Self::load_env_file_in(Path::new("."))
    }

    pub fn load_env_file_in(dir: &Path) -> Result<Option<PathBuf>> {
        let path = dir.join(".env");
        if !path.exists() {
            return Ok(None);
        }
        dotenvy::from_path(&path)?;
        Ok(Some(path))
    }

    /// Request context seeded from the configured defaults.
    pub fn context(&self) -> CommandContext {
        CommandContext::from(&self.defaults)
    }

    /// Where repository discovery starts.
    pub fn start_dir(&self) -> Result<PathBuf> {
        match &self.git.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}
