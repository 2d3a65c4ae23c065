use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use tracing::debug;
use url::Url;

use crate::env::{load_env_file, EnvMap, BASE_URL_VAR};

use super::{
    loader::LoadedConfig,
    settings::{ClientConfig, WorkflowOptions},
};

fn resolve_relative(base: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        base.join(value)
    }
}

/// Values taken from the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub target_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub record: bool,
    pub duration_seconds: Option<u32>,
    pub save: Option<bool>,
    pub download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub client: ClientConfig,
    pub workflow: WorkflowOptions,
    pub config_path: Option<PathBuf>,
    pub env_files: Vec<PathBuf>,
}

/// Layers defaults, `screech.json`, an env file and CLI flags, in that order.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    base_dir: PathBuf,
    config: Option<LoadedConfig>,
    explicit_env: Option<PathBuf>,
    overrides: CliOverrides,
}

impl ConfigBuilder {
    pub fn new(
        base_dir: PathBuf,
        config: Option<LoadedConfig>,
        explicit_env: Option<PathBuf>,
        overrides: CliOverrides,
    ) -> Self {
        Self {
            base_dir,
            config,
            explicit_env,
            overrides,
        }
    }

    pub fn build(&self) -> Result<ResolvedConfig> {
        let mut client = ClientConfig::default();
        let mut workflow = WorkflowOptions {
            download_dir: self.base_dir.join(WorkflowOptions::default().download_dir),
            ..WorkflowOptions::default()
        };
        let mut env: EnvMap = EnvMap::new();
        let mut env_files = Vec::new();

        if let Some(loaded) = &self.config {
            let file = &loaded.config;
            if let Some(base_url) = &file.base_url {
                client.base_url = base_url.clone();
            }
            if let Some(secs) = file.health_timeout_secs {
                client.health_timeout = Duration::from_secs(secs);
            }
            if let Some(secs) = file.capture_timeout_secs {
                client.capture_timeout = Duration::from_secs(secs);
            }
            if let Some(dir) = &file.download_dir {
                workflow.download_dir = resolve_relative(&loaded.dir, Path::new(dir));
            }
            if let Some(save) = file.save {
                workflow.save = save;
            }
            if let Some(viewport) = file.viewport {
                workflow.width = viewport.width;
                workflow.height = viewport.height;
            }
            if let Some(url) = &file.target_url {
                workflow.target_url = url.clone();
            }
            if let Some(secs) = file.recording_duration_secs {
                workflow.duration_seconds = secs;
            }
        }

        let env_path = match (&self.explicit_env, &self.config) {
            (Some(explicit), _) => Some(explicit.clone()),
            (None, Some(loaded)) => loaded
                .config
                .env
                .as_ref()
                .map(|env| resolve_relative(&loaded.dir, Path::new(env))),
            (None, None) => None,
        };

        if let Some(path) = env_path {
            env_files.push(load_env_file(&path, &mut env)?);
        }

        if let Some(base_url) = env.get(BASE_URL_VAR) {
            debug!(%base_url, "base URL taken from env file");
            client.base_url = base_url.clone();
        }

        let overrides = &self.overrides;
        if let Some(url) = &overrides.target_url {
            workflow.target_url = url.clone();
        }
        if let Some(width) = overrides.width {
            workflow.width = width;
        }
        if let Some(height) = overrides.height {
            workflow.height = height;
        }
        if let Some(secs) = overrides.duration_seconds {
            workflow.duration_seconds = secs;
        }
        if let Some(save) = overrides.save {
            workflow.save = save;
        }
        if let Some(dir) = &overrides.download_dir {
            workflow.download_dir = resolve_relative(&self.base_dir, dir);
        }
        workflow.record = overrides.record;

        Url::parse(&client.base_url)
            .with_context(|| format!("invalid capture service URL {}", client.base_url))?;

        Ok(ResolvedConfig {
            client,
            workflow,
            config_path: self.config.as_ref().map(|c| c.path.clone()),
            env_files,
        })
    }
}
