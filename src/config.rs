use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use mdtrain::extract::DEFAULT_HEADING_PREFIX;
use mdtrain::store::{DEFAULT_PROGRAM, DEFAULT_SAVE_FLAG};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub dataset: DatasetConfig,
    pub extract: ExtractConfig,
    pub normalize: NormalizeConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("markdown_finetune_dataset.jsonl"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub document: PathBuf,
    pub heading_prefix: String,
    pub manual_examples: Option<PathBuf>,
    pub include_builtin_examples: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("MARKDOWN_TRAINING_DATA.md"),
            heading_prefix: DEFAULT_HEADING_PREFIX.to_string(),
            manual_examples: None,
            include_builtin_examples: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub keyword: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            keyword: "Markdown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub executable: Option<PathBuf>,
    pub program: String,
    pub save_flag: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            executable: None,
            program: DEFAULT_PROGRAM.to_string(),
            save_flag: DEFAULT_SAVE_FLAG.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            dataset: DatasetConfig::default(),
            extract: ExtractConfig::default(),
            normalize: NormalizeConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl Config {
    /// Load from an explicit path, the user config dir, or the working directory, else defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let file_name = format!("{}.yml", project_name);
        let candidates = dirs::config_dir()
            .map(|dir| dir.join(project_name).join(&file_name))
            .into_iter()
            .chain([PathBuf::from(&file_name)]);

        for candidate in candidates.filter(|path| path.exists()) {
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("Failed to load config from {}: {}", candidate.display(), e),
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
