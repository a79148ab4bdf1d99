use crate::error::DashboardResult;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `INFLUENCER_DASHBOARD__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Location of the four input datasets.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_influencers_file")]
    pub influencers_file: String,
    #[serde(default = "default_posts_file")]
    pub posts_file: String,
    #[serde(default = "default_tracking_file")]
    pub tracking_file: String,
    #[serde(default = "default_payouts_file")]
    pub payouts_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_title() -> String {
    "HealthKart Influencer Campaign Dashboard".to_string()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_influencers_file() -> String {
    "influencers.csv".to_string()
}
fn default_posts_file() -> String {
    "posts.csv".to_string()
}
fn default_tracking_file() -> String {
    "tracking_data.csv".to_string()
}
fn default_payouts_file() -> String {
    "payouts.csv".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8501
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}

impl DataConfig {
    pub fn influencers_path(&self) -> PathBuf {
        self.dir.join(&self.influencers_file)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.dir.join(&self.posts_file)
    }

    pub fn tracking_path(&self) -> PathBuf {
        self.dir.join(&self.tracking_file)
    }

    pub fn payouts_path(&self) -> PathBuf {
        self.dir.join(&self.payouts_file)
    }

    /// Same file names, rooted at another directory.
    pub fn with_dir(&self, dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..self.clone()
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            influencers_file: default_influencers_file(),
            posts_file: default_posts_file(),
            tracking_file: default_tracking_file(),
            payouts_file: default_payouts_file(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            data: DataConfig::default(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then environment
    /// variables (which take precedence).
    pub fn load(file: Option<&Path>) -> DashboardResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("INFLUENCER_DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
