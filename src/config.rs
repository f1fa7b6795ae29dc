use directories::ProjectDirs;
use eyre::eyre;
use eyre::Context;
use eyre::Result;
use serde::Deserialize;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_owned(),
            database: "insilico".to_owned(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// A JSON array of jobs to seed the job store with on startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs_path: Option<PathBuf>,
    pub mongodb: MongoConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            jobs_path: None,
            mongodb: MongoConfig::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories()?;
        let config_path = dirs.config_dir().join("config.toml");
        Ok(config_path)
    }

    /// Loads the config at `path`, falling back to defaults if the file does not exist
    pub async fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let toml = fs::read_to_string(path)
                .await
                .wrap_err_with(|| format!("Error reading config {}", path.display()))?;

            toml::from_str(&toml)
                .wrap_err_with(|| format!("Invalid config {}", path.display()))?
        } else {
            Config::default()
        };

        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, toml::to_string_pretty(self)?).await?;

        Ok(())
    }
}

pub fn directories() -> Result<ProjectDirs> {
    let dirs = ProjectDirs::from("", "", "insilico-server")
        .ok_or_else(|| eyre!("Unable to get application directories, is this OS supported?"))?;

    Ok(dirs)
}
