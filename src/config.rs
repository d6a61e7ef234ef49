use crate::error::ConfigurationError;
use crate::util;
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn default_admin_usernames() -> Vec<String> {
    match env::var("ADMIN_USERNAMES") {
        Ok(names) => names.split(',').map(|n| n.trim().to_string()).collect(),
        Err(_) => vec![String::from("principal")],
    }
}

fn default_seed_on_startup() -> bool {
    env::var("SEED_ON_STARTUP")
        .map(|v| v != "0" && v.to_lowercase() != "false")
        .unwrap_or(true)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    file_path: PathBuf,

    /// Seed accounts with one of these usernames are granted the admin role.
    #[serde(default = "default_admin_usernames")]
    pub admin_usernames: Vec<String>,

    /// Whether `create()` populates empty collections with the baseline
    /// dataset. Seeding is idempotent either way.
    #[serde(default = "default_seed_on_startup")]
    pub seed_on_startup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: config_dir().join("settings.yml"),
            admin_usernames: default_admin_usernames(),
            seed_on_startup: default_seed_on_startup(),
        }
    }
}

#[inline]
fn config_dir() -> PathBuf {
    PathBuf::from(env::var("CONFIG_DIR").unwrap_or("./config".to_string()))
}

impl Config {
    pub fn load() -> Result<Config, ConfigurationError> {
        let config_file = util::find_first_subpath(
            config_dir(),
            &["settings.yml", "settings.yaml"],
            Path::exists,
        )
        .ok_or_else(|| ConfigurationError::NotFound(config_dir()))?;

        let file = File::open(config_file)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigurationError> {
        let file = File::create(&self.file_path)?;
        let mut out = BufWriter::new(file);
        serde_yaml::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }
}
