#[macro_use]
extern crate serde;
#[macro_use]
extern crate lazy_static;

use std::ops::Deref;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::crypto::Crypto;
use crate::error::{BackendError, ConfigurationError};
use crate::store::Collection;

pub mod config;
pub mod crypto;
pub mod data;
pub mod error;
pub mod query;
pub mod role;
pub mod seed;
pub mod store;
pub mod util;

lazy_static! {
    pub static ref CRYPTO: Crypto = Crypto::init();
}

/// Owner of the two application collections. The application layer holds one
/// of these and threads it through explicitly; there is no module-level
/// storage.
#[derive(Debug, Clone)]
pub struct Backend {
    pub config: Config,
    pub activities: Collection,
    pub teachers: Collection,
}

impl Backend {
    pub fn new(config: Config) -> Backend {
        Backend {
            config,
            activities: Collection::new(data::ACTIVITY_COLLECTION_NAME),
            teachers: Collection::new(data::TEACHER_COLLECTION_NAME),
        }
    }
}

pub fn create(log_level: Option<Level>) -> Result<Backend, BackendError> {
    if let Some(l) = log_level {
        let subscriber = FmtSubscriber::builder().with_max_level(l).finish();

        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Unable to set global logger: {}", err);
        };
    }

    tracing::info!("Reading .env file...");
    if dotenv::dotenv().is_err() {
        tracing::warn!("Unable to load .env file.");
    }

    tracing::info!("Loading configuration...");
    let c = match Config::load() {
        Ok(c) => {
            tracing::info!("Configuration loaded.");
            c
        }
        Err(ConfigurationError::NotFound(_)) => {
            let c = Config::default();
            if c.save().is_err() {
                tracing::warn!("Unable to save generated configuration.");
            }
            c
        }
        Err(other) => {
            tracing::error!("Configuration error: {}", other);
            return Err(other.into());
        }
    };

    tracing::info!("Initializing cryptography information...");
    let _ = CRYPTO.deref();

    let mut backend = Backend::new(c);

    if backend.config.seed_on_startup {
        tracing::info!("Populating empty collections with baseline data...");
        seed::init(&mut backend)?;
    }

    Ok(backend)
}
