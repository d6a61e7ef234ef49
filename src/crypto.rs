use std::convert::TryInto;
use std::path::PathBuf;
use std::{env, fs};

const PASSWORD_SALT: &'static str = "password.salt";

pub type Salt = [u8; 16];

/// Process-wide hashing material. Password hashes are deterministic for a
/// given salt, so the salt is persisted in the security directory and reused
/// across restarts; otherwise stored credentials could never be verified
/// again.
#[derive(Debug, Clone)]
pub struct Crypto {
    pub salt: Salt,
}

#[inline]
fn security_dir() -> PathBuf {
    PathBuf::from(env::var("SECURITY_DIR").unwrap_or("./security".to_string()))
}

impl Crypto {
    pub fn init() -> Crypto {
        let dir = security_dir();

        fs::create_dir_all(dir.clone())
            .expect("unable to create directory for storing security information");

        tracing::info!("Loading password salt...");
        let mut salt: Option<Salt> = fs::read(dir.join(PASSWORD_SALT))
            .map(|s| s.try_into().ok())
            .ok()
            .flatten();

        match salt {
            None => {
                tracing::info!(
                    "Salt not found in '{}'. Generating a new password salt.",
                    dir.join(PASSWORD_SALT).display()
                );
                salt = Some(rand::random());

                fs::write(dir.join(PASSWORD_SALT), salt.unwrap()).expect("unable to write salt");
            }
            Some(_) => tracing::info!("Salt found and loaded."),
        }

        Crypto { salt: salt.unwrap() }
    }
}
