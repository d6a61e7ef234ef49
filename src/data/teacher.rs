use base64::Engine;
use bson::Document;
use crypto::bcrypt::bcrypt;
use sha2::{Digest, Sha256};

use crate::role::Role;
use crate::store::Collection;
use crate::util;

/// Opaque hashed credential: base64(bcrypt(sha256(plaintext))) under the
/// process salt. Deterministic for a given salt, so verification is equality
/// of recomputed hashes. Plaintext never reaches the store.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(password: impl AsRef<str>) -> PasswordHash {
        let mut pw_hash: [u8; 24] = [0; 24];

        let mut sha = Sha256::new();
        sha2::Digest::update(&mut sha, password.as_ref().as_bytes());

        bcrypt(
            10,
            &crate::CRYPTO.salt,
            sha.finalize().as_slice(),
            &mut pw_hash,
        );

        PasswordHash(util::base64_engine().encode(pw_hash))
    }

    pub fn verify(&self, password: impl AsRef<str>) -> bool {
        self == &PasswordHash::new(password)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A teacher (or admin) account. The username doubles as the document
/// identifier and is also kept inside the body, matching what account reads
/// hand back to the session layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherAccount {
    pub username: String,
    pub display_name: String,
    pub password: PasswordHash,
    pub role: Role,
}

impl TeacherAccount {
    pub fn new(
        username: impl ToString,
        display_name: impl ToString,
        password: impl AsRef<str>,
        role: Role,
    ) -> TeacherAccount {
        TeacherAccount {
            username: username.to_string(),
            display_name: display_name.to_string(),
            password: PasswordHash::new(password),
            role,
        }
    }

    pub fn from_document(doc: Document) -> Result<TeacherAccount, bson::de::Error> {
        bson::from_document(doc)
    }
}

/// Point lookup by username plus hash comparison. `None` covers both an
/// unknown username and a wrong password, so callers can't distinguish the
/// two.
pub fn authenticate(
    accounts: &Collection,
    username: &str,
    password: &str,
) -> Option<TeacherAccount> {
    let account = accounts
        .find_one(username)
        .and_then(|doc| TeacherAccount::from_document(doc).ok())?;

    if account.password.verify(password) {
        Some(account)
    } else {
        tracing::debug!("failed login attempt for '{}'", username);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic_and_password_sensitive() {
        let hash = PasswordHash::new("chess456");
        assert_eq!(hash, PasswordHash::new("chess456"));
        assert_ne!(hash, PasswordHash::new("chess457"));

        assert!(hash.verify("chess456"));
        assert!(!hash.verify("art123"));
    }

    #[test]
    fn account_documents_store_the_hash_not_the_plaintext() {
        let account = TeacherAccount::new("mchen", "Mr. Chen", "chess456", Role::Teacher);
        let doc = bson::to_document(&account).unwrap();

        let stored = doc.get_str("password").unwrap();
        assert_ne!(stored, "chess456");
        assert_eq!(stored, account.password.as_str());
        assert_eq!(doc.get_str("role").unwrap(), "teacher");
    }

    #[test]
    fn authenticate_rejects_unknown_users_and_bad_passwords() {
        let mut accounts = Collection::new("teachers");
        let account = TeacherAccount::new("mchen", "Mr. Chen", "chess456", Role::Teacher);
        accounts.insert_one(account.username.clone(), bson::to_document(&account).unwrap());

        let found = authenticate(&accounts, "mchen", "chess456").expect("valid credentials");
        assert_eq!(found, account);

        assert!(authenticate(&accounts, "mchen", "wrong").is_none());
        assert!(authenticate(&accounts, "nobody", "chess456").is_none());
    }
}
