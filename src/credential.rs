//! Account credentials and the password digest the vendor expects.

use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};

/// Drivvo account credentials.
///
/// The password stays wrapped in a [`SecretString`]; only its digest is
/// ever sent over the wire.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Digest of the password in the form the login endpoint accepts.
    pub fn password_digest(&self) -> String {
        hash_password(self.password.expose_secret())
    }
}

/// Lowercase hex MD5 of `password`. Always 32 characters.
pub fn hash_password(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}
