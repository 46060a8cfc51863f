//! Credential protection: reversible password encryption, the strength
//! policy, and random password generation

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};

use crate::domain::DomainError;

const KEY_LENGTH: usize = 32;
const NONCE_SIZE: usize = 12;

/// Qualifying characters a password must exceed to pass the policy.
const MIN_QUALIFYING_CHARS: usize = 8;

const GENERATED_PASSWORD_LENGTH: usize = 23;

const DIGITS: &[u8] = b"0123456789";
const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const PUNCTUATION: &[u8] = b"!#$%&*+-=?@_";

/// Reversible protection applied to passwords at rest.
pub trait PasswordProtector: Send + Sync {
    /// Seal a plaintext password into a printable token.
    fn protect(&self, password: &str) -> Result<String, DomainError>;

    /// Recover the plaintext from a token produced by [`protect`].
    ///
    /// [`protect`]: PasswordProtector::protect
    fn unprotect(&self, token: &str) -> Result<String, DomainError>;
}

/// AES-256-GCM protector. The key is the SHA-256 digest of a passphrase;
/// every token carries its own random nonce as a prefix, so protecting the
/// same password twice yields different tokens.
pub struct AesGcmProtector {
    key: [u8; KEY_LENGTH],
}

impl AesGcmProtector {
    pub fn new(passphrase: &str) -> Self {
        Self {
            key: Sha256::digest(passphrase.as_bytes()).into(),
        }
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key))
    }
}

impl PasswordProtector for AesGcmProtector {
    fn protect(&self, password: &str) -> Result<String, DomainError> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher()
            .encrypt(nonce, password.as_bytes())
            .map_err(|_| DomainError::Internal)?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    // Callers never learn which step failed: a bad token, a foreign key and
    // tampered data all answer with the same opaque error.
    fn unprotect(&self, token: &str) -> Result<String, DomainError> {
        let sealed = STANDARD.decode(token).map_err(|_| DomainError::Internal)?;
        if sealed.len() < NONCE_SIZE {
            return Err(DomainError::Internal);
        }

        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| DomainError::Internal)?;

        String::from_utf8(plaintext).map_err(|_| DomainError::Internal)
    }
}

/// Password policy scan. Categories: number, uppercase, lowercase (a space
/// counts as lowercase), punctuation/symbol; every categorized character is
/// a qualifying one. Passing needs more than eight qualifying characters and
/// at least one of each category. Any miss yields the same fixed error.
pub fn verify_password_strength(password: &str) -> Result<(), DomainError> {
    let mut qualifying = 0;
    let (mut number, mut upper, mut lower, mut special) = (false, false, false, false);

    for c in password.chars() {
        if c.is_numeric() {
            number = true;
            qualifying += 1;
        } else if c.is_ascii_punctuation() {
            special = true;
            qualifying += 1;
        } else if c.is_uppercase() {
            upper = true;
            qualifying += 1;
        } else if c.is_lowercase() || c == ' ' {
            lower = true;
            qualifying += 1;
        }
    }

    if qualifying > MIN_QUALIFYING_CHARS && number && upper && lower && special {
        Ok(())
    } else {
        Err(DomainError::WeakPassword)
    }
}

/// Generate a password for administrative resets: fixed length, one
/// guaranteed digit draw, the rest from the mixed alphabet, shuffled, and
/// re-drawn until the strength policy accepts it.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    let all = [DIGITS, LETTERS, PUNCTUATION].concat();

    loop {
        let mut buf = Vec::with_capacity(GENERATED_PASSWORD_LENGTH);
        buf.push(DIGITS[rng.gen_range(0..DIGITS.len())]);
        for _ in 1..GENERATED_PASSWORD_LENGTH {
            buf.push(all[rng.gen_range(0..all.len())]);
        }
        buf.shuffle(&mut rng);

        let password: String = buf.iter().map(|&b| b as char).collect();
        if verify_password_strength(&password).is_ok() {
            return password;
        }
    }
}
