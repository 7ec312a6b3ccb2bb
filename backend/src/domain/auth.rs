//! Authentication primitives: login credentials, passwords and their hashes.
//!
//! Plaintext passwords only ever live inside [`Zeroizing`] buffers. Stored
//! hashes are Argon2id PHC strings.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};
use zeroize::Zeroizing;

/// Minimum length of a new password, in characters.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when login or password inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// E-mail was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// New password is shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
    /// New password consists only of digits.
    PasswordEntirelyNumeric,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordEntirelyNumeric => write!(f, "password must not be entirely numeric"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use foodgram::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "hunter22").expect("valid");
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// E-mail used for the user lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// A new password that satisfies the strength rules.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a new password.
    pub fn new(raw: &str) -> Result<Self, LoginValidationError> {
        if raw.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        if raw.chars().count() < PASSWORD_MIN {
            return Err(LoginValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(LoginValidationError::PasswordEntirelyNumeric);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext, for hashing only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Failure to produce or parse a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Argon2id hash in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn generate(password: &Password) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })
    }

    /// Wrap a PHC string read back from storage.
    pub fn from_phc(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check `candidate` against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, candidate: &str) -> bool {
        match PhcString::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                tracing::warn!(%error, "stored password hash is malformed");
                false
            }
        }
    }

    /// PHC string for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
