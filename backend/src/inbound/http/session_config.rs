//! Session cookie settings.
//!
//! Turns the `session_*` and `cookie_secure` configuration values into the
//! signing key and cookie flags used by the session middleware.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use tracing::{info, warn};
use zeroize::Zeroize;

pub mod fingerprint;

use fingerprint::key_fingerprint;

/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to a temporary key when none is configured.
    Debug,
    /// Release builds require a key file unless ephemeral keys are allowed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session options as read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub key_file: Option<PathBuf>,
    pub cookie_secure: bool,
    pub allow_ephemeral: bool,
}

/// Validated settings for the session middleware.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// No key file configured and ephemeral keys are not allowed.
    #[error("session_key_file is required unless session_allow_ephemeral is set")]
    MissingKeyFile,
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Validate session options for the given build mode.
///
/// # Examples
///
/// ```rust
/// use foodgram::inbound::http::session_config::{BuildMode, SessionOptions, session_settings};
///
/// let options = SessionOptions {
///     key_file: None,
///     cookie_secure: false,
///     allow_ephemeral: true,
/// };
/// let settings = session_settings(&options, BuildMode::Release).expect("ephemeral key");
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings(
    options: &SessionOptions,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let key = session_key(options, mode)?;
    info!(fingerprint = %key_fingerprint(&key), "session key loaded");
    if !options.cookie_secure {
        warn!("session cookies are not marked Secure");
    }
    let same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    Ok(SessionSettings {
        key,
        cookie_secure: options.cookie_secure,
        same_site,
    })
}

fn session_key(options: &SessionOptions, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let may_generate = mode.is_debug() || options.allow_ephemeral;
    match options.key_file.as_deref() {
        Some(path) => match read_key(path, mode) {
            Err(SessionConfigError::KeyRead { path, source }) if may_generate => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            }
            other => other,
        },
        None if may_generate => {
            warn!("no session key file configured; using temporary session key (dev only)");
            Ok(Key::generate())
        }
        None => Err(SessionConfigError::MissingKeyFile),
    }
}

fn read_key(path: &Path, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let mut bytes = std::fs::read(path).map_err(|source| SessionConfigError::KeyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let length = bytes.len();
    if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
        bytes.zeroize();
        return Err(SessionConfigError::KeyTooShort {
            path: path.to_path_buf(),
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}
