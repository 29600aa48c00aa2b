use crate::{env_or_default, ConfigError, FromEnv};
use std::path::PathBuf;

/// Configuration for the image asset store.
///
/// `dir` is where uploaded files land on disk; `public_prefix` is the URL
/// prefix under which the same files are served back to clients.
#[derive(Clone, Debug)]
pub struct UploadsConfig {
    pub dir: PathBuf,
    pub public_prefix: String,
}

impl FromEnv for UploadsConfig {
    /// Reads from environment variables with defaults:
    /// - UPLOADS_DIR: defaults to "uploads"
    /// - UPLOADS_PUBLIC_PREFIX: defaults to "/uploads"
    fn from_env() -> Result<Self, ConfigError> {
        let dir = PathBuf::from(env_or_default("UPLOADS_DIR", "uploads"));
        let public_prefix = env_or_default("UPLOADS_PUBLIC_PREFIX", "/uploads");
        Ok(Self { dir, public_prefix })
    }
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            public_prefix: "/uploads".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("UPLOADS_DIR", None::<&str>),
                ("UPLOADS_PUBLIC_PREFIX", None::<&str>),
            ],
            || {
                let config = UploadsConfig::from_env().unwrap();
                assert_eq!(config.dir, PathBuf::from("uploads"));
                assert_eq!(config.public_prefix, "/uploads");
            },
        );
    }

    #[test]
    fn from_env_with_custom_dir() {
        temp_env::with_var("UPLOADS_DIR", Some("/var/data/assets"), || {
            let config = UploadsConfig::from_env().unwrap();
            assert_eq!(config.dir, PathBuf::from("/var/data/assets"));
        });
    }
}
