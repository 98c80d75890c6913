//! Configure the behavior of a [`Navigator`].
//!
//! [`Navigator`]: crate::Navigator
use crate::core::LayoutDirection;

use std::path::Path;
use std::time::Duration;

/// The configuration of a [`Navigator`].
///
/// With the `serde` feature, a configuration can be loaded from a RON file.
/// Delays are written in milliseconds and missing fields keep their default:
///
/// ```text
/// (
///     direction: Rtl,
///     collision_delay: 20,
/// )
/// ```
///
/// [`Navigator`]: crate::Navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// The reading direction of the menus.
    pub direction: LayoutDirection,

    /// The delay before the first item of a freshly expanded branch is
    /// focused.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub focus_delay: Duration,

    /// The delay before an expanded submenu is checked for collisions, so
    /// that its layout has settled.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub collision_delay: Duration,

    /// The delay before checking whether focus got lost after a blur.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub focus_check_delay: Duration,

    /// The delay before closing a previously active transient menu when
    /// focus moves to another menu.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub close_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::Ltr,
            focus_delay: Duration::ZERO,
            collision_delay: Duration::from_millis(50),
            focus_check_delay: Duration::from_millis(100),
            close_delay: Duration::from_millis(10),
        }
    }
}

impl Config {
    /// Parses a [`Config`] from RON.
    #[cfg(feature = "serde")]
    pub fn from_ron(content: &str) -> Result<Self, LoadError> {
        ron::from_str(content).map_err(|error| LoadError::Parse(error.to_string()))
    }

    /// Loads a [`Config`] from a file.
    ///
    /// Supports the RON format (`.ron` extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();

        match extension {
            "ron" => load_ron(path),
            _ => Err(LoadError::UnsupportedFormat(extension.to_owned())),
        }
    }
}

#[cfg(feature = "serde")]
fn load_ron(path: &Path) -> Result<Config, LoadError> {
    let content = std::fs::read_to_string(path)?;

    Config::from_ron(&content)
}

#[cfg(not(feature = "serde"))]
fn load_ron(_path: &Path) -> Result<Config, LoadError> {
    Err(LoadError::UnsupportedFormat(
        "RON loading requires the `serde` feature".to_owned(),
    ))
}

/// An error produced while loading a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The file format is not supported.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(feature = "serde")]
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
