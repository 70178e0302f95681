// ============================================================================
// domain/value_objects.rs
// ============================================================================

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationKind;

// ============================================================================
// FsFormat
// ============================================================================

/// Filesystem formats a provisioning config may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FsFormat {
    Ext4,
    Btrfs,
    Xfs,
    Swap,
    Vfat,
    /// Explicitly leave the device unformatted.
    None,
}

impl FsFormat {
    pub const ALL: [FsFormat; 6] = [
        Self::Ext4,
        Self::Btrfs,
        Self::Xfs,
        Self::Swap,
        Self::Vfat,
        Self::None,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ext4 => "ext4",
            Self::Btrfs => "btrfs",
            Self::Xfs => "xfs",
            Self::Swap => "swap",
            Self::Vfat => "vfat",
            Self::None => "none",
        }
    }

    /// Maximum label length in bytes, and the finding raised past it.
    ///
    /// `None` carries no label limit.
    pub const fn label_limit(self) -> Option<(usize, ValidationKind)> {
        match self {
            Self::Ext4 => Some((16, ValidationKind::Ext4LabelTooLong)),
            Self::Btrfs => Some((256, ValidationKind::BtrfsLabelTooLong)),
            Self::Xfs => Some((12, ValidationKind::XfsLabelTooLong)),
            Self::Swap => Some((15, ValidationKind::SwapLabelTooLong)),
            Self::Vfat => Some((11, ValidationKind::VfatLabelTooLong)),
            Self::None => None,
        }
    }
}

impl FromStr for FsFormat {
    type Err = ValidationKind;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or(ValidationKind::FilesystemInvalidFormat)
    }
}

impl fmt::Display for FsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DocumentId
// ============================================================================

/// Identifies one configuration document handed to a source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(PathBuf);

impl DocumentId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Lower-cased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.0
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }
}

impl AsRef<Path> for DocumentId {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for DocumentId {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
