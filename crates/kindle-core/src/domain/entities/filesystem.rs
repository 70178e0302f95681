use serde::{Deserialize, Serialize};

use crate::domain::{
    error::ValidationKind,
    report::Report,
    rules::{non_empty, validate_absolute_path, validate_label_length},
    validation::{Validate, Walk},
    value_objects::FsFormat,
};

/// A filesystem to create (or reuse) on a block device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filesystem {
    pub device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wipe_filesystem: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mount_options: Vec<String>,
}

impl Filesystem {
    pub fn validate_device(&self) -> Result<(), ValidationKind> {
        if self.device.is_empty() {
            return Err(ValidationKind::FilesystemDeviceRequired);
        }
        validate_absolute_path(&self.device)
    }

    /// An unformatted filesystem cannot carry a mount path, label, mount
    /// options or a wipe request.
    pub fn validate_format(&self) -> Result<(), ValidationKind> {
        if non_empty(&self.format).is_none() && self.has_format_dependents() {
            return Err(ValidationKind::FormatNilWithOthers);
        }
        Ok(())
    }

    pub fn validate_format_supported(&self) -> Result<(), ValidationKind> {
        match non_empty(&self.format) {
            Some(format) => format.parse::<FsFormat>().map(drop),
            None => Ok(()),
        }
    }

    pub fn validate_path(&self) -> Result<(), ValidationKind> {
        non_empty(&self.path).map_or(Ok(()), validate_absolute_path)
    }

    /// Length limits depend on the format. Unknown or unset formats get no
    /// length check at all.
    pub fn validate_label(&self) -> Result<(), ValidationKind> {
        let Some(label) = self.label.as_deref() else {
            return Ok(());
        };
        match self.format.as_deref().map(str::parse::<FsFormat>) {
            Some(Ok(format)) => validate_label_length(format, label),
            _ => Ok(()),
        }
    }

    fn has_format_dependents(&self) -> bool {
        non_empty(&self.path).is_some()
            || non_empty(&self.label).is_some()
            || !self.mount_options.is_empty()
            || self.wipe_filesystem == Some(true)
    }
}

impl Validate for Filesystem {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check("device", self.validate_device());
        report.check("format", self.validate_format());
        report.check("format", self.validate_format_supported());
        report.check("path", self.validate_path());
        report.check("label", self.validate_label());
        report
    }
}

impl Walk for Filesystem {}
