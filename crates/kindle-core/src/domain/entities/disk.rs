use serde::{Deserialize, Serialize};

use crate::context_path;
use crate::domain::{
    error::ValidationKind,
    report::{ContextPath, Report},
    rules::{
        MAX_PARTITION_LABEL_LEN, duplicate_indices, non_empty, validate_absolute_path,
        validate_guid,
    },
    validation::{Validate, Walk, Walker},
};

/// A block device and the partition table it should carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Disk {
    pub device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wipe_table: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<Partition>,
}

impl Disk {
    pub fn validate_device(&self) -> Result<(), ValidationKind> {
        if self.device.is_empty() {
            return Err(ValidationKind::DiskDeviceRequired);
        }
        validate_absolute_path(&self.device)
    }

    /// Partitions whose extent is fully known, as `(index, start, end)`.
    /// Ends past the addressable range clamp to `i64::MAX`.
    fn extents(&self) -> Vec<(usize, i64, i64)> {
        self.partitions
            .iter()
            .enumerate()
            .filter_map(|(i, p)| match (p.start_mib, p.size_mib) {
                (Some(start), Some(size)) if start >= 0 && size > 0 => {
                    Some((i, start, start.saturating_add(size)))
                }
                _ => None,
            })
            .collect()
    }
}

impl Validate for Disk {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check("device", self.validate_device());

        let numbers: Vec<String> = self
            .partitions
            .iter()
            .map(|p| if p.number == 0 { String::new() } else { p.number.to_string() })
            .collect();
        for i in duplicate_indices(numbers.iter().map(String::as_str)) {
            report.error(
                context_path!["partitions", i, "number"],
                ValidationKind::DuplicatePartitionNumber,
            );
        }

        // Zero-size partitions fill the remaining space; their end is unknown.
        let extents = self.extents();
        for (pos, &(i, start, end)) in extents.iter().enumerate() {
            let overlaps = extents[..pos]
                .iter()
                .any(|&(_, other_start, other_end)| start < other_end && other_start < end);
            if overlaps {
                report.error(context_path!["partitions", i], ValidationKind::PartitionsOverlap);
            }
        }

        report
    }
}

impl Walk for Disk {
    fn walk(&self, walker: &mut Walker) {
        walker.list("partitions", &self.partitions);
    }
}

/// One GPT partition entry.
///
/// `number == 0` means "unset / next free slot".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Partition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub number: i32,
    #[serde(rename = "sizeMiB", skip_serializing_if = "Option::is_none")]
    pub size_mib: Option<i64>,
    #[serde(rename = "startMiB", skip_serializing_if = "Option::is_none")]
    pub start_mib: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wipe_partition_entry: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_exist: Option<bool>,
}

impl Partition {
    pub fn validate_label(&self) -> Result<(), ValidationKind> {
        let Some(label) = self.label.as_deref() else {
            return Ok(());
        };
        if label.len() > MAX_PARTITION_LABEL_LEN {
            return Err(ValidationKind::PartitionLabelTooLong);
        }
        if label.contains(':') {
            return Err(ValidationKind::LabelContainsColon);
        }
        Ok(())
    }

    pub fn validate_type_guid(&self) -> Result<(), ValidationKind> {
        non_empty(&self.type_guid).map_or(Ok(()), validate_guid)
    }

    pub fn validate_guid(&self) -> Result<(), ValidationKind> {
        non_empty(&self.guid).map_or(Ok(()), validate_guid)
    }

    pub fn validate_sizes(&self) -> Result<(), ValidationKind> {
        let negative = |v: Option<i64>| v.is_some_and(|v| v < 0);
        if negative(self.size_mib) || negative(self.start_mib) {
            return Err(ValidationKind::NegativeSize);
        }
        Ok(())
    }

    /// A partition marked for deletion must be identifiable and must not
    /// describe what it should look like.
    pub fn validate_should_exist(&self) -> Result<(), ValidationKind> {
        if self.should_exist != Some(false) {
            return Ok(());
        }
        if self.number == 0 && non_empty(&self.label).is_none() {
            return Err(ValidationKind::NeedLabelOrNumber);
        }
        let describes_layout = self.size_mib.is_some()
            || self.start_mib.is_some()
            || non_empty(&self.type_guid).is_some()
            || non_empty(&self.guid).is_some()
            || self.wipe_partition_entry == Some(true);
        if describes_layout {
            return Err(ValidationKind::ShouldNotExistWithOthers);
        }
        Ok(())
    }
}

impl Validate for Partition {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check("label", self.validate_label());
        report.check("typeGuid", self.validate_type_guid());
        report.check("guid", self.validate_guid());
        report.check(ContextPath::root(), self.validate_sizes());
        report.check(ContextPath::root(), self.validate_should_exist());
        report
    }
}

impl Walk for Partition {}
