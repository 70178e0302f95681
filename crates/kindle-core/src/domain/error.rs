// ============================================================================
// domain/error.rs - CLOSED SET OF VALIDATION FINDINGS
// ============================================================================

use serde::Serialize;
use thiserror::Error;

/// Every finding the engine can produce.
///
/// Kinds are:
/// - Copyable (they travel inside report entries)
/// - Stable (the `code()` string is what tooling matches on)
/// - Severity-free (the entity validator decides Error vs Warning)
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    // ========================================================================
    // Document
    // ========================================================================
    #[error("config version is not a valid semantic version")]
    InvalidVersion,

    #[error("config version is not set")]
    VersionRequired,

    #[error("duplicate entry: another entry already uses this key")]
    Duplicate,

    // ========================================================================
    // Paths
    // ========================================================================
    #[error("path not absolute")]
    PathRelative,

    #[error("path not specified")]
    NoPath,

    // ========================================================================
    // Filesystems
    // ========================================================================
    #[error("filesystem device is required")]
    FilesystemDeviceRequired,

    #[error("filesystem format is not supported")]
    FilesystemInvalidFormat,

    #[error("format cannot be empty when path, label, mount options or wipe are set")]
    FormatNilWithOthers,

    #[error("filesystem labels cannot be longer than 16 characters when using ext4")]
    Ext4LabelTooLong,

    #[error("filesystem labels cannot be longer than 256 characters when using btrfs")]
    BtrfsLabelTooLong,

    #[error("filesystem labels cannot be longer than 12 characters when using xfs")]
    XfsLabelTooLong,

    #[error("filesystem labels cannot be longer than 15 characters when using swap")]
    SwapLabelTooLong,

    #[error("filesystem labels cannot be longer than 11 characters when using vfat")]
    VfatLabelTooLong,

    // ========================================================================
    // Disks and partitions
    // ========================================================================
    #[error("disk device is required")]
    DiskDeviceRequired,

    #[error("partition labels may not exceed 36 characters")]
    PartitionLabelTooLong,

    #[error("partition labels may not contain colons")]
    LabelContainsColon,

    #[error("value does not match the form \"01234567-89AB-CDEF-EDCB-A98765432101\"")]
    DoesntMatchGuid,

    #[error("a partition that should not exist needs a label or a number")]
    NeedLabelOrNumber,

    #[error("a partition that should not exist cannot specify other attributes")]
    ShouldNotExistWithOthers,

    #[error("partition size and start cannot be negative")]
    NegativeSize,

    #[error("partition overlaps with an earlier partition on the same disk")]
    PartitionsOverlap,

    #[error("partition number is already used on this disk")]
    DuplicatePartitionNumber,

    // ========================================================================
    // Files, directories and links
    // ========================================================================
    #[error("illegal file mode: must be between 0 and 07777")]
    IllegalMode,

    #[error("permissions unset, a default mode will be used")]
    PermissionsUnset,

    #[error("mode sets setuid, setgid or sticky bits")]
    SpecialModeBits,

    #[error("cannot set both id and name")]
    BothIdAndNameSet,

    #[error("unable to parse url")]
    InvalidUrl,

    #[error("invalid url scheme")]
    InvalidScheme,

    #[error("invalid compression method: only gzip is supported")]
    CompressionInvalid,

    #[error("malformed hash specifier: expected FUNCTION-DIGEST")]
    HashMalformed,

    #[error("unrecognized hash function")]
    HashUnrecognized,

    #[error("incorrect size or characters for hash digest")]
    HashWrongSize,

    #[error("link target is required")]
    LinkTargetRequired,

    // ========================================================================
    // Systemd
    // ========================================================================
    #[error("unit name is required")]
    UnitNameRequired,

    #[error("invalid systemd unit extension")]
    InvalidSystemdExt,

    #[error("dropin name is required")]
    DropinNameRequired,

    #[error("invalid systemd drop-in extension: must end in .conf")]
    InvalidDropinExt,

    #[error("invalid unit contents: expected [Section] headers and Key=Value lines")]
    InvalidUnitContents,

    #[error("unit is both enabled and masked; it will not start")]
    EnabledAndMasked,

    // ========================================================================
    // Users and groups
    // ========================================================================
    #[error("user name is required")]
    UsernameRequired,

    #[error("group name is required")]
    GroupnameRequired,
}

impl ValidationKind {
    /// Stable machine-readable identifier, identical to the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidVersion => "invalid_version",
            Self::VersionRequired => "version_required",
            Self::Duplicate => "duplicate",
            Self::PathRelative => "path_relative",
            Self::NoPath => "no_path",
            Self::FilesystemDeviceRequired => "filesystem_device_required",
            Self::FilesystemInvalidFormat => "filesystem_invalid_format",
            Self::FormatNilWithOthers => "format_nil_with_others",
            Self::Ext4LabelTooLong => "ext4_label_too_long",
            Self::BtrfsLabelTooLong => "btrfs_label_too_long",
            Self::XfsLabelTooLong => "xfs_label_too_long",
            Self::SwapLabelTooLong => "swap_label_too_long",
            Self::VfatLabelTooLong => "vfat_label_too_long",
            Self::DiskDeviceRequired => "disk_device_required",
            Self::PartitionLabelTooLong => "partition_label_too_long",
            Self::LabelContainsColon => "label_contains_colon",
            Self::DoesntMatchGuid => "doesnt_match_guid",
            Self::NeedLabelOrNumber => "need_label_or_number",
            Self::ShouldNotExistWithOthers => "should_not_exist_with_others",
            Self::NegativeSize => "negative_size",
            Self::PartitionsOverlap => "partitions_overlap",
            Self::DuplicatePartitionNumber => "duplicate_partition_number",
            Self::IllegalMode => "illegal_mode",
            Self::PermissionsUnset => "permissions_unset",
            Self::SpecialModeBits => "special_mode_bits",
            Self::BothIdAndNameSet => "both_id_and_name_set",
            Self::InvalidUrl => "invalid_url",
            Self::InvalidScheme => "invalid_scheme",
            Self::CompressionInvalid => "compression_invalid",
            Self::HashMalformed => "hash_malformed",
            Self::HashUnrecognized => "hash_unrecognized",
            Self::HashWrongSize => "hash_wrong_size",
            Self::LinkTargetRequired => "link_target_required",
            Self::UnitNameRequired => "unit_name_required",
            Self::InvalidSystemdExt => "invalid_systemd_ext",
            Self::DropinNameRequired => "dropin_name_required",
            Self::InvalidDropinExt => "invalid_dropin_ext",
            Self::InvalidUnitContents => "invalid_unit_contents",
            Self::EnabledAndMasked => "enabled_and_masked",
            Self::UsernameRequired => "username_required",
            Self::GroupnameRequired => "groupname_required",
        }
    }

    /// A short hint for the human-readable report, when one helps.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::FormatNilWithOthers => {
                Some("set `format` or remove path, label, mountOptions and wipeFilesystem")
            }
            Self::PathRelative => Some("paths must start with '/'"),
            Self::PermissionsUnset => Some("set `mode` explicitly, e.g. 420 (0644)"),
            Self::InvalidScheme => Some("supported schemes: http, https, tftp, s3, gs, arn, data"),
            Self::HashUnrecognized => Some("supported hash functions: sha256, sha512"),
            Self::InvalidSystemdExt => Some("unit names end in .service, .socket, .timer, ..."),
            Self::Duplicate => Some("each path, device and name may only be declared once"),
            _ => None,
        }
    }
}
