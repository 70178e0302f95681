//! Primitive validators.
//!
//! Each rule checks one scalar and returns the finding it stands for.
//! Rules are pure; an empty string always counts as "unset" and passes
//! unless the rule is explicitly about presence.

use url::Url;

use super::error::ValidationKind;
use super::value_objects::FsFormat;

type RuleResult = Result<(), ValidationKind>;

pub const PATH_SEPARATOR: char = '/';

/// Schemes a remote resource may be fetched from.
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "tftp", "s3", "gs", "arn", "data"];

pub const SUPPORTED_COMPRESSION: &[&str] = &["gzip"];

pub const SYSTEMD_UNIT_TYPES: &[&str] = &[
    "service",
    "socket",
    "device",
    "mount",
    "automount",
    "swap",
    "target",
    "path",
    "timer",
    "snapshot",
    "slice",
    "scope",
];

pub const MAX_PARTITION_LABEL_LEN: usize = 36;

const MAX_MODE: i32 = 0o7777;
const SPECIAL_MODE_BITS: i32 = 0o7000;

/// `Some` when the optional string holds a non-empty value.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn validate_absolute_path(path: &str) -> RuleResult {
    if path.is_empty() || path.starts_with(PATH_SEPARATOR) {
        Ok(())
    } else {
        Err(ValidationKind::PathRelative)
    }
}

pub fn validate_label_length(format: FsFormat, label: &str) -> RuleResult {
    match format.label_limit() {
        Some((max, kind)) if label.len() > max => Err(kind),
        _ => Ok(()),
    }
}

pub fn validate_one_of(value: &str, allowed: &[&str], kind: ValidationKind) -> RuleResult {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(kind)
    }
}

/// `01234567-89AB-CDEF-EDCB-A98765432101`, any hex case.
pub fn validate_guid(guid: &str) -> RuleResult {
    let well_formed = guid.len() == 36
        && guid.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        });

    if well_formed {
        Ok(())
    } else {
        Err(ValidationKind::DoesntMatchGuid)
    }
}

pub fn validate_mode(mode: i32) -> RuleResult {
    if (0..=MAX_MODE).contains(&mode) {
        Ok(())
    } else {
        Err(ValidationKind::IllegalMode)
    }
}

pub fn validate_no_special_bits(mode: i32) -> RuleResult {
    if mode & SPECIAL_MODE_BITS == 0 {
        Ok(())
    } else {
        Err(ValidationKind::SpecialModeBits)
    }
}

pub fn validate_url(source: &str) -> RuleResult {
    let url = Url::parse(source).map_err(|_| ValidationKind::InvalidUrl)?;
    validate_one_of(url.scheme(), SUPPORTED_SCHEMES, ValidationKind::InvalidScheme)
}

/// `sha512-<128 hex>` or `sha256-<64 hex>`.
pub fn validate_hash(hash: &str) -> RuleResult {
    let (function, digest) = hash
        .split_once('-')
        .ok_or(ValidationKind::HashMalformed)?;

    let expected_len = match function {
        "sha512" => 128,
        "sha256" => 64,
        _ => return Err(ValidationKind::HashUnrecognized),
    };

    if digest.len() == expected_len && digest.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationKind::HashWrongSize)
    }
}

/// `MAJOR.MINOR.PATCH` with an optional `-tag`.
pub fn validate_version(version: &str) -> RuleResult {
    let core = version.split_once('-').map_or(version, |(core, _)| core);
    let parts: Vec<&str> = core.split('.').collect();

    let numeric = |p: &&str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    if parts.len() == 3 && parts.iter().all(numeric) {
        Ok(())
    } else {
        Err(ValidationKind::InvalidVersion)
    }
}

pub fn validate_unit_name(name: &str) -> RuleResult {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && SYSTEMD_UNIT_TYPES.contains(&ext) => Ok(()),
        _ => Err(ValidationKind::InvalidSystemdExt),
    }
}

pub fn validate_dropin_name(name: &str) -> RuleResult {
    match name.strip_suffix(".conf") {
        Some(stem) if !stem.is_empty() => Ok(()),
        _ => Err(ValidationKind::InvalidDropinExt),
    }
}

/// Minimal unit-file grammar: `[Section]` headers, `Key=Value` lines,
/// `#`/`;` comments and backslash continuations.
pub fn validate_unit_contents(contents: &str) -> RuleResult {
    let mut in_section = false;
    let mut continued = false;

    for raw in contents.lines() {
        let line = raw.trim();
        let was_continued = continued;
        continued = line.ends_with('\\');

        if was_continued || line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 3 {
                return Err(ValidationKind::InvalidUnitContents);
            }
            in_section = true;
            continue;
        }

        match line.split_once('=') {
            Some((key, _)) if in_section && !key.trim().is_empty() => {}
            _ => return Err(ValidationKind::InvalidUnitContents),
        }
    }

    Ok(())
}

/// Indices of entries whose key repeats an earlier entry's key.
///
/// Empty keys are skipped; they are reported by presence rules instead.
pub fn duplicate_indices<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<usize> {
    let mut seen = std::collections::HashSet::new();
    keys.into_iter()
        .enumerate()
        .filter(|(_, key)| !key.is_empty() && !seen.insert(*key))
        .map(|(i, _)| i)
        .collect()
}
