use serde::{Deserialize, Serialize};

use crate::context_path;
use crate::domain::{
    error::ValidationKind,
    report::Report,
    rules::{
        duplicate_indices, non_empty, validate_dropin_name, validate_unit_contents,
        validate_unit_name,
    },
    validation::{Validate, Walk, Walker},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Systemd {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
}

impl Validate for Systemd {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        for i in duplicate_indices(self.units.iter().map(|u| u.name.as_str())) {
            report.error(context_path!["units", i, "name"], ValidationKind::Duplicate);
        }
        report
    }
}

impl Walk for Systemd {
    fn walk(&self, walker: &mut Walker) {
        walker.list("units", &self.units);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropins: Vec<Dropin>,
}

impl Unit {
    pub fn validate_name(&self) -> Result<(), ValidationKind> {
        if self.name.is_empty() {
            return Err(ValidationKind::UnitNameRequired);
        }
        validate_unit_name(&self.name)
    }

    pub fn validate_contents(&self) -> Result<(), ValidationKind> {
        non_empty(&self.contents).map_or(Ok(()), validate_unit_contents)
    }

    pub fn validate_mask(&self) -> Result<(), ValidationKind> {
        if self.enabled == Some(true) && self.mask == Some(true) {
            Err(ValidationKind::EnabledAndMasked)
        } else {
            Ok(())
        }
    }
}

impl Validate for Unit {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check("name", self.validate_name());
        report.check("contents", self.validate_contents());
        report.advise("mask", self.validate_mask());
        for i in duplicate_indices(self.dropins.iter().map(|d| d.name.as_str())) {
            report.error(context_path!["dropins", i, "name"], ValidationKind::Duplicate);
        }
        report
    }
}

impl Walk for Unit {
    fn walk(&self, walker: &mut Walker) {
        walker.list("dropins", &self.dropins);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dropin {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

impl Dropin {
    pub fn validate_name(&self) -> Result<(), ValidationKind> {
        if self.name.is_empty() {
            return Err(ValidationKind::DropinNameRequired);
        }
        validate_dropin_name(&self.name)
    }

    pub fn validate_contents(&self) -> Result<(), ValidationKind> {
        non_empty(&self.contents).map_or(Ok(()), validate_unit_contents)
    }
}

impl Validate for Dropin {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        report.check("name", self.validate_name());
        report.check("contents", self.validate_contents());
        report
    }
}

impl Walk for Dropin {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::Severity;
    use crate::domain::validation::validate_config;

    fn unit(name: &str) -> Unit {
        Unit {
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn unit_names() {
        assert_eq!(unit("").validate_name(), Err(ValidationKind::UnitNameRequired));
        assert_eq!(unit("docker").validate_name(), Err(ValidationKind::InvalidSystemdExt));
        assert_eq!(unit("docker.service").validate_name(), Ok(()));
    }

    #[test]
    fn enabled_and_masked_is_a_warning() {
        let u = Unit {
            enabled: Some(true),
            mask: Some(true),
            ..unit("getty.target")
        };
        let report = u.validate();
        assert_eq!(report.kinds(), vec![ValidationKind::EnabledAndMasked]);
        assert_eq!(report.entries()[0].severity, Severity::Warning);
    }

    #[test]
    fn dropin_findings_are_nested_under_the_unit() {
        let systemd = Systemd {
            units: vec![Unit {
                dropins: vec![
                    Dropin { name: "10-env".into(), contents: None },
                    Dropin { name: "20-x.conf".into(), contents: Some("Key=1".into()) },
                ],
                ..unit("app.service")
            }],
        };

        let report = validate_config(&systemd);
        let found: Vec<(String, ValidationKind)> = report
            .iter()
            .map(|e| (e.path.to_string(), e.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                ("$.units.0.dropins.0.name".to_string(), ValidationKind::InvalidDropinExt),
                ("$.units.0.dropins.1.contents".to_string(), ValidationKind::InvalidUnitContents),
            ]
        );
    }

    #[test]
    fn duplicate_unit_names() {
        let systemd = Systemd {
            units: vec![unit("a.service"), unit("b.service"), unit("a.service")],
        };
        let report = systemd.validate();
        assert_eq!(report.kinds(), vec![ValidationKind::Duplicate]);
        assert_eq!(report.entries()[0].path, context_path!["units", 2, "name"]);
    }
}
