use serde::{Deserialize, Serialize};

use crate::context_path;
use crate::domain::{
    error::ValidationKind,
    report::Report,
    rules::{duplicate_indices, non_empty, validate_absolute_path},
    validation::{Validate, Walk, Walker},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Passwd {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

impl Validate for Passwd {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        for i in duplicate_indices(self.users.iter().map(|u| u.name.as_str())) {
            report.error(context_path!["users", i, "name"], ValidationKind::Duplicate);
        }
        for i in duplicate_indices(self.groups.iter().map(|g| g.name.as_str())) {
            report.error(context_path!["groups", i, "name"], ValidationKind::Duplicate);
        }
        report
    }
}

impl Walk for Passwd {
    fn walk(&self, walker: &mut Walker) {
        walker.list("users", &self.users);
        walker.list("groups", &self.groups);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_authorized_keys: Vec<String>,
}

impl Validate for User {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        if self.name.is_empty() {
            report.error("name", ValidationKind::UsernameRequired);
        }
        report.check(
            "homeDir",
            non_empty(&self.home_dir).map_or(Ok(()), validate_absolute_path),
        );
        report.check(
            "shell",
            non_empty(&self.shell).map_or(Ok(()), validate_absolute_path),
        );
        report
    }
}

impl Walk for User {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<i32>,
}

impl Validate for Group {
    fn validate(&self) -> Report {
        let mut report = Report::new();
        if self.name.is_empty() {
            report.error("name", ValidationKind::GroupnameRequired);
        }
        report
    }
}

impl Walk for Group {}
