//! Declarative user specs and their translation into shadow-utils commands.

pub mod lookup;

use crate::exec::{Commander, ExecError};

pub const USERADD: &str = "/usr/sbin/useradd";
pub const USERDEL: &str = "/usr/sbin/userdel";

/// Desired state of a local user account. Empty optional fields are omitted
/// from the generated command line rather than passed as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSpec {
    pub name: String,
    pub directory: String,
    pub shell: String,
    pub groups: Vec<String>,
    pub system: bool,
    pub uid: String,
    pub gid: String,
}

impl UserSpec {
    fn home_directory(&self) -> String {
        if self.directory.is_empty() {
            format!("/home/{}", self.name)
        } else {
            self.directory.clone()
        }
    }

    /// The exact `useradd` invocation for this spec. Flag order is a
    /// compatibility contract; downstream tooling asserts on it.
    pub fn add_argv(&self) -> Vec<String> {
        let mut argv = vec![
            USERADD.to_string(),
            "-s".to_string(),
            self.shell.clone(),
            "-m".to_string(),
            "-d".to_string(),
            self.home_directory(),
        ];
        if !self.groups.is_empty() {
            argv.push("-G".to_string());
            argv.push(self.groups.join(","));
        }
        if self.system {
            argv.push("-r".to_string());
        }
        if !self.uid.is_empty() {
            argv.push("-u".to_string());
            argv.push(self.uid.clone());
        }
        if !self.gid.is_empty() {
            argv.push("-g".to_string());
            argv.push(self.gid.clone());
        }
        argv.push(self.name.clone());
        argv
    }

    pub fn delete_argv(&self) -> Vec<String> {
        vec![USERDEL.to_string(), self.name.clone()]
    }

    /// Create the account. Whatever the commander reports is surfaced
    /// unchanged; there is no local validation or retry.
    pub fn add(&self, commander: &mut dyn Commander) -> Result<(), ExecError> {
        commander.run(&self.add_argv())
    }

    /// Remove the account.
    pub fn delete(&self, commander: &mut dyn Commander) -> Result<(), ExecError> {
        commander.run(&self.delete_argv())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{FailingCommander, FakeCommander};

    fn all_fields() -> UserSpec {
        UserSpec {
            name: "fake-name".to_string(),
            directory: "fake-dir".to_string(),
            shell: "fake-shell".to_string(),
            groups: vec!["foo".to_string(), "bar".to_string()],
            system: true,
            uid: "1099".to_string(),
            gid: "1099".to_string(),
        }
    }

    #[test]
    fn add_with_all_fields() {
        let mut commander = FakeCommander::default();
        all_fields().add(&mut commander).unwrap();

        let want: Vec<String> = [
            "/usr/sbin/useradd",
            "-s",
            "fake-shell",
            "-m",
            "-d",
            "fake-dir",
            "-G",
            "foo,bar",
            "-r",
            "-u",
            "1099",
            "-g",
            "1099",
            "fake-name",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(commander.last_argv(), Some(want.as_slice()));
    }

    #[test]
    fn add_without_optional_fields() {
        let spec = UserSpec {
            name: "fake-name".to_string(),
            shell: "fake-shell".to_string(),
            ..Default::default()
        };

        let mut commander = FakeCommander::default();
        spec.add(&mut commander).unwrap();

        let want: Vec<String> = [
            "/usr/sbin/useradd",
            "-s",
            "fake-shell",
            "-m",
            "-d",
            "/home/fake-name",
            "fake-name",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(commander.last_argv(), Some(want.as_slice()));
    }

    #[test]
    fn add_propagates_commander_failure() {
        let spec = UserSpec {
            name: "fake-name".to_string(),
            shell: "fake-shell".to_string(),
            ..Default::default()
        };

        let mut commander = FailingCommander;
        assert!(spec.add(&mut commander).is_err());
        assert_eq!(commander.last_argv(), None);
    }

    #[test]
    fn name_is_always_the_trailing_argument() {
        for spec in [all_fields(), UserSpec {
            name: "tail".to_string(),
            shell: "/bin/sh".to_string(),
            ..Default::default()
        }] {
            let argv = spec.add_argv();
            assert_eq!(argv.last(), Some(&spec.name));
        }
    }

    #[test]
    fn delete_emits_minimal_argv() {
        let spec = UserSpec {
            name: "fake-user".to_string(),
            ..Default::default()
        };

        let mut commander = FakeCommander::default();
        spec.delete(&mut commander).unwrap();

        let want = vec!["/usr/sbin/userdel".to_string(), "fake-user".to_string()];
        assert_eq!(commander.last_argv(), Some(want.as_slice()));
    }

    #[test]
    fn delete_propagates_commander_failure() {
        let spec = UserSpec {
            name: "fake-name".to_string(),
            ..Default::default()
        };

        let mut commander = FailingCommander;
        assert!(spec.delete(&mut commander).is_err());
        assert_eq!(commander.last_argv(), None);
    }
}
