//! TOML manifests describing the desired set of local users.
//!
//! `apply` converges the system towards the manifest one user at a time:
//! look the name up, then run `useradd`/`userdel` only when the observed
//! state disagrees with the declared one.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Deserialize;
use thiserror::Error;

use crate::exec::{Commander, ExecError};
use crate::user::UserSpec;
use crate::user::lookup::{self, LookupError};

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse manifest {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub users: Vec<ManagedUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagedUser {
    pub name: String,
    #[serde(default)]
    pub shell: String,
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub gid: String,
    #[serde(default)]
    pub ensure: Ensure,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

impl ManagedUser {
    fn spec(&self) -> UserSpec {
        UserSpec {
            name: self.name.clone(),
            directory: self.directory.clone(),
            shell: self.shell.clone(),
            groups: self.groups.clone(),
            system: self.system,
            uid: self.uid.clone(),
            gid: self.gid.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Delete,
    Keep,
}

/// What has to happen for one user given whether the account exists.
pub fn plan(ensure: Ensure, exists: bool) -> Action {
    match (ensure, exists) {
        (Ensure::Present, false) => Action::Add,
        (Ensure::Absent, true) => Action::Delete,
        _ => Action::Keep,
    }
}

pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ManifestError::Read(path.to_path_buf(), e))?;
    toml::from_str(&content).map_err(|e| ManifestError::Parse(path.to_path_buf(), e))
}

/// Converge the system towards the manifest. Stops at the first error.
pub fn apply(manifest: &Manifest, commander: &mut dyn Commander) -> Result<(), ManifestError> {
    for user in &manifest.users {
        let exists = match lookup::lookup(&user.name) {
            Ok(_) => true,
            Err(LookupError::NotFound(_)) => false,
            Err(e) => return Err(e.into()),
        };

        match plan(user.ensure, exists) {
            Action::Add => {
                println!("{} user '{}'", "Creating".green(), user.name);
                user.spec().add(commander)?;
            }
            Action::Delete => {
                println!("{} user '{}'", "Removing".red(), user.name);
                user.spec().delete(commander)?;
            }
            Action::Keep => {
                println!("User '{}' already up to date", user.name);
            }
        }
    }

    Ok(())
}
