//! Lookup against the OS user database.

use std::path::PathBuf;

use nix::unistd::{self, User};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("user '{0}' not found")]
    NotFound(String),

    #[error("user database query failed: {0}")]
    Query(#[from] nix::Error),
}

/// A user as it exists in the OS user database. Always fetched fresh,
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
    pub home: PathBuf,
    pub shell: PathBuf,
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            uid: user.uid.as_raw(),
            gid: user.gid.as_raw(),
            home: user.dir,
            shell: user.shell,
        }
    }
}

pub fn lookup(name: &str) -> Result<UserRecord, LookupError> {
    User::from_name(name)?
        .map(UserRecord::from)
        .ok_or_else(|| LookupError::NotFound(name.to_string()))
}

/// Name of the user the current process runs as.
pub fn current_username() -> Result<String, LookupError> {
    let uid = unistd::geteuid();
    User::from_uid(uid)?
        .map(|user| user.name)
        .ok_or_else(|| LookupError::NotFound(format!("uid {uid}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_of_current_user_succeeds() {
        let name = current_username().unwrap();
        let record = lookup(&name).unwrap();
        assert_eq!(record.name, name);
    }

    #[test]
    fn lookup_of_missing_user_fails() {
        let err = lookup("invalid").unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }
}
