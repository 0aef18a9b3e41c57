//! Execution of external user management commands.
//!
//! Everything that would touch the OS goes through the [`Commander`] trait so
//! callers can be exercised against fakes that only record the argument list.

use std::process::Command;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs a full command line (program path followed by its arguments) and
/// remembers the last one it was asked to run.
pub trait Commander {
    fn run(&mut self, argv: &[String]) -> Result<(), ExecError>;

    /// The argument list of the most recent `run` call, if any.
    fn last_argv(&self) -> Option<&[String]>;
}

/// Production commander that spawns the real process.
#[derive(Debug, Default)]
pub struct SystemCommander {
    last: Option<Vec<String>>,
}

impl Commander for SystemCommander {
    fn run(&mut self, argv: &[String]) -> Result<(), ExecError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ExecError::CommandFailed("empty argument list".to_string()))?;

        self.last = Some(argv.to_vec());

        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExecError::CommandFailed(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    fn last_argv(&self) -> Option<&[String]> {
        self.last.as_deref()
    }
}

/// Prints what would run instead of running it.
#[derive(Debug, Default)]
pub struct DryRunCommander {
    last: Option<Vec<String>>,
}

impl Commander for DryRunCommander {
    fn run(&mut self, argv: &[String]) -> Result<(), ExecError> {
        println!("[DRY RUN] {}", argv.join(" "));
        self.last = Some(argv.to_vec());
        Ok(())
    }

    fn last_argv(&self) -> Option<&[String]> {
        self.last.as_deref()
    }
}
