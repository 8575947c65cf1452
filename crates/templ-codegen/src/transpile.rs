//! Transpilation of CSS supersets into plain CSS.
//!
//! The transpiler itself is external: [`SassCli`] drives the `sass` binary
//! as a child process. Starting it is expensive, so the pipeline holds it
//! behind a [`LazyTranspiler`]: an explicit single-flight handle that
//! initializes on first use. The first caller runs the factory while
//! concurrent callers block, and every caller afterwards observes the same
//! transpiler or the same initialization error. Handing the pipeline a
//! different factory is how tests inject a fake transpiler.

use std::io::Write as _;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use thiserror::Error;

/// Failure to transpile, or to initialize the transpiler.
///
/// Cloneable so the single-flight cell can hand the same initialization
/// error to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TranspilationError(String);

impl TranspilationError {
    /// Create an error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Converts a CSS superset source into plain CSS.
pub trait Transpiler: std::fmt::Debug + Send + Sync {
    /// Transpile `source` to plain CSS.
    ///
    /// # Errors
    ///
    /// Returns a [`TranspilationError`] when the underlying preprocessor
    /// rejects the source or cannot run.
    fn transpile(&self, source: &str) -> Result<String, TranspilationError>;
}

/// Factory run once to produce the process-wide transpiler.
type TranspilerFactory =
    Box<dyn Fn() -> Result<Box<dyn Transpiler>, TranspilationError> + Send + Sync>;

/// Single-flight, lazily initialized transpiler handle.
pub struct LazyTranspiler {
    factory: TranspilerFactory,
    cell: OnceLock<Result<Box<dyn Transpiler>, TranspilationError>>,
}

impl LazyTranspiler {
    /// Create a handle that will run `factory` on first use.
    #[must_use]
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Transpiler>, TranspilationError> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            cell: OnceLock::new(),
        }
    }

    /// A handle backed by the external `sass` binary.
    #[must_use]
    pub fn sass_cli() -> Self {
        Self::new(|| Ok(Box::new(SassCli::new())))
    }

    /// The initialized transpiler.
    ///
    /// The factory runs at most once; callers that arrive while it is
    /// running block until it finishes.
    ///
    /// # Errors
    ///
    /// The factory's error, identically for every caller.
    pub fn get(&self) -> Result<&dyn Transpiler, TranspilationError> {
        match self.cell.get_or_init(|| (self.factory)()) {
            Ok(transpiler) => Ok(transpiler.as_ref()),
            Err(error) => Err(error.clone()),
        }
    }
}

/// [`Transpiler`] backed by the dart-sass command line interface.
///
/// Source is piped through stdin and plain CSS read back from stdout, one
/// process invocation per call.
#[derive(Debug)]
pub struct SassCli {
    program: String,
}

impl SassCli {
    /// Use the `sass` binary from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("sass")
    }

    /// Use a specific binary.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SassCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpiler for SassCli {
    fn transpile(&self, source: &str) -> Result<String, TranspilationError> {
        let mut child = Command::new(&self.program)
            .arg("--stdin")
            .arg("--no-source-map")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| {
                TranspilationError::new(format!("could not start {}: {error}", self.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).map_err(|error| {
                TranspilationError::new(format!("could not write to {}: {error}", self.program))
            })?;
        }

        let output = child.wait_with_output().map_err(|error| {
            TranspilationError::new(format!("could not run {}: {error}", self.program))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranspilationError::new(format!(
                "could not convert scss to css: {}",
                stderr.trim()
            )));
        }
        String::from_utf8(output.stdout).map_err(|error| {
            TranspilationError::new(format!("{} produced invalid UTF-8: {error}", self.program))
        })
    }
}
