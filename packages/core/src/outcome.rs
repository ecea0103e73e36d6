//! Success-or-reported-failure results shared by every remote operation.
//!
//! A remote operation that gets an unexpected HTTP status does not fail with
//! an error. The status is handed to the caller's [`ErrorReporter`] (when one
//! is supplied) and returned as [`Outcome::Failed`].

use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// HTTP status code plus its description.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusLine {
    pub code: u16,
    pub description: String,
}

impl StatusLine {
    pub fn new(code: u16, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    /// The only status operations treat as success: `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.description)
    }
}

/// Sink for failed operations' status code and description.
///
/// Implemented for any `Fn(u16, &str) + Send + Sync` closure.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, code: u16, description: &str);
}

impl<F> ErrorReporter for F
where
    F: Fn(u16, &str) + Send + Sync,
{
    fn report(&self, code: u16, description: &str) {
        self(code, description)
    }
}

/// A reporter that keeps every failure it receives.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    failures: Mutex<Vec<StatusLine>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures received so far, in arrival order.
    pub fn failures(&self) -> Vec<StatusLine> {
        match self.failures.lock() {
            Ok(failures) => failures.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failures().is_empty()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, code: u16, description: &str) {
        let status = StatusLine::new(code, description);
        match self.failures.lock() {
            Ok(mut failures) => failures.push(status),
            Err(poisoned) => poisoned.into_inner().push(status),
        }
    }
}

/// Result of a remote operation that completed its HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Success(T),
    Failed(StatusLine),
}

impl<T> Outcome<T> {
    /// Hand `status` to `reporter`, if any, and return it as a failure.
    pub fn reported(status: StatusLine, reporter: Option<&dyn ErrorReporter>) -> Self {
        if let Some(reporter) = reporter {
            reporter.report(status.code, &status.description);
        }
        Outcome::Failed(status)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&StatusLine> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failed(status) => Some(status),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failed(status) => Outcome::Failed(status),
        }
    }

    pub fn into_result(self) -> Result<T, StatusLine> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failed(status) => Err(status),
        }
    }
}
