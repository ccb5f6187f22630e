// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bootstrap for processes that host the wirex codec.
//!
//! An [`App`] is built from an explicit [`AppConfig`] passed by reference.
//! It owns a log dispatcher (never installed globally; see [`App::enter`])
//! and an ordered list of closers. Teardown happens in [`App::close`], or on
//! drop if the app was never closed, so resources are released on every
//! exit path.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod telemetry;

use std::fmt;

use tracing::dispatcher::DefaultGuard;
use tracing::{Dispatch, info, warn};
use wirex_config::{AppConfig, ConfigError, validate_config};

pub use telemetry::build_dispatch;

/// Boxed error returned by closers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while bootstrapping an [`App`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The log level could not be turned into a filter. Only reachable via
    /// [`build_dispatch`] on an unvalidated config; [`App::new`] reports the
    /// same problem as [`AppError::Config`].
    #[error("invalid log filter '{directive}': {reason}")]
    LogFilter {
        /// Directive as configured.
        directive: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// One or more closers failed during teardown.
///
/// Displays as `error 1: <first>, error 2: <second>`, numbering only the
/// closers that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseError {
    failures: Vec<String>,
}

impl CloseError {
    /// Messages of the failed closers, in registration order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

impl fmt::Display for CloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "error {}: {failure}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for CloseError {}

struct Closer {
    name: String,
    close: Box<dyn FnOnce() -> Result<(), BoxError> + Send>,
}

/// A bootstrapped process: log dispatcher plus registered closers.
pub struct App {
    service_name: String,
    dispatch: Dispatch,
    closers: Vec<Closer>,
}

impl App {
    /// Validate `config` and build the app.
    ///
    /// Config warnings are logged through the app's own dispatcher.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let warnings = validate_config(config)?;
        let dispatch = build_dispatch(config)?;

        tracing::dispatcher::with_default(&dispatch, || {
            for warning in &warnings {
                warn!(service = %config.service_name, %warning, "config warning");
            }
            info!(
                service = %config.service_name,
                log_format = ?config.log_format,
                remote_read = config.remote_read.is_some(),
                "app initialised"
            );
        });

        Ok(Self::with_dispatch(config.service_name.clone(), dispatch))
    }

    /// Build an app around an existing dispatcher.
    pub fn with_dispatch(service_name: impl Into<String>, dispatch: Dispatch) -> Self {
        Self {
            service_name: service_name.into(),
            dispatch,
            closers: Vec::new(),
        }
    }

    /// Service name from the config.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// The app's log dispatcher.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Make the app's dispatcher the default for this thread until the
    /// returned guard is dropped.
    pub fn enter(&self) -> DefaultGuard {
        tracing::dispatcher::set_default(&self.dispatch)
    }

    /// Number of closers still pending.
    pub fn pending_closers(&self) -> usize {
        self.closers.len()
    }

    /// Register a teardown step. Closers run in registration order.
    pub fn on_close<F, E>(&mut self, name: impl Into<String>, close: F)
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
        E: Into<BoxError>,
    {
        self.closers.push(Closer {
            name: name.into(),
            close: Box::new(move || close().map_err(Into::into)),
        });
    }

    /// Run every closer, continuing past failures.
    pub fn close(mut self) -> Result<(), CloseError> {
        self.run_closers()
    }

    fn run_closers(&mut self) -> Result<(), CloseError> {
        let closers = std::mem::take(&mut self.closers);
        let service = self.service_name.clone();

        let failures = tracing::dispatcher::with_default(&self.dispatch, || {
            let mut failures = Vec::new();
            for closer in closers {
                if let Err(err) = (closer.close)() {
                    warn!(service = %service, closer = %closer.name, error = %err, "closer failed");
                    failures.push(err.to_string());
                }
            }
            failures
        });

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CloseError { failures })
        }
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("service_name", &self.service_name)
            .field("pending_closers", &self.closers.len())
            .finish()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if self.closers.is_empty() {
            return;
        }
        // Errors were already logged per closer.
        let _ = self.run_closers();
    }
}
