// SPDX-License-Identifier: MIT OR Apache-2.0
//! Log dispatcher construction.

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use wirex_config::{AppConfig, LogFormat};

use crate::AppError;

/// Build a dispatcher for `config` without installing it globally.
pub fn build_dispatch(config: &AppConfig) -> Result<Dispatch, AppError> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| AppError::LogFilter {
        directive: config.log_level.clone(),
        reason: e.to_string(),
    })?;

    let dispatch = match config.log_format {
        LogFormat::Text => Dispatch::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .finish(),
        ),
        LogFormat::Json => Dispatch::new(
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_current_span(false)
                .finish(),
        ),
    };
    Ok(dispatch)
}
