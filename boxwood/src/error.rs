// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by engine construction.

use thiserror::Error;

/// Errors that can occur while building an [`Engine`](crate::Engine).
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// The background paint thread could not be started.
    #[error("failed to spawn paint worker: {0}")]
    SpawnWorker(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
