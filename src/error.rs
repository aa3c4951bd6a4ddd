/*
 * Error Module
 *
 * This module defines the crate-wide error type and Result alias.
 * Configuration problems are fatal at construction time; the running
 * simulation itself only deals in numerical guards, not errors.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // Rejected configuration value, reported before the loop starts
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    // Initial placement could not find a spot clear of the partition
    #[error("placement failed: {0}")]
    Placement(String),
}
