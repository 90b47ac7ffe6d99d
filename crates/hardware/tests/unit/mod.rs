//! # Unit Components
//!
//! This module organizes the tests for each part of the scheduler, from the
//! configuration and trace loader through the individual pipeline stages to
//! whole-run properties.


/// Error reporting for malformed traces and configurations.
pub mod error;

/// JSON trace loading from strings and files.
pub mod loader;
