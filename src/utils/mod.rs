//! Utility modules: build info, logging, file locations.

pub mod build_info;
pub mod logging;
pub mod persistence;
