//! CLI library components for the CRF form tool.

pub mod logging;
