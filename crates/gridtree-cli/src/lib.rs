//! Shared infrastructure for the gridtree binary.

pub mod logging;
