//! CLI library components for tabprep.

#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
