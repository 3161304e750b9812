//! Kumi composes webpack-style build configurations from a resolved mode.
//!
//! Every conditional piece (minimizer pipeline, filename patterns, loader
//! chains, plugin list) derives from one mode value; the static fields
//! carry defaults that a project config file or CLI flags may override.
//! The result serializes to the camelCase JSON a build engine consumes.

pub mod cli;
pub mod core;
pub mod utils;
