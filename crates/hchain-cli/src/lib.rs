//! Library side of the `hchain` binary.
//!
//! Chain files, algorithm selection and the subcommand handlers live here so
//! other tools can record and compare chain files without shelling out.

pub mod algorithm;
pub mod commands;
pub mod store;
