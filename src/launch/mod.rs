//! # Launch parameters and command assembly.
//!
//! This module provides:
//! - [`LaunchSpec`] - immutable launch parameters, validated at supervisor
//!   construction
//! - `command` (internal) - argv assembly preserving the
//!   `<jvm_args> -jar "<jar>" <app_args>` shape

pub(crate) mod command;
mod spec;

pub use spec::LaunchSpec;
