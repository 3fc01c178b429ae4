//! kspwlo CLI library.
//!
//! Output formatting shared by the `kspwlo` binary's subcommands.

pub mod output;
