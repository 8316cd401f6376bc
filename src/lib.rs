//! Library half of the `jobboard` binary: bootstrap and console adapters.

pub mod bootstrap;
pub mod prompt;
