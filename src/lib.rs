pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod seed;
pub mod util;
