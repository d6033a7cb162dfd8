//! Infrastructure shared by the Rainforest client and its runner binary:
//! configuration loading and logger setup.

pub mod config;
pub mod logging;
