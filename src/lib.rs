//! listwatch: keep a snapshot of a catalog page's listings and report what
//! appeared or disappeared since the previous run.

pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod report;
pub mod run;
pub mod store;
pub mod util;
