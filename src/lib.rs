pub mod branches;
pub mod cli;
pub mod committer;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod model;
pub mod stats;
pub mod tracker;
pub mod util;
pub mod worker;
