//! Long-running background jobs.

pub mod daily_reset;
