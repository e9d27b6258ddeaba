//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired cache entries at a configured interval.
//!   Reads purge on access regardless, so the sweeper only bounds memory held
//!   by keys that are never requested again.

mod sweeper;

pub use sweeper::spawn_sweeper_task;
