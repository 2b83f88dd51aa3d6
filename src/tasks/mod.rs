//! Background Tasks Module
//!
//! Optional deferred maintenance for hosts that prefer a periodic sweep
//! over purely inline expiry.

mod maintenance;

pub use maintenance::spawn_maintenance_task;
