pub mod driver;

pub mod engine;
pub use engine::{Engine, Request, Snapshots};

pub mod ndjson;

pub use graft_core::{err, list, record, stmt, Error, Result};
