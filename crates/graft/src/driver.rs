mod memory;
pub use memory::Memory;

pub use graft_core::driver::{Driver, Response};
