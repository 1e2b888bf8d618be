pub mod agent;
pub mod memory;
