//! Adapters for the platform ports.

pub mod in_memory;
pub mod writer_launcher;
