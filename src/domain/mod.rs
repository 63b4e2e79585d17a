//! Domain layer: the payment value types and the ports to the host platform.

pub mod app;
pub mod payment;
pub mod ports;
pub mod result;
