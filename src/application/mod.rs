//! Application layer: building requests, resolving the target app and routing
//! results back to the host.
//!
//! [`session::PaymentSession`] is the entry point; it owns a
//! [`channel::ResultChannel`] rather than sharing a global listener, so independent
//! sessions never see each other's results.

pub mod builder;
pub mod channel;
pub mod resolver;
pub mod session;
