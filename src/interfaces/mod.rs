//! Interface adapters: the UPI deep-link and response codecs.

pub mod upi;
