//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the handlers, such as
//! trace identifier propagation.

pub mod trace;

pub use trace::Trace;
