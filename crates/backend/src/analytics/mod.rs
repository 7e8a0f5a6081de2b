//! Reporting over in-memory entity collections.
//!
//! Every function here is a pure transformation: no storage access, no
//! mutation of inputs, identical output for identical input. Empty inputs
//! degrade to empty rankings and zero-valued summaries.

pub mod network;
pub mod service;
