//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Access logger: records method, path, status and latency

pub mod audit;
