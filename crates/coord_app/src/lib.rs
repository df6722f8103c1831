//! Runtime around the pure lookup core: page history, effect execution,
//! configuration and logging setup.

pub mod platform;
