//! Request handlers, one module per route group

pub mod meta;
pub mod respond;
pub mod suggest;
