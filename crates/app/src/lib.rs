//! Storefront product storage core.
//!
//! Translates gateway requests into conditional operations against a key-value
//! document store and renders a uniform response envelope.

pub mod config;
pub mod context;
pub mod gateway;
pub mod logging;
pub mod products;

#[cfg(test)]
mod test;
