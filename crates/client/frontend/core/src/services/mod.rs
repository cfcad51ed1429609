//! Stateless services consulted by the input resolver.
pub mod targeting;
