//! Codec implementations for common types

pub mod bytes;
pub mod pointer;
pub mod primitives;
pub mod tuple;
pub mod vec;
