//! Solene Geo - Geometric strategies for CIR export
//!
//! Implementations of the geometry ports declared in `solene-core`.

pub mod normal;

pub use normal::NewellNormal;
