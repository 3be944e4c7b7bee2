//! Core trait abstractions at the engine's collaborator seams.
//!
//! The engine owns reserve accounting but not token custody; [`Custody`]
//! is the boundary through which it asks an external ledger to move
//! tokens in and out of the pool.

mod custody;

pub use custody::Custody;
