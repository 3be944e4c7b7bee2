//! Implementations of the [`Custody`](crate::traits::Custody) seam.

mod external;
mod in_memory;

pub use external::ExternalEscrow;
pub use in_memory::InMemoryCustody;
