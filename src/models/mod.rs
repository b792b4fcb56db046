//! Wire types exchanged with the farm backend, plus the client-local ledger and report records.

use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod ledger;
pub mod order;
pub mod report;
pub mod stock;

pub use auth::*;
pub use ledger::*;
pub use order::*;
pub use report::*;
pub use stock::*;

/// Missing and `null` values both deserialize to the type's default (zero for numbers).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treats blank strings as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
