//! Settings schema and loading.
//!
//! Game rules, audio cadence, catalog scanning and UI defaults all come from
//! here; every field has a default so the file is optional.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
