//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog listings, the
//! open playlist and the current round.

mod model;

pub use model::*;
