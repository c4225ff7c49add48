//! Filtering, searching and sorting of an in-memory game list.
//!
//! Everything here is synchronous and side-effect free. Callers hand in a
//! snapshot of the catalog plus the favorites recorded on this client and get
//! back the games to display, in display order.

pub mod engine;
pub mod sort;

pub use engine::{query, GameQuery};
pub use sort::{NameOrder, SortKey};
