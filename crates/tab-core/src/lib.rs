//! # tab-core
//!
//! Tagged cell values and the forward-only tabular cursor for Tabula.
//!
//! A producer (a SQL engine, a dataframe collect, a canned fixture) hands over
//! column names plus rows already in final order. [`TabularCursor`] exposes
//! them JDBC-style:
//! - `advance()` moves forward; the exhausted state is terminal
//! - typed getters take a 1-based ordinal or an exact column name
//! - null cells read as the type's default with `was_null()` raised
//!
//! ```
//! use tab_core::{row, Columns, TabularCursor};
//!
//! let mut rs = TabularCursor::new(
//!     Columns::new(["A_STRING", "COL1"]),
//!     vec![row!["a", 40], row!["b", 20]],
//! )?;
//! while rs.advance() {
//!     let _name = rs.get_string(1)?;
//!     let _score = rs.get_int("COL1")?;
//! }
//! assert!(!rs.advance());
//! # Ok::<(), tab_core::CursorError>(())
//! ```

pub mod coerce;
pub mod cursor;
pub mod error;
pub mod index;
pub mod producer;
pub mod row;
pub mod value;

pub use coerce::{FromValue, parse_timestamp};
pub use cursor::TabularCursor;
pub use error::CursorError;
pub use index::ColumnIndex;
pub use producer::RowProducer;
pub use row::{Columns, ResultBatch, Row};
pub use value::{Value, ValueKind};
