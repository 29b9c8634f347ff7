//! nestegg-ingest: brokerage statement records and institution-specific CSV export parsers.

pub mod error;
pub mod parsers;
pub mod statement_date;
pub mod types;

pub use error::{Result, StatementError};
pub use parsers::fidelity::parse_fidelity_statement;
pub use statement_date::statement_date_from_path;
pub use types::{Holding, HoldingKind, StatementHeader};
