//! Display formatting for terminal output

pub mod statement;

pub use statement::format_statement;
