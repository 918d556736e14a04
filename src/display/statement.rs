//! Statement display formatting
//!
//! Renders a client statement as the bank's table report: a carried-forward
//! "Previous balance" row, one row per operation with the amount in its
//! withdrawal or deposit column, and a totals row.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::{OperationKind, TIMESTAMP_FORMAT};
use crate::services::Statement;

/// Render a statement as an ASCII table
pub fn format_statement(statement: &Statement) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Date", "Description", "Withdrawals", "Deposits", "Balance"]);
    builder.push_record([
        String::new(),
        "Previous balance".to_string(),
        String::new(),
        String::new(),
        statement.previous_balance.to_string(),
    ]);

    for op in &statement.operations {
        let (withdrawal, deposit) = match op.kind {
            OperationKind::Withdraw => (op.amount.to_string(), String::new()),
            OperationKind::Deposit => (String::new(), op.amount.to_string()),
        };
        builder.push_record([
            op.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            op.description.clone(),
            withdrawal,
            deposit,
            op.balance_after.to_string(),
        ]);
    }

    builder.push_record([
        String::new(),
        "Totals".to_string(),
        statement.withdrawals_total.to_string(),
        statement.deposits_total.to_string(),
        statement.closing_balance.to_string(),
    ]);

    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_timestamp, ClientRef, Money};
    use crate::services::{ClientService, OperationService};
    use crate::storage::{Entity, Storage};

    fn alice_statement() -> String {
        let mut storage = Storage::new();
        let mut service = ClientService::new(&mut storage);
        service.create("Alice", Money::from_cents(10000)).unwrap();
        service
            .deposit(&ClientRef::Name("Alice".into()), Money::from_cents(5000), "salary")
            .unwrap();
        service
            .withdraw(&ClientRef::Name("Alice".into()), Money::from_cents(15000), "rent")
            .unwrap();

        let client_id = storage.clients.iter().next().unwrap().id().unwrap();
        let statement = OperationService::new(&storage).statement(
            client_id,
            parse_timestamp("1970-01-01,00:00:00").unwrap(),
            parse_timestamp("2100-01-01,00:00:00").unwrap(),
        );
        format_statement(&statement)
    }

    #[test]
    fn test_table_carries_header_and_summary_rows() {
        let table = alice_statement();
        assert!(table.contains("Date"));
        assert!(table.contains("Withdrawals"));
        assert!(table.contains("Previous balance"));
        assert!(table.contains("Totals"));
    }

    #[test]
    fn test_table_shows_amounts_in_their_columns() {
        let table = alice_statement();
        assert!(table.contains("Initial deposit"));
        assert!(table.contains("salary"));
        assert!(table.contains("rent"));
        assert!(table.contains("$150.00"));
        assert!(table.contains("$0.00"));
    }
}
