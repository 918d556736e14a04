//! Prompt command definitions and handlers
//!
//! One subcommand per prompt command, in the original bank prompt's
//! `--flag` style, bridging clap argument parsing with the service layer.

use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::display::format_statement;
use crate::error::{TellerError, TellerResult};
use crate::models::{parse_timestamp, ClientId, ClientRef, Money, OperationKind};
use crate::services::{ClientService, OperationService, Statement};
use crate::storage::Storage;

/// Parser for one prompt line
#[derive(Debug, Parser)]
#[command(name = "teller", no_binary_name = true)]
pub struct PromptLine {
    #[command(subcommand)]
    pub command: BankCommand,
}

/// Output format for statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatementFormat {
    Table,
    Json,
    Csv,
}

/// Prompt commands
#[derive(Debug, Subcommand)]
pub enum BankCommand {
    /// Add a new client to the ledger
    NewClient {
        /// Name of the client
        #[arg(long)]
        client: String,
        /// Amount of money for the initial deposit
        #[arg(long, default_value = "0")]
        amount: String,
    },
    /// Deposit money to a client's account
    Deposit {
        /// Name of the client
        #[arg(long)]
        client: String,
        /// Amount of money to deposit
        #[arg(long)]
        amount: String,
        /// Description of the operation
        #[arg(long)]
        description: String,
    },
    /// Withdraw money from a client's account
    Withdraw {
        /// Name of the client
        #[arg(long)]
        client: String,
        /// Amount of money to withdraw
        #[arg(long)]
        amount: String,
        /// Description of the operation
        #[arg(long)]
        description: String,
    },
    /// Show a client's current balance
    Balance {
        /// Name of the client
        #[arg(long)]
        client: String,
    },
    /// Show all operations for a client in a time period
    ShowBankStatement {
        /// Name of the client
        #[arg(long)]
        client: Option<String>,
        /// Id of the client
        #[arg(long)]
        client_id: Option<ClientId>,
        /// Start of the period, as 1970-01-31,13:45:00
        #[arg(long)]
        since: String,
        /// End of the period, same format
        #[arg(long)]
        till: String,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: StatementFormat,
    },
    /// Leave the prompt
    Exit,
}

/// What the prompt loop should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Execute one prompt command, writing its report to `out`
pub fn handle_command<W: Write>(
    storage: &mut Storage,
    out: &mut W,
    command: BankCommand,
) -> TellerResult<Outcome> {
    match command {
        BankCommand::NewClient { client, amount } => {
            let initial = parse_money(&amount)?;
            let created = ClientService::new(storage).create(&client, initial)?;
            writeln!(
                out,
                "New client \"{}\" has been added! ({} available)",
                created.name,
                created.balance()
            )?;
        }

        BankCommand::Deposit {
            client,
            amount,
            description,
        } => {
            let amount = parse_money(&amount)?;
            let updated = ClientService::new(storage).deposit(
                &ClientRef::Name(client),
                amount,
                &description,
            )?;
            writeln!(
                out,
                "Deposit operation was successful! ({} available for {})",
                updated.balance(),
                updated.name
            )?;
        }

        BankCommand::Withdraw {
            client,
            amount,
            description,
        } => {
            let amount = parse_money(&amount)?;
            let updated = ClientService::new(storage).withdraw(
                &ClientRef::Name(client),
                amount,
                &description,
            )?;
            writeln!(
                out,
                "Withdrawal operation was successful! ({} available for {})",
                updated.balance(),
                updated.name
            )?;
        }

        BankCommand::Balance { client } => {
            let service = ClientService::new(storage);
            let client_ref = ClientRef::Name(client.clone());
            let balance = service.balance(&client_ref)?;
            writeln!(out, "{} available for {}", balance, client)?;
        }

        BankCommand::ShowBankStatement {
            client,
            client_id,
            since,
            till,
            format,
        } => {
            let client_ref = ClientRef::from_parts(client_id, client)?;
            let (client_id, _) = client_ref.resolve(&storage.clients)?;
            let since = parse_timestamp(&since)?;
            let till = parse_timestamp(&till)?;

            let statement = OperationService::new(storage).statement(client_id, since, till);
            match format {
                StatementFormat::Table => writeln!(out, "{}", format_statement(&statement))?,
                StatementFormat::Json => write_json(out, &statement)?,
                StatementFormat::Csv => write_csv(out, &statement)?,
            }
        }

        BankCommand::Exit => return Ok(Outcome::Exit),
    }
    Ok(Outcome::Continue)
}

fn parse_money(s: &str) -> TellerResult<Money> {
    Money::parse(s).map_err(|e| TellerError::Validation(e.to_string()))
}

fn write_json<W: Write>(out: &mut W, statement: &Statement) -> TellerResult<()> {
    let rendered = serde_json::to_string_pretty(statement)
        .map_err(|e| TellerError::Io(e.to_string()))?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

/// One flattened statement row for CSV output
#[derive(Debug, Serialize)]
struct StatementRow<'a> {
    date: String,
    description: &'a str,
    kind: OperationKind,
    amount: Money,
    balance: Money,
}

fn write_csv<W: Write>(out: &mut W, statement: &Statement) -> TellerResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    for op in &statement.operations {
        writer
            .serialize(StatementRow {
                date: op.timestamp.format(crate::models::TIMESTAMP_FORMAT).to_string(),
                description: &op.description,
                kind: op.kind,
                amount: op.amount,
                balance: op.balance_after,
            })
            .map_err(|e| TellerError::Io(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_line(storage: &mut Storage, out: &mut Vec<u8>, line: &[&str]) -> TellerResult<Outcome> {
        let parsed = PromptLine::try_parse_from(line).unwrap();
        handle_command(storage, out, parsed.command)
    }

    #[test]
    fn test_new_client_then_balance() {
        let mut storage = Storage::new();
        let mut out = Vec::new();

        run_line(
            &mut storage,
            &mut out,
            &["new-client", "--client", "Alice", "--amount", "100"],
        )
        .unwrap();
        run_line(&mut storage, &mut out, &["balance", "--client", "Alice"]).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("New client \"Alice\" has been added! ($100.00 available)"));
        assert!(printed.contains("$100.00 available for Alice"));
    }

    #[test]
    fn test_deposit_and_withdraw_report_the_new_balance() {
        let mut storage = Storage::new();
        let mut out = Vec::new();

        run_line(
            &mut storage,
            &mut out,
            &["new-client", "--client", "Alice", "--amount", "100"],
        )
        .unwrap();
        run_line(
            &mut storage,
            &mut out,
            &[
                "deposit", "--client", "Alice", "--amount", "50", "--description", "salary",
            ],
        )
        .unwrap();
        run_line(
            &mut storage,
            &mut out,
            &[
                "withdraw", "--client", "Alice", "--amount", "150", "--description", "rent",
            ],
        )
        .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Deposit operation was successful! ($150.00 available for Alice)"));
        assert!(printed.contains("Withdrawal operation was successful! ($0.00 available for Alice)"));
    }

    #[test]
    fn test_unparsable_amount_is_a_validation_error() {
        let mut storage = Storage::new();
        let mut out = Vec::new();

        let err = run_line(
            &mut storage,
            &mut out,
            &["new-client", "--client", "Alice", "--amount", "lots"],
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert!(storage.clients.is_empty());
    }

    #[test]
    fn test_statement_requires_exactly_one_client_ref() {
        let mut storage = Storage::new();
        let mut out = Vec::new();
        run_line(
            &mut storage,
            &mut out,
            &["new-client", "--client", "Alice", "--amount", "100"],
        )
        .unwrap();

        let err = run_line(
            &mut storage,
            &mut out,
            &[
                "show-bank-statement",
                "--since",
                "1970-01-01,00:00:00",
                "--till",
                "2100-01-01,00:00:00",
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TellerError::Reference(_)));

        let err = run_line(
            &mut storage,
            &mut out,
            &[
                "show-bank-statement",
                "--client",
                "Alice",
                "--client-id",
                "0",
                "--since",
                "1970-01-01,00:00:00",
                "--till",
                "2100-01-01,00:00:00",
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TellerError::Reference(_)));
    }

    #[test]
    fn test_statement_by_client_id_renders_the_table() {
        let mut storage = Storage::new();
        let mut out = Vec::new();
        run_line(
            &mut storage,
            &mut out,
            &["new-client", "--client", "Alice", "--amount", "100"],
        )
        .unwrap();

        run_line(
            &mut storage,
            &mut out,
            &[
                "show-bank-statement",
                "--client-id",
                "0",
                "--since",
                "1970-01-01,00:00:00",
                "--till",
                "2100-01-01,00:00:00",
            ],
        )
        .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Previous balance"));
        assert!(printed.contains("Initial deposit"));
        assert!(printed.contains("Totals"));
    }

    #[test]
    fn test_statement_csv_rows() {
        let mut storage = Storage::new();
        let mut out = Vec::new();
        run_line(
            &mut storage,
            &mut out,
            &["new-client", "--client", "Alice", "--amount", "100"],
        )
        .unwrap();
        out.clear();

        run_line(
            &mut storage,
            &mut out,
            &[
                "show-bank-statement",
                "--client",
                "Alice",
                "--since",
                "1970-01-01,00:00:00",
                "--till",
                "2100-01-01,00:00:00",
                "--format",
                "csv",
            ],
        )
        .unwrap();

        let printed = String::from_utf8(out).unwrap();
        let mut lines = printed.lines();
        assert_eq!(lines.next(), Some("date,description,kind,amount,balance"));
        let row = lines.next().unwrap();
        assert!(row.contains("Initial deposit"));
        assert!(row.ends_with("deposit,10000,10000"));
    }

    #[test]
    fn test_statement_json_contains_operations() {
        let mut storage = Storage::new();
        let mut out = Vec::new();
        run_line(
            &mut storage,
            &mut out,
            &["new-client", "--client", "Alice", "--amount", "100"],
        )
        .unwrap();
        out.clear();

        run_line(
            &mut storage,
            &mut out,
            &[
                "show-bank-statement",
                "--client",
                "Alice",
                "--since",
                "1970-01-01,00:00:00",
                "--till",
                "2100-01-01,00:00:00",
                "--format",
                "json",
            ],
        )
        .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("\"operations\""));
        assert!(printed.contains("\"Initial deposit\""));
        assert!(printed.contains("\"previous_balance\": 0"));
    }

    #[test]
    fn test_exit_stops_the_loop() {
        let mut storage = Storage::new();
        let mut out = Vec::new();
        let outcome = run_line(&mut storage, &mut out, &["exit"]).unwrap();
        assert_eq!(outcome, Outcome::Exit);
    }
}
