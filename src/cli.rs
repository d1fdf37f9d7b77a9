//! Command line entry points.
//!
//! Every command except `serve` opens the configured storage, runs one job
//! and prints a short summary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::{CoopError, Result};
use crate::finance::{Period, today};
use crate::jobs::{calculate_financials, send_payment_reminders, update_attendance_summaries};
use crate::runtime::lifetime::startup::open_storage;
use crate::services::notifications::sender::LogSender;
use crate::services::students::import::import_from_bytes;
use crate::storage::Storage;

#[derive(Parser)]
#[command(
    name = "edu-coop",
    version,
    about = "Back office for an educational cooperative",
    long_about = "Runs the edu-coop HTTP server, or one of its periodic jobs \
                  (financial calculation, payment reminders, attendance summaries) \
                  from the command line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,

    /// Calculate instructor payments, monthly profit and member distributions
    CalculateFinancials {
        /// Any day of the month (YYYY-MM-DD) or YYYY-MM
        #[arg(short, long, value_parser = parse_period)]
        period: Period,
        /// Share of gross profit kept by the cooperative, 0-100
        #[arg(short, long)]
        retained_percentage: Option<Decimal>,
    },

    /// Queue due payment reminders and overdue notices, then dispatch them
    SendReminders {
        /// Day to run for, defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Rebuild the monthly attendance summaries
    UpdateAttendanceSummaries {
        /// Any day of the month, defaults to the current month
        #[arg(short, long, value_parser = parse_period)]
        month: Option<Period>,
    },

    /// Import students from a CSV or XLSX file
    ImportStudents {
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn parse_period(value: &str) -> std::result::Result<Period, String> {
    Period::parse(value).map_err(|e| e.message().to_string())
}

/// Runs a job command. `serve` is handled by the binary.
pub async fn run(command: Command) -> Result<()> {
    let storage = open_storage().await?;
    run_with(&storage, command).await
}

pub async fn run_with(storage: &Arc<dyn Storage>, command: Command) -> Result<()> {
    match command {
        Command::Serve => Err(CoopError::validation(
            "serve is not a job command",
        )),
        Command::CalculateFinancials {
            period,
            retained_percentage,
        } => match calculate_financials(storage, period, retained_percentage).await? {
            Some(run) => {
                println!("Financials for {}", run.period.label());
                println!("  instructor payments: {}", run.instructor_payments.len());
                println!("  total revenue:       {}", run.monthly.total_revenue);
                println!("  total expenses:      {}", run.monthly.total_expenses);
                println!("  gross profit:        {}", run.monthly.gross_profit);
                println!("  distributable:       {}", run.monthly.distributable_profit);
                println!("  distributions:       {}", run.distributions.len());
                Ok(())
            }
            None => Err(CoopError::period_finalized(format!(
                "{} is finalized and was not recalculated",
                period.label()
            ))),
        },
        Command::SendReminders { date } => {
            let date = date.unwrap_or_else(today);
            let report = send_payment_reminders(storage, &LogSender, date).await?;
            println!("Payment reminders for {}", report.date);
            println!("  reminders queued:      {}", report.reminders_queued);
            println!("  payments marked overdue: {}", report.overdue_marked);
            println!("  overdue notices queued:  {}", report.overdue_notices_queued);
            println!(
                "  dispatched: {} sent, {} failed",
                report.dispatch.sent, report.dispatch.failed
            );
            Ok(())
        }
        Command::UpdateAttendanceSummaries { month } => {
            let period = month.unwrap_or_else(|| Period::containing(today()));
            let summaries = update_attendance_summaries(storage, period).await?;
            println!(
                "Attendance summaries for {}: {} updated",
                period.label(),
                summaries.len()
            );
            Ok(())
        }
        Command::ImportStudents { file } => {
            let data = std::fs::read(&file).map_err(|e| {
                CoopError::file_operation(format!("Cannot read {}: {e}", file.display()))
            })?;
            let file_name = file.to_string_lossy();
            let report = import_from_bytes(storage, &data, &file_name)
                .await
                .map_err(|e| CoopError::import(e.message()))?;

            println!(
                "Imported {} of {} rows ({} skipped, {} failed)",
                report.success, report.total, report.skipped, report.failed
            );
            for error in &report.errors {
                match &error.field {
                    Some(field) => println!("  row {} [{}]: {}", error.row, field, error.message),
                    None => println!("  row {}: {}", error.row, error.message),
                }
            }
            if report.failed > 0 {
                return Err(CoopError::import(format!("{} row(s) failed", report.failed)));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_job_commands() {
        let cli = Cli::try_parse_from([
            "edu-coop",
            "calculate-financials",
            "--period",
            "2025-01-15",
            "--retained-percentage",
            "25",
        ])
        .unwrap();
        match cli.command {
            Some(Command::CalculateFinancials {
                period,
                retained_percentage,
            }) => {
                assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
                assert_eq!(retained_percentage, Some(Decimal::from(25)));
            }
            _ => panic!("unexpected command"),
        }

        let cli = Cli::try_parse_from(["edu-coop"]).unwrap();
        assert!(cli.command.is_none());

        assert!(
            Cli::try_parse_from(["edu-coop", "calculate-financials", "--period", "2025-13"])
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_import_students_command() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let path = std::env::temp_dir().join(format!("students-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "full_name,parent_name,parent_phone\nAmina Benali,Karim Benali,+212600000001\n",
        )
        .unwrap();

        run_with(&storage, Command::ImportStudents { file: path.clone() })
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        let missing = Command::ImportStudents {
            file: PathBuf::from("/nonexistent/students.csv"),
        };
        assert!(run_with(&storage, missing).await.is_err());
    }

    #[tokio::test]
    async fn test_attendance_summaries_command() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let command = Command::UpdateAttendanceSummaries {
            month: Some(Period::parse("2025-01").unwrap()),
        };
        assert!(run_with(&storage, command).await.is_ok());
    }
}
