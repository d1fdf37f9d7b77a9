//! edu-coop: back office for an educational cooperative.
//!
//! # Layout
//! - `cache`: object cache (Moka/Redis)
//! - `cli`: command line jobs
//! - `config`: static configuration
//! - `entity`: SeaORM entities
//! - `errors`: crate error type
//! - `finance`: pure money, period, payroll and profit-sharing rules
//! - `jobs`: financial calculation, payment reminders, attendance summaries and their scheduler
//! - `middlewares`: authentication, role and rate-limit guards
//! - `models`: API and domain types
//! - `routes`: HTTP scopes
//! - `runtime`: startup and shutdown
//! - `services`: request handling per domain
//! - `storage`: persistence (SeaORM)
//! - `utils`: shared helpers

pub mod cache;
pub mod cli;
pub mod config;
pub mod entity;
pub mod errors;
pub mod finance;
pub mod jobs;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
