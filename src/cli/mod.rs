//! CLI module for the PMP Users API
//!
//! Provides subcommands for operating the service:
//! - `serve`: run the HTTP API server
//! - `gen-password`: print a generated password for administrative resets

pub mod serve;

use clap::{Parser, Subcommand};

/// PMP Users API - user account management service
#[derive(Parser)]
#[command(name = "pmp-users-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Print a generated password that satisfies the strength policy
    GenPassword,
}

/// Print one generated password for administrative resets.
pub fn gen_password() {
    println!("{}", crate::infrastructure::user::generate_password());
}
