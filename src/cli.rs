use std::net::IpAddr;

use clap::{Parser, Subcommand};

/// fakeazure — mock identity and key vault endpoints for client tests
#[derive(Parser)]
#[command(name = "fakeazure", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the mock server
    Serve {
        /// Address to bind (overrides FAKEAZURE_HOST)
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to bind (overrides FAKEAZURE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
