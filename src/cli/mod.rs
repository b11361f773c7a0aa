pub mod commands;
pub mod config;
pub mod context;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "halls")]
#[command(about = "HallsBooking CLI - find, book and manage event venues")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, signup and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Search venues")]
    Search(commands::search::SearchArgs),

    #[command(about = "Venue availability and owner venue management")]
    Venues {
        #[command(subcommand)]
        cmd: commands::venues::VenueCommands,
    },

    #[command(about = "Booking requests")]
    Bookings {
        #[command(subcommand)]
        cmd: commands::bookings::BookingCommands,
    },

    #[command(about = "Media upload signing")]
    Uploads {
        #[command(subcommand)]
        cmd: commands::uploads::UploadCommands,
    },

    #[command(about = "Navigate to a location such as /search?type=Hall")]
    Open {
        #[arg(help = "Location path with optional query string")]
        location: String,
    },

    #[command(about = "Show the home screen")]
    Home,

    #[command(about = "API server selection and health")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Search(args) => commands::search::handle(args, output_format).await,
        Commands::Venues { cmd } => commands::venues::handle(cmd, output_format).await,
        Commands::Bookings { cmd } => commands::bookings::handle(cmd, output_format).await,
        Commands::Uploads { cmd } => commands::uploads::handle(cmd, output_format).await,
        Commands::Open { location } => commands::navigate::open(&location, output_format).await,
        Commands::Home => commands::navigate::home(output_format).await,
        Commands::Server { cmd } => commands::server::handle(cmd, output_format).await,
    }
}
