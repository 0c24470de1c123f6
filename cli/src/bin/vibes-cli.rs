//! Vibes CLI - cast votes and query the ballot

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use vibes_api::TallyResponse;
use vibes_ballot::VoteChoice;
use vibes_cli::{BallotClient, ClientError};

#[derive(Parser)]
#[command(name = "vibes-cli")]
#[command(about = "Vibes ballot query tool", version)]
struct Cli {
    /// API endpoint
    #[arg(short, long, default_value = "http://localhost:24200")]
    api: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current tally
    Tally,

    /// Check whether an identity has voted
    Voted {
        /// Voter identity (e.g. account address)
        identity: String,
    },

    /// Vote for good vibes
    Good { identity: String },

    /// Vote for bad vibes
    Bad { identity: String },
}

fn print_tally(tally: &TallyResponse) {
    println!("\nWhat are your vibes?");
    println!("═══════════════════════════════════");
    println!(
        "Good Votes:  {} ({}%)",
        tally.good.green(),
        tally.good_percentage
    );
    println!("Bad Votes:   {} ({}%)", tally.bad.red(), tally.bad_percentage);
    println!("Total Votes: {}", tally.total);
    println!();
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let client = BallotClient::new(cli.api);

    match cli.command {
        Commands::Tally => {
            print_tally(&client.tally().await?);
        }

        Commands::Voted { identity } => {
            if client.has_voted(&identity).await? {
                println!("{} {} has already voted", "✓".green(), identity);
            } else {
                println!("{} has not voted yet", identity);
            }
        }

        Commands::Good { identity } => {
            let response = client.vote(&identity, VoteChoice::Good).await?;
            println!("✨ {}", response.message.green().bold());
            print_tally(&response.tally);
        }

        Commands::Bad { identity } => {
            let response = client.vote(&identity, VoteChoice::Bad).await?;
            println!("💔 {}", response.message.red().bold());
            print_tally(&response.tally);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match &e {
            ClientError::Rejected { message, .. } if e.is_already_voted() => {
                eprintln!("{} {}", "✗".yellow(), message.yellow());
            }
            _ => eprintln!("{} {}", "✗".red(), e.red()),
        }
        std::process::exit(1);
    }
}
