// command line interface

use crate::{Gemini, Server};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

#[derive(Parser)]
#[command(name = "aura", about = "Aura - um espaço seguro para conversar")]
struct Cli {
    /// gemini api key
    #[arg(long, short = 'k', env = "GEMINI_API_KEY", global = true)]
    api_key: Option<String>,

    /// file with the persona instruction for the model
    #[arg(long, default_value = "system_prompt_aura.txt", global = true)]
    persona: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// start as http server
    Serve {
        /// port number
        #[arg(long, short, default_value = "3000")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // a missing persona only logs a warning, missing credentials are fatal
    let persona = crate::core::load_persona(&cli.persona);
    let gemini = Gemini::new(cli.api_key, persona).into_diagnostic()?;

    match cli.command {
        Some(Commands::Serve { port, host }) => {
            Server::run(gemini, &host, port).await.into_diagnostic()
        }
        None => crate::tui::run(gemini).await.into_diagnostic(),
    }
}
