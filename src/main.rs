// aura - a safe space to talk

use aura::cli;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = cli::run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
