//! Terminal chat client with reconnection support.
//!
//! Joins the relay under a display name, sends each input line as a chat
//! message and prints every event the relay broadcasts. Reconnects with
//! backoff (up to 5 attempts, 1 second doubling to at most 5 seconds).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-client -- --username alice
//! cargo run --bin tsudoi-client -- -n bob -u ws://127.0.0.1:3002/ws
//! ```

use clap::Parser;

use tsudoi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsudoi-client")]
#[command(about = "Terminal chat client for the Tsudoi presence relay", long_about = None)]
struct Args {
    /// Display name shown to other users (1-20 characters, need not be unique)
    #[arg(short = 'n', long)]
    username: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3002/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = tsudoi_client::run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
