//! Chat room CLI client.
//!
//! Joins a room, subscribes to its broadcast topic, publishes an enter
//! notice, then relays typed lines until '/exit' (or Ctrl+C / Ctrl+D) runs
//! the exit sequence and leaves.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin suda-client -- --room 3 --user-no 7 --user-name alice
//! ```

use clap::Parser;

use suda::{common::logger::init_tracing, runner::run_room, session::SessionContext};

#[derive(Parser, Debug)]
#[command(name = "suda-client")]
#[command(about = "Chat room client over WebSocket with enter/exit notices", long_about = None)]
struct Args {
    /// Room number to join
    #[arg(short, long)]
    room: u64,

    /// Numeric identifier of the local user
    #[arg(long)]
    user_no: u64,

    /// Display name of the local user
    #[arg(short = 'n', long)]
    user_name: String,

    /// Channel endpoint URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/chat")]
    url: String,

    /// Application base URL (history fetch, post-exit room listing)
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    base_url: String,
}

#[tokio::main]
async fn main() {
    init_tracing("info");

    let args = Args::parse();
    let session = SessionContext::new(args.user_no, args.user_name, args.room, args.base_url);

    if let Err(e) = run_room(&args.url, session).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
