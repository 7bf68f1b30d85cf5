//! Parlor terminal chat client.
//!
//! # Usage
//!
//! ```bash
//! # Join one room on a local server
//! PARLOR_TOKEN=secret parlor --room lobby
//!
//! # Several rooms over TLS; `h` cycles between them
//! parlor --host chat.example.com --secure --token secret --room lobby --room random
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use parlor_client::TransportConfig;
use parlor_proto::RoomId;
use parlor_tui::{DriverConfig, RoomList, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Parlor terminal chat client
#[derive(Parser, Debug)]
#[command(name = "parlor")]
#[command(about = "Terminal client for Parlor chat rooms")]
#[command(version)]
struct Args {
    /// Server host and port
    #[arg(long, env = "PARLOR_HOST", default_value = "localhost:3000")]
    host: String,

    /// Use wss/https instead of ws/http
    #[arg(long)]
    secure: bool,

    /// Auth token, sent as the Authorization header
    #[arg(long, env = "PARLOR_TOKEN", hide_env_values = true)]
    token: String,

    /// Room to join; repeat to cycle between rooms with `h`
    #[arg(short, long = "room", required = true)]
    rooms: Vec<RoomId>,

    /// Name shown in the header
    #[arg(short, long, env = "PARLOR_USERNAME")]
    username: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log file; the terminal itself is taken by the UI
    #[arg(long, default_value = "parlor.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    tracing::info!(host = %args.host, secure = args.secure, "Parlor starting");

    let rooms = RoomList::new(args.rooms).ok_or("at least one --room is required")?;
    let first = rooms.active().clone();
    let config = DriverConfig {
        transport: TransportConfig { host: args.host, secure: args.secure },
        token: args.token,
        rooms,
        username: args.username,
    };

    let mut runtime = Runtime::new(TerminalDriver::new(config)?);
    let result = runtime.run(first).await;

    // Restore the terminal before any error reaches stderr
    drop(runtime);

    if let Err(e) = &result {
        tracing::error!(error = %e, "Parlor exiting with error");
    }
    Ok(result?)
}
