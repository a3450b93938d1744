use clap::Parser;
use promptgate_server::config::ServerConfig;
use promptgate_server::server;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "promptgate-server", about = "Prompt + media text-generation HTTP service")]
struct Args {
    /// Bind address.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port.
    #[arg(long, default_value_t = 7001)]
    port: u16,

    /// Directory holding the sample media files, also served under /public.
    #[arg(long, default_value = "public")]
    media_dir: PathBuf,

    /// Seconds to wait between remote-file state polls on the video route.
    #[arg(long, default_value_t = 10)]
    poll_interval_secs: u64,

    /// Provider model name.
    #[arg(long, default_value = promptgate::provider::DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("promptgate=info,promptgate_server=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    // The provider key is the one piece of configuration the process cannot
    // run without.
    if std::env::var(promptgate::provider::API_KEY_ENV).is_err() {
        anyhow::bail!("Missing API key. Set GEMINI_API_KEY in the environment or a .env file.");
    }

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        media_dir: args.media_dir,
        poll_interval: Duration::from_secs(args.poll_interval_secs),
        model: args.model,
    };

    server::run_server(config).await
}
