use anyhow::Context;
use clap::{Parser, Subcommand};
use stayhub_authz::TokenService;
use stayhub_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "stayhub", version, about = "STAYHUB property management backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override `server.port`
        #[arg(long, env = "STAYHUB_PORT")]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document
    Openapi {
        #[arg(long)]
        pretty: bool,
    },
    /// Mint a bearer token for local testing
    Token {
        /// User id placed in the `sub` claim
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load STAYHUB settings")?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            stayhub_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "stayhub serve");
            stayhub_app::bootstrap::run(settings).await
        }
        Command::Openapi { pretty } => {
            let registry = stayhub_app::bootstrap::build_registry(&settings)?;
            let document = stayhub_http::router::openapi_document(&registry);
            let rendered = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{}", rendered);
            Ok(())
        }
        Command::Token { user } => {
            let token = TokenService::from_settings(&settings.auth)
                .issue(&user)
                .with_context(|| format!("failed to issue token for '{}'", user))?;
            println!("{}", token);
            Ok(())
        }
    }
}
