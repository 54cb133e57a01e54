//! Pubky MCP Server: entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use pubky_mcp::config::resolve_data_root;
use pubky_mcp::registry::Registries;
use pubky_mcp::transport::{Shutdown, StdioTransport};
use pubky_mcp::types::InitializeResult;
use pubky_mcp::Server;

#[derive(Parser)]
#[command(
    name = "pubky-mcp",
    about = "MCP server for the Pubky knowledge base: docs, specs, and developer tools",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Start MCP server over stateless HTTP.
    #[cfg(feature = "http")]
    ServeHttp {
        /// Port to listen on. Falls back to the PORT env var, then 3000.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check that every bundled project root is present and readable.
    Validate,

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   pubky-mcp completions bash > ~/.local/share/bash-completion/completions/pubky-mcp
    ///   pubky-mcp completions zsh > ~/.zfunc/_pubky-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    // stdout belongs to the stdio protocol channel.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let data_root = resolve_data_root();
            tracing::info!("Pubky MCP server (stdio)");
            tracing::info!("Data path: {}", data_root.display());
            let server = Server::open(data_root).await;
            server
                .run(&StdioTransport::new(), Shutdown::on_signals())
                .await?;
        }

        #[cfg(feature = "http")]
        Commands::ServeHttp { port } => {
            use pubky_mcp::config::resolve_port;
            use pubky_mcp::HttpTransport;

            let port = resolve_port(port);
            let data_root = resolve_data_root();
            tracing::info!("Pubky MCP server (HTTP)");
            tracing::info!("Data path: {}", data_root.display());
            let server = Server::open(data_root).await;
            server
                .run(&HttpTransport::new(port), Shutdown::on_signals())
                .await?;
        }

        Commands::Validate => {
            let data_root = resolve_data_root();
            let server = Server::open(&data_root).await;
            println!("Data root: {}", data_root.display());
            for root in &server.report().roots {
                let mark = if root.readable { "ok" } else { "MISSING" };
                println!("  {:<10} {:<8} {}", root.name, mark, root.path.display());
            }
            if !server.report().all_readable() {
                eprintln!("Bundled resources incomplete; fetch the project docs into the data root");
                std::process::exit(1);
            }
        }

        Commands::Info => {
            let capabilities = InitializeResult::default_result();
            let server = Server::open(resolve_data_root()).await;
            let handler = server.handler();
            let registries: &Registries = handler.registries();
            let tools = registries.tools.list().unwrap_or_default();
            let prompts = registries.prompts.list().unwrap_or_default();
            let resources = registries.resources.list().unwrap_or_default();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "prompts": prompts.iter().map(|p| &p.name).collect::<Vec<_>>(),
                "resource_count": resources.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "pubky-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
