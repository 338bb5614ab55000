use chat_hub::cli::{Cli, Command};
use chat_hub::lifecycle::{setup_tracing, ChatSystem};
use chat_hub::repl::{run_demo, run_session};
use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Demo(args) => {
            setup_tracing(cli.log_format, "info");
            let system = ChatSystem::with_config(args.to_config()).map_err(|e| e.to_string())?;
            info!(
                default_room = %system.config().default_room,
                max_history = system.config().max_history,
                "Starting demo"
            );

            let result = run_demo(&system).await;
            system.shutdown().await.map_err(|e| e.to_string())?;
            if let Err(e) = result {
                error!(error = %e, "Demo failed");
                return Err(e.to_string());
            }
        }
        Command::Repl(args) => {
            // Quieter default so logs don't crowd the conversation.
            setup_tracing(cli.log_format, "warn");
            let system =
                ChatSystem::with_config(args.hub.to_config()).map_err(|e| e.to_string())?;
            let session = system.session(&args.user, &args.room);

            let result = run_session(
                session,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
                args.output_mode(),
            )
            .await;
            system.shutdown().await.map_err(|e| e.to_string())?;
            result.map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}
