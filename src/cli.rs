use crate::lifecycle::{HubConfig, LogFormat, DEFAULT_ROOM, MAX_HISTORY_SIZE};
use crate::repl::OutputMode;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Layout of log lines written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a scripted conversation between a few users.
    Demo(HubArgs),
    /// Chat interactively from the terminal.
    Repl(ReplArgs),
}

#[derive(Args, Debug, Clone)]
pub struct HubArgs {
    /// Room used when a user connects without naming one.
    #[arg(long, env = "CHAT_HUB_DEFAULT_ROOM", default_value = DEFAULT_ROOM)]
    pub default_room: String,

    /// Number of messages kept per room and replayed to new members.
    #[arg(long, env = "CHAT_HUB_MAX_HISTORY", default_value_t = MAX_HISTORY_SIZE)]
    pub max_history: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ReplArgs {
    /// User name shown to others.
    #[arg(long)]
    pub user: String,

    /// Room to join; the default room when omitted.
    #[arg(long, default_value = "")]
    pub room: String,

    /// Print each delivery as a JSON object instead of a chat line.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub hub: HubArgs,
}

impl HubArgs {
    pub fn to_config(&self) -> HubConfig {
        HubConfig::default()
            .with_default_room(&self.default_room)
            .with_max_history(self.max_history)
    }
}

impl ReplArgs {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}
