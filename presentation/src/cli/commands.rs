//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for yara
#[derive(Parser, Debug)]
#[command(name = "yara")]
#[command(author, version, about = "Talk things through with Buddy, your social-situation companion")]
#[command(long_about = r#"
yara is a terminal client for Buddy, a companion that helps with social
situations: venting, drafting replies, reading a tense chat.

Without a message it starts an interactive chat. Every message carries your
ambient context (city, place, time of day) so Buddy can read the room.

Configuration files are loaded from (in priority order):
1. YARA_* environment variables (e.g. YARA_SERVER__BASE_URL)
2. --config <path>     Explicit config file
3. ./yara.toml         Project-level config
4. ~/.config/yara/config.toml   Global config

Example:
  yara "I had a fight with my roommate"
  yara --city Mumbai --place home
  yara --import ~/Downloads/whatsapp-chat.txt
  yara --insights
"#)]
pub struct Cli {
    /// Message to send (starts the interactive chat when omitted)
    pub message: Option<String>,

    /// Analyze an exported chat transcript instead of chatting
    #[arg(long, value_name = "PATH", conflicts_with_all = ["message", "insights"])]
    pub import: Option<PathBuf>,

    /// Show what Buddy has learned about you and exit
    #[arg(long, conflicts_with = "message")]
    pub insights: bool,

    /// City you are in
    #[arg(long, value_name = "NAME")]
    pub city: Option<String>,

    /// Kind of place you are at (home, cafe, office, ...)
    #[arg(long, value_name = "NAME")]
    pub place: Option<String>,

    /// Time-of-day label (morning, afternoon, evening, night)
    #[arg(long, value_name = "LABEL")]
    pub time: Option<String>,

    /// Base URL of the reasoning service
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the thinking indicator
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
