//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use crate::progress::indicator::ThinkingIndicator;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use yara_application::{ChatSession, ImportOutcome, SubmitOutcome, TranscriptImport};
use yara_domain::{Context, TimeOfDay};

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text to send to Buddy
    Say(String),
    Help,
    Quit,
    Insights,
    Context,
    City(String),
    Place(String),
    /// Fixed time label; `None` goes back to the clock
    Time(Option<String>),
    Import(PathBuf),
    Health,
    /// A slash command that needs an argument it did not get
    MissingArgument(&'static str),
    Unknown(String),
}

impl ReplCommand {
    /// Parse one line of input. Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if !trimmed.starts_with('/') {
            return Some(ReplCommand::Say(line.to_string()));
        }

        let (name, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (trimmed, ""),
        };
        let with_arg = |usage: &'static str, build: fn(String) -> ReplCommand| {
            if arg.is_empty() {
                ReplCommand::MissingArgument(usage)
            } else {
                build(arg.to_string())
            }
        };

        let command = match name {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/insights" => ReplCommand::Insights,
            "/context" => ReplCommand::Context,
            "/health" => ReplCommand::Health,
            "/city" => with_arg("/city <name>", ReplCommand::City),
            "/place" => with_arg("/place <name>", ReplCommand::Place),
            "/import" => with_arg("/import <path>", |p| ReplCommand::Import(PathBuf::from(p))),
            "/time" => match arg {
                "" => ReplCommand::MissingArgument("/time <label|auto>"),
                "auto" => ReplCommand::Time(None),
                label => ReplCommand::Time(Some(label.to_string())),
            },
            other => ReplCommand::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: ChatSession,
    import: TranscriptImport,
    output: OutputConfig,
    repl: ReplConfig,
    indicator: Option<Arc<ThinkingIndicator>>,
    /// Timeline entries already printed
    rendered: usize,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(session: ChatSession) -> Self {
        let import = TranscriptImport::new(session.clone());
        Self {
            session,
            import,
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
            indicator: None,
            rendered: 0,
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    /// Spinner shared with the notifier so toasts do not garble it
    pub fn with_indicator(mut self, indicator: Arc<ThinkingIndicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.repl.history_file.clone();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let follower = match (&self.indicator, self.repl.show_progress) {
            (Some(indicator), true) => Some(indicator.follow(self.session.subscribe())),
            _ => None,
        };

        self.session.start();
        self.print_welcome();

        loop {
            match rl.readline(&format!("{} ", "you>".green().bold())) {
                Ok(line) => {
                    let Some(command) = ReplCommand::parse(&line) else {
                        continue;
                    };
                    if matches!(command, ReplCommand::Say(_)) {
                        let _ = rl.add_history_entry(line.trim());
                    }
                    if self.handle(command).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(follower) = follower {
            follower.abort();
        }
        self.stop_indicator();

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&mut self) {
        println!();
        println!("{}", ConsoleFormatter::header(self.session.client_id().as_str()));
        println!("{}", "Type /help for commands, /quit to leave.".dimmed());
        println!();
        self.render_new(true);
    }

    /// Print timeline entries added since the last call.
    ///
    /// User messages are skipped unless `include_user` is set: the prompt
    /// line already shows them.
    fn render_new(&mut self, include_user: bool) {
        let state = self.session.state();
        for message in state.timeline.iter().skip(self.rendered) {
            if message.is_user() && !include_user {
                continue;
            }
            println!(
                "{}\n",
                ConsoleFormatter::format_message(message, self.output.show_reasoning)
            );
        }
        self.rendered = state.timeline.len();
    }

    fn stop_indicator(&self) {
        if let Some(indicator) = &self.indicator {
            indicator.stop();
        }
    }

    /// Handle one command. Returns true if the REPL should exit.
    async fn handle(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Say(text) => self.say(&text).await,
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Insights => {
                self.session.refresh_insights().await;
                let insights = self.session.insights().unwrap_or_default();
                println!("\n{}", ConsoleFormatter::format_insights(&insights));
            }
            ReplCommand::Context => self.print_context(),
            ReplCommand::City(city) => {
                self.session
                    .context_store()
                    .update(&Context::new().with_city(city));
                self.print_context();
            }
            ReplCommand::Place(place) => {
                self.session
                    .context_store()
                    .update(&Context::new().with_place(place));
                self.print_context();
            }
            ReplCommand::Time(label) => {
                if let Some(label) = &label
                    && label.parse::<TimeOfDay>().is_err()
                {
                    println!(
                        "{}",
                        format!("'{}' is not a standard time of day; sending it as-is.", label)
                            .yellow()
                    );
                }
                let store = self.session.context_store();
                let current = store.snapshot();
                store.replace(Context {
                    time: label,
                    ..current
                });
                self.print_context();
            }
            ReplCommand::Import(path) => self.import_file(&path).await,
            ReplCommand::Health => {
                let healthy = self.session.check_health().await;
                if healthy {
                    println!("{}", "Buddy's brain is online.".green());
                } else {
                    println!("{}", "Buddy's brain is not answering right now.".red());
                }
            }
            ReplCommand::MissingArgument(usage) => println!("Usage: {}", usage),
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn say(&mut self, text: &str) {
        self.session.set_pending_input(text);
        let outcome = self.session.submit(text).await;
        self.stop_indicator();
        debug!("Submit outcome: {:?}", outcome);

        match outcome {
            SubmitOutcome::Busy => {
                println!("{}", "Still waiting for Buddy's last reply...".yellow());
            }
            SubmitOutcome::Ignored => {}
            _ => {
                println!();
                self.render_new(false);
            }
        }
    }

    async fn import_file(&mut self, path: &Path) {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                println!(
                    "{}",
                    format!("Could not read {}: {}", path.display(), e).red()
                );
                return;
            }
        };

        self.import.open();
        self.import.set_input(text.clone());
        if let Some(indicator) = &self.indicator {
            indicator.start();
        }
        let outcome = self.import.import(&text).await;
        self.stop_indicator();

        match outcome {
            ImportOutcome::Imported => {}
            ImportOutcome::Ignored => println!("{}", "That file is empty.".yellow()),
            ImportOutcome::Busy => println!("{}", "An import is already running.".yellow()),
            ImportOutcome::Rejected(_) | ImportOutcome::Failed(_) => {
                if let Some(error) = self.import.state().error {
                    println!("{}", error.red());
                }
                println!("{}", "Run /import again to retry.".dimmed());
            }
        }
    }

    fn print_context(&self) {
        let context = self
            .session
            .context_store()
            .snapshot()
            .resolve(TimeOfDay::now());
        println!("\n{}\n", ConsoleFormatter::format_context(&context));
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?        - Show this help");
        println!("  /insights            - What Buddy has learned about you");
        println!("  /context             - Show the context sent with messages");
        println!("  /city <name>         - Set your city");
        println!("  /place <name>        - Set where you are (home, cafe, office, ...)");
        println!("  /time <label|auto>   - Fix the time of day, or follow the clock");
        println!("  /import <path>       - Let Buddy analyze an exported chat");
        println!("  /health              - Check that Buddy's brain is reachable");
        println!("  /quit, /exit, /q     - Exit chat");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use yara_application::{ChatTransport, ContextStore, InsightCache, TransportError};
    use yara_domain::{ChatReply, ClientId, LearningInsights, ResolvedContext};

    /// Transport that answers every import with a canned reply
    struct ImportStub(ChatReply);

    #[async_trait]
    impl ChatTransport for ImportStub {
        async fn send_message(
            &self,
            _client_id: &ClientId,
            _text: &str,
            _context: &ResolvedContext,
        ) -> Result<ChatReply, TransportError> {
            Err(TransportError::Other("not used".to_string()))
        }

        async fn import_transcript(
            &self,
            _client_id: &ClientId,
            _chat_text: &str,
        ) -> Result<ChatReply, TransportError> {
            Ok(self.0.clone())
        }

        async fn fetch_insights(
            &self,
            _client_id: &ClientId,
        ) -> Result<LearningInsights, TransportError> {
            Ok(LearningInsights::default())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    struct NoContext;

    impl ContextStore for NoContext {
        fn snapshot(&self) -> Context {
            Context::new()
        }

        fn replace(&self, _context: Context) {}
    }

    struct NoInsights;

    impl InsightCache for NoInsights {
        fn replace(&self, _insights: LearningInsights) {}

        fn current(&self) -> Option<LearningInsights> {
            None
        }
    }

    fn repl_with(reply: ChatReply) -> ChatRepl {
        let session = ChatSession::new(
            ClientId::parse("user_repl").unwrap(),
            Arc::new(ImportStub(reply)),
            Arc::new(NoContext),
            Arc::new(NoInsights),
        );
        ChatRepl::new(session)
    }

    fn transcript() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[10:01] Sam: you never clean up").unwrap();
        file
    }

    #[tokio::test]
    async fn test_rejected_import_keeps_surface_open() {
        let mut repl = repl_with(ChatReply::failure("Unsupported export format"));
        let file = transcript();

        repl.import_file(file.path()).await;

        let state = repl.import.state();
        assert!(state.is_open);
        assert!(!state.is_analyzing);
        assert_eq!(state.error.as_deref(), Some("Unsupported export format"));
        assert!(state.input.contains("Sam: you never clean up"));
    }

    #[tokio::test]
    async fn test_successful_import_closes_surface() {
        let mut repl = repl_with(ChatReply::text("Analyzed"));
        let file = transcript();

        repl.import_file(file.path()).await;

        let state = repl.import.state();
        assert!(!state.is_open);
        assert!(state.error.is_none());
        assert_eq!(repl.session.state().timeline.len(), 1);
        repl.session.wait_for_background().await;
    }

    #[test]
    fn test_plain_text_is_kept_verbatim() {
        assert_eq!(
            ReplCommand::parse("  hey there "),
            Some(ReplCommand::Say("  hey there ".to_string()))
        );
        assert_eq!(ReplCommand::parse("   "), None);
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            ReplCommand::parse("/city New Delhi"),
            Some(ReplCommand::City("New Delhi".to_string()))
        );
        assert_eq!(
            ReplCommand::parse("/import ~/chat.txt"),
            Some(ReplCommand::Import(PathBuf::from("~/chat.txt")))
        );
        assert_eq!(
            ReplCommand::parse("/time night"),
            Some(ReplCommand::Time(Some("night".to_string())))
        );
        assert_eq!(ReplCommand::parse("/time auto"), Some(ReplCommand::Time(None)));
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            ReplCommand::parse("/place"),
            Some(ReplCommand::MissingArgument("/place <name>"))
        );
        assert!(matches!(
            ReplCommand::parse("/time  "),
            Some(ReplCommand::MissingArgument(_))
        ));
    }

    #[test]
    fn test_aliases_and_unknown() {
        assert_eq!(ReplCommand::parse("/q"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/?"), Some(ReplCommand::Help));
        assert_eq!(
            ReplCommand::parse("/models"),
            Some(ReplCommand::Unknown("/models".to_string()))
        );
    }
}
