//! Console output formatter for conversation messages

use colored::Colorize;
use yara_domain::{LearningInsights, Message, ResolvedContext, humanize_label};

/// Display name of the agent persona
const AGENT_NAME: &str = "Buddy";

/// Formats the conversation for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner printed when the interactive chat opens
    pub fn header(client_id: &str) -> String {
        let line = "─".repeat(45);
        format!(
            "{}\n{:^45}\n{}\n{}",
            line.magenta(),
            "YARA · chat with Buddy".bold(),
            line.magenta(),
            format!("id: {}", client_id).dimmed()
        )
    }

    /// Format one timeline entry
    ///
    /// Agent messages get a mode badge and, when `show_reasoning` is set and
    /// the reply carried one, a reasoning strip.
    pub fn format_message(message: &Message, show_reasoning: bool) -> String {
        let time = message.timestamp.format("%H:%M").to_string();

        if message.is_user() {
            return format!(
                "{} {}\n{}",
                "You".green().bold(),
                time.dimmed(),
                Self::indent(&message.text, "  ")
            );
        }

        let mut output = AGENT_NAME.magenta().bold().to_string();
        if let Some(mode) = &message.mode {
            output.push_str(&format!(" {}", Self::mode_badge(mode)));
        }
        output.push_str(&format!(" {}\n", time.dimmed()));
        output.push_str(&Self::indent(&message.text, "  "));

        if show_reasoning && let Some(reasoning) = &message.reasoning {
            output.push_str(&format!(
                "\n  {} {} {} {} {} {}",
                "↳".dimmed(),
                reasoning.understood.dimmed(),
                "·".dimmed(),
                reasoning.risk.dimmed(),
                "·".dimmed(),
                reasoning.strategy.dimmed().italic()
            ));
        }

        output
    }

    /// `[venting listener]`
    pub fn mode_badge(mode: &str) -> String {
        format!("[{}]", humanize_label(mode)).cyan().to_string()
    }

    /// Format what the service has learned so far
    pub fn format_insights(insights: &LearningInsights) -> String {
        if insights.is_empty() {
            return format!(
                "{}\n",
                "Buddy is still getting to know you. Keep chatting!".dimmed()
            );
        }

        let mut output = format!("{}\n", "What Buddy has learned".cyan().bold());
        output.push_str(&format!(
            "  {} {}\n",
            "Conversations:".bold(),
            insights.total_interactions
        ));

        let sections: [(&str, &[String]); 4] = [
            ("Common situations", &insights.common_scenarios),
            ("Common emotions", &insights.common_emotions),
            ("Modes that help", &insights.preferred_modes),
            ("Adaptations", &insights.adaptations_learned),
        ];
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("  {}\n", format!("{}:", title).bold()));
            for item in items {
                output.push_str(&format!("    * {}\n", humanize_label(item)));
            }
        }

        output
    }

    /// Format the context that will be attached to the next message
    pub fn format_context(context: &ResolvedContext) -> String {
        let city = if context.city.is_empty() {
            "(not set)"
        } else {
            context.city.as_str()
        };
        format!(
            "{} {}\n{} {}\n{} {}",
            "City: ".bold(),
            city,
            "Place:".bold(),
            context.place,
            "Time: ".bold(),
            context.time
        )
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yara_domain::{ChatReply, Reasoning};

    fn plain() {
        colored::control::set_override(false);
    }

    fn roommate_message() -> Message {
        ChatReply {
            reply: Some("That sounds hard.\nWant to talk it through?".to_string()),
            mode: Some("venting_listener".to_string()),
            emotion: Some("frustration".to_string()),
            intensity: Some(0.7),
            relationship: Some("roommate".to_string()),
            ..ChatReply::default()
        }
        .to_agent_message()
    }

    #[test]
    fn test_agent_message_has_badge_and_reasoning() {
        plain();
        let output = ConsoleFormatter::format_message(&roommate_message(), true);
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[0].starts_with("Buddy [venting listener] "));
        assert_eq!(lines[1], "  That sounds hard.");
        assert_eq!(lines[2], "  Want to talk it through?");
        assert_eq!(
            lines[3],
            "  ↳ frustration • roommate context · high risk · venting listener"
        );
    }

    #[test]
    fn test_reasoning_can_be_hidden() {
        plain();
        let output = ConsoleFormatter::format_message(&roommate_message(), false);
        assert!(!output.contains("↳"));
    }

    #[test]
    fn test_user_message() {
        plain();
        let message = Message::user("I had a fight with my roommate").unwrap();
        let output = ConsoleFormatter::format_message(&message, true);
        assert!(output.starts_with("You "));
        assert!(output.ends_with("\n  I had a fight with my roommate"));
    }

    #[test]
    fn test_agent_without_mode_or_reasoning() {
        plain();
        let message = Message::agent("Hey!").with_reasoning(Reasoning {
            understood: "joy • friend context".to_string(),
            risk: "low risk".to_string(),
            strategy: "hype friend".to_string(),
        });
        let output = ConsoleFormatter::format_message(&message, true);
        assert!(!output.contains('['));
        assert!(output.contains("low risk"));
    }

    #[test]
    fn test_empty_insights() {
        plain();
        let output = ConsoleFormatter::format_insights(&LearningInsights::default());
        assert!(output.contains("still getting to know you"));
    }

    #[test]
    fn test_insights_sections() {
        plain();
        let insights = LearningInsights {
            total_interactions: 5,
            common_emotions: vec!["frustration".to_string()],
            adaptations_learned: vec!["needs_venting_space".to_string()],
            ..LearningInsights::default()
        };
        let output = ConsoleFormatter::format_insights(&insights);
        assert!(output.contains("Conversations: 5"));
        assert!(output.contains("Common emotions:\n    * frustration"));
        assert!(output.contains("* needs venting space"));
        assert!(!output.contains("Modes that help"));
    }

    #[test]
    fn test_context_marks_missing_city() {
        plain();
        let context = ResolvedContext {
            city: String::new(),
            place: "unknown".to_string(),
            time: "evening".to_string(),
        };
        let output = ConsoleFormatter::format_context(&context);
        assert!(output.contains("City:  (not set)"));
        assert!(output.contains("Time:  evening"));
    }
}
