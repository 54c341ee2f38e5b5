//! Colorful console output for specification diagnostics.
//!
//! Provides a custom `tracing` layer that formats SpecForge events with
//! colors.
//!
//! ## Log Levels
//!
//! - **DEBUG**: Predicate compilation and rejected expressions
//! - **TRACE**: Individual combinator merges

use owo_colors::OwoColorize;
use specforge_config::SpecConfig;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

const DEFAULT_FILTER: &str = "specforge=info,specforge_core=info";

/// Initializes console output with the default filter.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default filter when set.
pub fn init() {
    install(DEFAULT_FILTER);
}

/// Initializes console output using the log filter from `config`.
pub fn init_with(config: &SpecConfig) {
    install(config.logging.filter.as_deref().unwrap_or(DEFAULT_FILTER));
}

fn install(default_filter: &str) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SpecConsoleLayer)
            .try_init();
    });
}

// Returns elapsed time since initialization.
fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

/// A tracing layer that formats SpecForge events with colors.
pub struct SpecConsoleLayer;

impl<S: Subscriber> Layer<S> for SpecConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Accept events from specforge crates only
        if !metadata.target().starts_with("specforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        let _ = writeln!(
            io::stdout(),
            "{} {}",
            format!("{:>8.3}s", elapsed_secs()).bright_black(),
            output
        );
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(s);
        } else {
            self.fields
                .push((field.name(), s.trim_matches('"').to_string()));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let badge = match level {
        Level::ERROR => "ERROR".bright_red().bold().to_string(),
        Level::WARN => " WARN".bright_yellow().bold().to_string(),
        Level::INFO => " INFO".bright_green().to_string(),
        Level::DEBUG => "DEBUG".bright_blue().to_string(),
        Level::TRACE => "TRACE".bright_black().to_string(),
    };

    let mut output = format!("{} {}", badge, v.message.as_deref().unwrap_or("").bold());
    for (name, value) in &v.fields {
        let styled = match *name {
            "error" => value.bright_red().to_string(),
            "expr" => value.bright_cyan().to_string(),
            "entity" => value.bright_magenta().to_string(),
            _ => value.bright_yellow().to_string(),
        };
        let _ = write!(output, " │ {}={}", name.bright_black(), styled);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_format_event_lists_fields_in_order() {
        let visitor = EventVisitor {
            message: Some("compiling predicate".to_string()),
            fields: vec![("entity", "Person".to_string()), ("nodes", "3".to_string())],
        };
        let line = strip_ansi(&format_event(&visitor, Level::DEBUG));
        assert_eq!(line, "DEBUG compiling predicate │ entity=Person │ nodes=3");
    }

    #[test]
    fn test_format_event_without_fields() {
        let visitor = EventVisitor {
            message: Some("merged predicates".to_string()),
            fields: Vec::new(),
        };
        let line = strip_ansi(&format_event(&visitor, Level::TRACE));
        assert_eq!(line, "TRACE merged predicates");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_with(&SpecConfig::new().with_log_filter("specforge=trace"));
        init();
        assert!(INIT.get().is_some());
    }
}
