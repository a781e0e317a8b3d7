use std::fmt::Write as _;
use tracing::{Event, Subscriber};
use tracing_subscriber::{layer::Context, Layer, EnvFilter, Registry};
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "warn,spinner=info,shared=info";

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: &dyn std::fmt::Display) {
        let _ = write!(self.fields, " {}={}", name, value);
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else if !field.name().starts_with("log.") {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else if !field.name().starts_with("log.") {
            self.push_field(field.name(), &value);
        }
    }
}

struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if visitor.message.is_empty() && visitor.fields.is_empty() {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!("{}{}", visitor.message, visitor.fields);

        // stdout belongs to the wheel display
        match metadata.level().as_str() {
            "ERROR" => eprintln!("[{}] ❌ Error: {} - {}", timestamp, metadata.target(), line),
            "WARN" => eprintln!("[{}] ⚠️ Warning: {} - {}", timestamp, metadata.target(), line),
            "INFO" => eprintln!("[{}] ℹ️ {} - {}", timestamp, metadata.target(), line),
            "DEBUG" => eprintln!("[{}] 🔄 {} - {}", timestamp, metadata.target(), line),
            _ => {}
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter;
/// `log` records from the shared crate are bridged in.
pub fn setup() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = Registry::default()
        .with(env_filter)
        .with(ConsoleLayer);

    if let Err(e) = subscriber.try_init() {
        eprintln!("logging already initialised: {}", e);
    }
}
