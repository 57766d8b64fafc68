/// Progress reporting for migration runs, usable from the CLI and as a library
pub trait OutputHandler: Send + Sync {
    /// Start of a section, e.g. one migration file
    fn heading(&self, message: &str);

    /// Neutral progress message
    fn info(&self, message: &str);

    /// A statement is about to be sent (`position` is 1-based)
    fn statement(&self, position: usize, total: usize, preview: &str);

    fn success(&self, message: &str);

    /// Something failed but the run continues
    fn warning(&self, message: &str);

    fn error(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Heading(String),
    Info(String),
    Statement { position: usize, total: usize, preview: String },
    Success(String),
    Warning(String),
    Error(String),
}

/// Library output handler that collects events
#[derive(Default)]
pub struct LibraryOutputHandler {
    events: std::sync::Mutex<Vec<OutputEvent>>,
}

impl LibraryOutputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OutputEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    fn push(&self, event: OutputEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl OutputHandler for LibraryOutputHandler {
    fn heading(&self, message: &str) {
        self.push(OutputEvent::Heading(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.push(OutputEvent::Info(message.to_string()));
    }

    fn statement(&self, position: usize, total: usize, preview: &str) {
        self.push(OutputEvent::Statement {
            position,
            total,
            preview: preview.to_string(),
        });
    }

    fn success(&self, message: &str) {
        self.push(OutputEvent::Success(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(OutputEvent::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(OutputEvent::Error(message.to_string()));
    }
}

/// CLI output handler that prints to stdout with colors
#[cfg(feature = "cli")]
pub struct CliOutputHandler;

#[cfg(feature = "cli")]
impl OutputHandler for CliOutputHandler {
    fn heading(&self, message: &str) {
        use owo_colors::OwoColorize;
        println!("\n{}", message.bold());
    }

    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn statement(&self, position: usize, total: usize, preview: &str) {
        use owo_colors::OwoColorize;
        println!("  {} {}/{}: {}", "→".cyan(), position, total, preview.dimmed());
    }

    fn success(&self, message: &str) {
        use owo_colors::OwoColorize;
        println!("  {} {}", "✓".green(), message);
    }

    fn warning(&self, message: &str) {
        use owo_colors::OwoColorize;
        println!("  {} {}", "⚠".yellow(), message.yellow());
    }

    fn error(&self, message: &str) {
        use owo_colors::OwoColorize;
        eprintln!("  {} {}", "✗".red(), message.red());
    }
}

/// Silent output handler that discards all output
pub struct SilentOutputHandler;

impl OutputHandler for SilentOutputHandler {
    fn heading(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn statement(&self, _position: usize, _total: usize, _preview: &str) {}
    fn success(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
