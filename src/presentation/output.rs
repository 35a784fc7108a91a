//! Console Output
//!
//! Human-readable rendering of task and watch events. Warnings and errors
//! go to stderr, everything else to stdout.

use std::io::{self, Write};
use std::sync::Mutex;

use is_terminal::IsTerminal;

use crate::domain::ports::{MessageLevel, TaskEvent, TaskEventSink};
use crate::domain::value_objects::StepOutcome;
use crate::watcher::WatchEvent;

use super::cli::ColorWhen;
use super::theme::{colors, paint, Icon};

/// What the terminal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
}

pub fn detect_capabilities() -> TerminalCapabilities {
    detect_capabilities_impl(|key| std::env::var(key).ok(), io::stdout().is_terminal())
}

fn detect_capabilities_impl(
    get_env: impl Fn(&str) -> Option<String>,
    is_tty: bool,
) -> TerminalCapabilities {
    let term = get_env("TERM").unwrap_or_default();
    let term_is_dumb = term.eq_ignore_ascii_case("dumb");
    let no_color = get_env("NO_COLOR").is_some();
    let is_ci = ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "JENKINS_HOME", "BUILDKITE"]
        .iter()
        .any(|k| get_env(k).is_some());

    let supports_unicode = !term_is_dumb
        && ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|k| get_env(k))
            .next()
            .map(|v| {
                let v = v.to_lowercase();
                v.contains("utf-8") || v.contains("utf8")
            })
            .unwrap_or(true);

    TerminalCapabilities {
        is_tty,
        supports_color: is_tty && !term_is_dumb && !no_color,
        supports_unicode,
        is_ci,
    }
}

/// Rendering switches for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStyle {
    pub color: bool,
    pub unicode: bool,
    pub verbose: u8,
}

impl ConsoleStyle {
    pub fn new(color: Option<ColorWhen>, verbose: u8) -> Self {
        Self::from_caps(color, verbose, detect_capabilities())
    }

    pub(crate) fn from_caps(
        color: Option<ColorWhen>,
        verbose: u8,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => caps.supports_color && !caps.is_ci,
        };
        Self {
            color,
            unicode: caps.supports_unicode,
            verbose,
        }
    }

    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
            verbose: 0,
        }
    }
}

/// Event sink printing colored lines
pub struct ConsoleEventSink {
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
    style: ConsoleStyle,
}

impl ConsoleEventSink {
    pub fn stdio(style: ConsoleStyle) -> Self {
        Self::with_writers(io::stdout(), io::stderr(), style)
    }

    pub fn with_writers<O, E>(out: O, err: E, style: ConsoleStyle) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
            style,
        }
    }

    fn write(target: &Mutex<Box<dyn Write + Send>>, text: &str) {
        if let Ok(mut writer) = target.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.style.color, self.style.unicode)
    }

    /// Render one watch event the same way task events are rendered
    pub fn on_watch_event(&self, event: &WatchEvent) {
        let s = self.style;
        match event {
            WatchEvent::WatchStarted { path } => Self::write(
                &self.out,
                &format!("{} Watching {} (Ctrl+C to stop)", self.icon(Icon::Watch), path),
            ),
            WatchEvent::FileChanged { path } if s.verbose > 0 => Self::write(
                &self.out,
                &format!("{} {}", self.icon(Icon::Pending), paint(path, colors::DIM, s.color)),
            ),
            WatchEvent::FileChanged { .. } | WatchEvent::SyncStarted => {}
            WatchEvent::SyncComplete { failed: false } => Self::write(
                &self.out,
                &format!("{} Local stage in sync", self.icon(Icon::Success)),
            ),
            WatchEvent::SyncComplete { failed: true } => {}
            WatchEvent::Error { message } => Self::write(
                &self.err,
                &format!("{} {}", self.icon(Icon::Error), message),
            ),
            WatchEvent::Shutdown => Self::write(&self.out, "Stopped watching"),
        }
    }
}

impl TaskEventSink for ConsoleEventSink {
    fn on_event(&self, event: TaskEvent) {
        let s = self.style;
        match event {
            TaskEvent::StepStarted { command, step } => {
                let label = if command == step {
                    step
                } else {
                    format!("{} › {}", command, step)
                };
                Self::write(
                    &self.err,
                    &format!(
                        "{} {}",
                        self.icon(Icon::Progress),
                        paint(&label, colors::INFO, s.color)
                    ),
                );
            }
            TaskEvent::StepFinished { step, outcome, .. } => match outcome {
                StepOutcome::Success if s.verbose > 0 => Self::write(
                    &self.err,
                    &format!("{} {}", self.icon(Icon::Success), step),
                ),
                StepOutcome::Skipped(reason) if s.verbose > 0 => Self::write(
                    &self.err,
                    &format!("{} {} ({})", self.icon(Icon::Pending), step, reason),
                ),
                _ => {}
            },
            TaskEvent::Message { level, text } => match level {
                MessageLevel::Say => Self::write(&self.out, &text),
                MessageLevel::Note => {
                    Self::write(&self.out, &paint(&text, colors::DIM, s.color))
                }
                MessageLevel::Success => Self::write(
                    &self.out,
                    &format!("{} {}", self.icon(Icon::Success), text),
                ),
                MessageLevel::Warning => Self::write(
                    &self.err,
                    &format!(
                        "{} {}",
                        self.icon(Icon::Warning),
                        paint(&text, colors::WARNING, s.color)
                    ),
                ),
                MessageLevel::Error => Self::write(
                    &self.err,
                    &format!(
                        "{} {}",
                        self.icon(Icon::Error),
                        paint(&text, colors::ERROR, s.color)
                    ),
                ),
            },
            TaskEvent::Output { text } => {
                if let Ok(mut writer) = self.out.lock() {
                    let _ = write!(writer, "{}", text);
                    if !text.ends_with('\n') {
                        let _ = writeln!(writer);
                    }
                    let _ = writer.flush();
                }
            }
            TaskEvent::Exec { command, remote } => {
                let line = match remote {
                    Some(remote) => format!("[{}] {}", remote, command),
                    None => command,
                };
                Self::write(
                    &self.err,
                    &format!("{} {}", self.icon(Icon::Arrow), paint(&line, colors::DIM, s.color)),
                );
            }
        }
    }
}
