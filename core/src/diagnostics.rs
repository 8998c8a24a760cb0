//! diagnostics.rs
//! Injected sink for human-readable decode diagnostics.
//!
//! A session reports extended/start address records through `info` and
//! malformed, unknown or failed records through `warn`.

pub trait DiagnosticSink {
    fn info(&mut self, msg: &str);
    fn warn(&mut self, msg: &str);
}

/// Forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn info(&mut self, msg: &str) {
        log::info!("{}", msg);
    }

    fn warn(&mut self, msg: &str) {
        log::warn!("{}", msg);
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn info(&mut self, _msg: &str) {}
    fn warn(&mut self, _msg: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
}

/// Keeps every message in arrival order.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub messages: Vec<(Severity, String)>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> impl Iterator<Item = &str> {
        self.by_severity(Severity::Info)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.by_severity(Severity::Warn)
    }

    fn by_severity(&self, s: Severity) -> impl Iterator<Item = &str> {
        self.messages.iter().filter(move |(sev, _)| *sev == s).map(|(_, m)| m.as_str())
    }
}

impl DiagnosticSink for CollectingSink {
    fn info(&mut self, msg: &str) {
        self.messages.push((Severity::Info, msg.to_string()));
    }

    fn warn(&mut self, msg: &str) {
        self.messages.push((Severity::Warn, msg.to_string()));
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn info(&mut self, msg: &str) {
        (**self).info(msg)
    }

    fn warn(&mut self, msg: &str) {
        (**self).warn(msg)
    }
}
