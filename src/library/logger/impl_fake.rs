use crate::library::logger::interface::{Level, Logger};
use std::sync::{Arc, Mutex};

/// Keeps every line in memory so tests can assert on what was reported.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines()
            .iter()
            .filter(|(_, line)| line.contains(needle))
            .count()
    }
}

impl Logger for LoggerFake {
    fn log(&self, level: Level, message: &str) {
        let line = match &self.namespace {
            Some(namespace) => format!("{}: {}", namespace, message),
            None => message.to_string(),
        };
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, line));
        }
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerFake {
            namespace: Some(new_namespace),
            lines: self.lines.clone(),
        })
    }
}
