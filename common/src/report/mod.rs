//! Collecting issues found while checking

use parking_lot::Mutex;
use std::fmt::{Display, Formatter};

/// The severity of an issue.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn level(&self) -> log::Level {
        match self {
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single reported issue.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// A place to report issues to.
///
/// Reporting never influences the control flow of the caller.
pub trait IssueSink {
    fn add(&self, severity: Severity, message: String);

    fn info(&self, message: String) {
        self.add(Severity::Info, message)
    }

    fn warn(&self, message: String) {
        self.add(Severity::Warning, message)
    }

    fn error(&self, message: String) {
        self.add(Severity::Error, message)
    }
}

/// An [`IssueSink`] collecting all issues, in the order they got reported.
#[derive(Debug, Default)]
pub struct Messages {
    /// Name of the topic, used for logging.
    topic: &'static str,
    issues: Mutex<Vec<Issue>>,
}

impl Messages {
    pub fn new(topic: &'static str) -> Self {
        Self {
            topic,
            issues: Default::default(),
        }
    }

    pub fn topic(&self) -> &'static str {
        self.topic
    }

    /// Get a copy of the issues reported so far.
    pub fn issues(&self) -> Vec<Issue> {
        self.issues.lock().clone()
    }

    /// Count the issues with the provided severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .lock()
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.lock().is_empty()
    }
}

impl IssueSink for Messages {
    fn add(&self, severity: Severity, message: String) {
        log::log!(severity.level(), "{}: {message}", self.topic);
        self.issues.lock().push(Issue { severity, message });
    }
}

impl<T: IssueSink + ?Sized> IssueSink for &T {
    fn add(&self, severity: Severity, message: String) {
        (**self).add(severity, message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collects_in_order() {
        let messages = Messages::new("test");
        messages.warn("first".into());
        messages.info("second".into());
        messages.error("third".into());

        assert_eq!(
            messages.issues(),
            vec![
                Issue {
                    severity: Severity::Warning,
                    message: "first".into()
                },
                Issue {
                    severity: Severity::Info,
                    message: "second".into()
                },
                Issue {
                    severity: Severity::Error,
                    message: "third".into()
                },
            ]
        );
        assert_eq!(messages.count(Severity::Error), 1);
    }

    #[test]
    fn empty() {
        let messages = Messages::new("test");
        assert!(messages.is_empty());
        assert_eq!(messages.count(Severity::Error), 0);
    }
}
