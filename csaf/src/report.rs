//! The report of a check run

use serde::ser::SerializeStruct;
use std::fmt::{Display, Formatter};
use walker_common::report::{IssueSink, Messages, Severity};

/// Where to report issues, by topic.
#[derive(Copy, Clone)]
pub struct Sinks<'r> {
    /// Issues with the provider metadata document
    pub provider_metadata: &'r dyn IssueSink,
    /// Issues with the ROLIE feeds
    pub feed: &'r dyn IssueSink,
    /// Issues with the ROLIE service document
    pub service: &'r dyn IssueSink,
}

/// Issues collected during a check run.
#[derive(Debug)]
pub struct Report {
    pub provider_metadata: Messages,
    pub feed: Messages,
    pub service: Messages,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    pub fn new() -> Self {
        Self {
            provider_metadata: Messages::new("provider metadata"),
            feed: Messages::new("ROLIE feed"),
            service: Messages::new("ROLIE service document"),
        }
    }

    pub fn sinks(&self) -> Sinks<'_> {
        Sinks {
            provider_metadata: &self.provider_metadata,
            feed: &self.feed,
            service: &self.service,
        }
    }

    fn topics(&self) -> [&Messages; 3] {
        [&self.provider_metadata, &self.feed, &self.service]
    }

    /// Count issues of a severity, across all topics.
    pub fn count(&self, severity: Severity) -> usize {
        self.topics().iter().map(|m| m.count(severity)).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for messages in self.topics() {
            let issues = messages.issues();
            if issues.is_empty() {
                writeln!(f, "{}: ok", messages.topic())?;
                continue;
            }

            writeln!(f, "{}:", messages.topic())?;
            for issue in issues {
                writeln!(f, "  {issue}")?;
            }
        }

        Ok(())
    }
}

impl serde::Serialize for Report {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Report", 3)?;
        s.serialize_field("providerMetadata", &self.provider_metadata.issues())?;
        s.serialize_field("feed", &self.feed.issues())?;
        s.serialize_field("service", &self.service.issues())?;
        s.end()
    }
}
