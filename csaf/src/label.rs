//! Checking advisory labels against the label of their feed

use crate::model::tlp::TlpLabel;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;
use walker_common::report::IssueSink;

/// Advisory URLs, grouped by their actual TLP label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    advisories: BTreeMap<TlpLabel, BTreeSet<Url>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an advisory. Returns `false` if it was already known for that label.
    pub fn record(&mut self, label: TlpLabel, advisory: Url) -> bool {
        self.advisories.entry(label).or_default().insert(advisory)
    }

    /// The advisories recorded for a label, possibly empty.
    pub fn get(&self, label: TlpLabel) -> impl Iterator<Item = &Url> {
        self.advisories.get(&label).into_iter().flatten()
    }

    /// The number of advisories recorded for a label.
    pub fn len(&self, label: TlpLabel) -> usize {
        self.advisories.get(&label).map(BTreeSet::len).unwrap_or_default()
    }

    /// Add all advisories of another inventory.
    pub fn merge(&mut self, other: Inventory) {
        for (label, advisories) in other.advisories {
            self.advisories.entry(label).or_default().extend(advisories);
        }
    }
}

/// Checks the label of advisories found in a single feed.
///
/// Every advisory is recorded by its actual label, no matter the outcome of the check.
pub struct LabelChecker<'r> {
    feed_url: Url,
    feed_label: TlpLabel,
    advisories: Inventory,
    report: &'r dyn IssueSink,
}

impl<'r> LabelChecker<'r> {
    pub fn new(feed_url: Url, feed_label: TlpLabel, report: &'r dyn IssueSink) -> Self {
        Self {
            feed_url,
            feed_label,
            advisories: Inventory::new(),
            report,
        }
    }

    pub fn check(&mut self, advisory_label: TlpLabel, advisory: &Url) {
        let advisory_rank = advisory_label.rank();
        let feed_rank = self.feed_label.rank();

        self.advisories.record(advisory_label, advisory.clone());

        if advisory_rank < feed_rank {
            if advisory_rank == 0 {
                self.report.info(format!(
                    "Found unlabeled advisory {advisory} in feed {feed}.",
                    feed = self.feed_url
                ));
            } else {
                self.report.warn(format!(
                    "Found advisory {advisory} labeled TLP:{advisory_label} in feed {feed} (TLP:{feed_label}).",
                    feed = self.feed_url,
                    feed_label = self.feed_label,
                ));
            }
        } else if advisory_rank > feed_rank {
            self.report.error(format!(
                "{advisory} of TLP level {advisory_label} must not be listed in feed {feed} of TLP level {feed_label}.",
                feed = self.feed_url,
                feed_label = self.feed_label,
            ));
        }
    }

    pub fn into_inventory(self) -> Inventory {
        self.advisories
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use walker_common::report::{Messages, Severity};

    fn url(s: &str) -> Url {
        Url::parse(s).expect("test URL must parse")
    }

    fn check(advisory_label: TlpLabel, feed_label: TlpLabel) -> Messages {
        let messages = Messages::new("feed");
        let mut checker = LabelChecker::new(
            url("https://example.com/feed.json"),
            feed_label,
            &messages,
        );
        checker.check(advisory_label, &url("https://example.com/a.json"));
        assert_eq!(checker.into_inventory().len(advisory_label), 1);
        messages
    }

    #[test]
    fn all_combinations() {
        for advisory in TlpLabel::ALL {
            for feed in TlpLabel::ALL {
                let issues = check(advisory, feed).issues();
                match advisory.rank().cmp(&feed.rank()) {
                    std::cmp::Ordering::Equal => assert!(issues.is_empty()),
                    std::cmp::Ordering::Less => {
                        assert_eq!(issues.len(), 1);
                        let expected = if advisory.rank() == 0 {
                            Severity::Info
                        } else {
                            Severity::Warning
                        };
                        assert_eq!(issues[0].severity, expected, "{advisory} in {feed}");
                    }
                    std::cmp::Ordering::Greater => {
                        assert_eq!(issues.len(), 1);
                        assert_eq!(issues[0].severity, Severity::Error);
                        assert!(issues[0].message.contains(advisory.as_str()));
                        assert!(issues[0].message.contains(feed.as_str()));
                    }
                }
            }
        }
    }

    #[test]
    fn leak_names_everything() {
        let issues = check(TlpLabel::Red, TlpLabel::Green).issues();
        assert_eq!(
            issues[0].message,
            "https://example.com/a.json of TLP level RED must not be listed in feed https://example.com/feed.json of TLP level GREEN."
        );
    }

    #[test]
    fn records_by_actual_label() {
        let messages = Messages::new("feed");
        let mut checker = LabelChecker::new(
            url("https://example.com/green.json"),
            TlpLabel::Green,
            &messages,
        );
        checker.check(TlpLabel::Green, &url("https://example.com/x.json"));
        checker.check(TlpLabel::Amber, &url("https://example.com/y.json"));
        checker.check(TlpLabel::Amber, &url("https://example.com/y.json"));

        let inventory = checker.into_inventory();
        assert_eq!(inventory.len(TlpLabel::Green), 1);
        assert_eq!(inventory.len(TlpLabel::Amber), 1);
        assert_eq!(inventory.len(TlpLabel::Red), 0);
        assert_eq!(messages.count(Severity::Error), 2);
    }

    #[test]
    fn merge_inventories() {
        let mut a = Inventory::new();
        a.record(TlpLabel::White, url("https://example.com/1.json"));
        let mut b = Inventory::new();
        b.record(TlpLabel::White, url("https://example.com/1.json"));
        b.record(TlpLabel::White, url("https://example.com/2.json"));
        b.record(TlpLabel::Red, url("https://example.com/3.json"));

        a.merge(b);

        assert_eq!(a.len(TlpLabel::White), 2);
        assert_eq!(a.len(TlpLabel::Red), 1);
        assert_eq!(a.get(TlpLabel::Green).count(), 0);
    }
}
