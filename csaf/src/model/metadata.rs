use crate::model::tlp::TlpLabel;
use chrono::{DateTime, Utc};
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Distribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolie: Option<Rolie>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Rolie {
    #[serde(default)]
    pub categories: Vec<Url>,
    #[serde(default)]
    pub feeds: Vec<Feed>,
    #[serde(default)]
    pub services: Vec<Url>,
}

/// A ROLIE feed, as announced by the provider metadata.
///
/// The URL is kept as it was found, as it is the job of the checker to report invalid ones.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Feed {
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tlp_label: Option<TlpLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Feed {
    /// The URL of the feed, if there is a non-empty one.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// The declared label, absent meaning unlabeled.
    pub fn label(&self) -> TlpLabel {
        TlpLabel::from_optional(self.tlp_label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Publisher {
    pub category: String,
    pub contact_details: String,
    #[serde(default)]
    pub issuing_authority: String,
    pub name: String,
    pub namespace: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ProviderMetadata {
    pub canonical_url: Url,

    #[serde(default)]
    pub distributions: Vec<Distribution>,

    pub last_updated: DateTime<Utc>,

    #[serde(rename = "list_on_CSAF_aggregators")]
    #[serde(default)]
    pub list_on_csaf_aggregators: bool,

    pub metadata_version: String,

    #[serde(rename = "mirror_on_CSAF_aggregators")]
    #[serde(default)]
    pub mirror_on_csaf_aggregators: bool,

    pub publisher: Publisher,

    /// Contains the role of the issuing party according to section 7 in the CSAF standard.
    #[serde(default = "default_role")]
    pub role: Role,
}

impl ProviderMetadata {
    /// All ROLIE feed collections, one per distribution having ROLIE information.
    pub fn rolie_feeds(&self) -> Vec<Vec<Feed>> {
        self.distributions
            .iter()
            .filter_map(|distribution| distribution.rolie.as_ref())
            .map(|rolie| rolie.feeds.clone())
            .collect()
    }
}

const fn default_role() -> Role {
    Role::Provider
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum Role {
    #[serde(rename = "csaf_publisher")]
    Publisher,
    #[serde(rename = "csaf_provider")]
    Provider,
    #[serde(rename = "csaf_trusted_provider")]
    TrustedProvider,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_provider_metadata() {
        let metadata: ProviderMetadata =
            serde_json::from_str(include_str!("../../../test-data/provider-metadata.json"))
                .expect("example data must parse");

        assert_eq!(metadata.role, Role::TrustedProvider);

        let feeds = metadata.rolie_feeds();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].len(), 2);
        assert_eq!(feeds[0][0].label(), TlpLabel::White);
        assert_eq!(feeds[0][0].url(), Some("white/csaf-feed-tlp-white.json"));
        assert_eq!(feeds[0][1].label(), TlpLabel::Amber);
    }

    #[test]
    fn empty_feed_url() {
        let feed: Feed = serde_json::from_str(r#"{"summary": "x", "url": " "}"#)
            .expect("feed must parse");
        assert_eq!(feed.url(), None);
        assert_eq!(feed.label(), TlpLabel::Unlabeled);
    }
}
