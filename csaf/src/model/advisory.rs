//! The parts of a CSAF advisory the checker needs

use crate::model::tlp::TlpLabel;
use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| {
    // checked by the tests
    Regex::new(r"[^+\-a-z0-9]+").expect("regular expression must be valid")
});

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct AdvisoryDocument {
    pub document: Document,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
    pub tracking: Tracking,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Distribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tlp: Option<Tlp>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Tlp {
    pub label: TlpLabel,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Tracking {
    pub id: String,
}

impl AdvisoryDocument {
    /// The TLP label of the document, unlabeled if missing.
    pub fn tlp_label(&self) -> TlpLabel {
        TlpLabel::from_optional(
            self.document
                .distribution
                .as_ref()
                .and_then(|distribution| distribution.tlp.as_ref())
                .map(|tlp| tlp.label),
        )
    }

    /// The file name the document is expected to have, derived from the tracking ID.
    ///
    /// The ID is lowercased and every run of characters outside of `[+\-a-z0-9]` is replaced by
    /// a single `_`.
    pub fn expected_file_name(&self) -> String {
        let id = self.document.tracking.id.trim().to_lowercase();
        let name = INVALID_CHARS.replace_all(&id, "_");

        format!("{name}.json")
    }
}
