//! Traffic Light Protocol labels

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// A TLP label, ordered from least to most restricted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TlpLabel {
    #[default]
    Unlabeled,
    White,
    Green,
    Amber,
    Red,
}

impl TlpLabel {
    /// All labels, least restricted first.
    pub const ALL: [TlpLabel; 5] = [
        Self::Unlabeled,
        Self::White,
        Self::Green,
        Self::Amber,
        Self::Red,
    ];

    /// The level of restriction, a higher rank is more restricted.
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Unlabeled => 0,
            Self::White => 1,
            Self::Green => 2,
            Self::Amber => 3,
            Self::Red => 4,
        }
    }

    /// An absent label is considered unlabeled.
    pub fn from_optional(label: Option<TlpLabel>) -> Self {
        label.unwrap_or_default()
    }

    /// Content with this label may be shared publicly.
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Unlabeled | Self::White | Self::Green)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unlabeled => "UNLABELED",
            Self::White => "WHITE",
            Self::Green => "GREEN",
            Self::Amber => "AMBER",
            Self::Red => "RED",
        }
    }

    /// Parse a label, treating anything unknown as unlabeled.
    pub fn parse_lossy(value: &str) -> Self {
        let value = value.trim();
        let value = value
            .strip_prefix("TLP:")
            .or_else(|| value.strip_prefix("tlp:"))
            .unwrap_or(value);

        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(value))
            .unwrap_or_default()
    }
}

impl Display for TlpLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TlpLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TlpLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rank_strictly_increasing() {
        let ranks = TlpLabel::ALL.map(|label| label.rank());
        assert_eq!(ranks, [0, 1, 2, 3, 4]);
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn order_follows_rank() {
        for a in TlpLabel::ALL {
            for b in TlpLabel::ALL {
                assert_eq!(a.cmp(&b), a.rank().cmp(&b.rank()));
            }
        }
    }

    #[test]
    fn absent_is_unlabeled() {
        assert_eq!(TlpLabel::from_optional(None), TlpLabel::Unlabeled);
        assert_eq!(TlpLabel::from_optional(None).rank(), 0);
        assert_eq!(
            TlpLabel::from_optional(Some(TlpLabel::Amber)),
            TlpLabel::Amber
        );
    }

    #[test]
    fn public_tiers() {
        assert_eq!(
            TlpLabel::ALL.map(|label| label.is_public()),
            [true, true, true, false, false]
        );
    }

    #[test]
    fn deserialize() {
        let labels: Vec<TlpLabel> =
            serde_json::from_str(r#"["WHITE", "green", "TLP:AMBER", "RED", "UNLABELED", "CLEAR"]"#)
                .expect("labels must parse");
        assert_eq!(
            labels,
            vec![
                TlpLabel::White,
                TlpLabel::Green,
                TlpLabel::Amber,
                TlpLabel::Red,
                TlpLabel::Unlabeled,
                TlpLabel::Unlabeled,
            ]
        );
    }

    #[test]
    fn serialize() {
        assert_eq!(
            serde_json::to_string(&TlpLabel::Green).expect("must serialize"),
            r#""GREEN""#
        );
    }
}
