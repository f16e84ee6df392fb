// ============================================================
// Layer 3 — Splits and Dataset Families
// ============================================================
// A split is a named partition of a corpus. SQuAD only ships
// two of them: "train" and "dev".
//
// Callers may ask for ONE split or an ordered LIST of splits.
// The shape of the request decides the shape of the answer:
//   SplitRequest::Single(Train)      → one dataset
//   SplitRequest::Many([Train, Dev]) → a Vec of two datasets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DatasetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Dev,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Dev];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev   => "dev",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "dev"   => Ok(Split::Dev),
            other   => Err(DatasetError::usage(format!(
                "unknown split '{other}', expected one of: train, dev"
            ))),
        }
    }
}

/// Which SQuAD release to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquadVersion {
    Squad1,
    Squad2,
}

impl SquadVersion {
    pub fn name(self) -> &'static str {
        match self {
            SquadVersion::Squad1 => "SQuAD1",
            SquadVersion::Squad2 => "SQuAD2",
        }
    }

    /// File name of the official JSON release for a split.
    pub fn file_name(self, split: Split) -> &'static str {
        match (self, split) {
            (SquadVersion::Squad1, Split::Train) => "train-v1.1.json",
            (SquadVersion::Squad1, Split::Dev)   => "dev-v1.1.json",
            (SquadVersion::Squad2, Split::Train) => "train-v2.0.json",
            (SquadVersion::Squad2, Split::Dev)   => "dev-v2.0.json",
        }
    }
}

impl fmt::Display for SquadVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SquadVersion {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squad1" | "squad" | "v1" => Ok(SquadVersion::Squad1),
            "squad2" | "v2"           => Ok(SquadVersion::Squad2),
            other => Err(DatasetError::usage(format!("unknown SQuAD version '{other}'"))),
        }
    }
}

/// The splits a caller asked for, preserving whether they asked
/// for a single name or a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitRequest {
    Single(Split),
    Many(Vec<Split>),
}

impl SplitRequest {
    /// Parse a single split name.
    pub fn single(name: &str) -> Result<Self, DatasetError> {
        Ok(SplitRequest::Single(name.parse()?))
    }

    /// Parse an ordered collection of split names.
    pub fn many<I, S>(names: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let splits = names
            .into_iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<Split>, _>>()?;
        if splits.is_empty() {
            return Err(DatasetError::usage("at least one split must be requested"));
        }
        Ok(SplitRequest::Many(splits))
    }

    /// The requested splits in request order.
    pub fn splits(&self) -> &[Split] {
        match self {
            SplitRequest::Single(s) => std::slice::from_ref(s),
            SplitRequest::Many(v)   => v,
        }
    }

    pub fn contains(&self, split: Split) -> bool {
        self.splits().contains(&split)
    }
}

impl Default for SplitRequest {
    fn default() -> Self {
        SplitRequest::Many(Split::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_splits() {
        assert_eq!("train".parse::<Split>().unwrap(), Split::Train);
        assert_eq!("dev".parse::<Split>().unwrap(), Split::Dev);
    }

    #[test]
    fn test_unknown_split_is_usage_error() {
        let err = "test".parse::<Split>().unwrap_err();
        assert!(matches!(err, DatasetError::Usage(_)));
        assert!(SplitRequest::many(["train", "valid"]).is_err());
    }

    #[test]
    fn test_empty_collection_is_usage_error() {
        let names: [&str; 0] = [];
        assert!(matches!(SplitRequest::many(names), Err(DatasetError::Usage(_))));
    }

    #[test]
    fn test_default_is_train_then_dev() {
        assert_eq!(SplitRequest::default().splits(), &[Split::Train, Split::Dev]);
    }

    #[test]
    fn test_single_keeps_shape() {
        let req = SplitRequest::single("dev").unwrap();
        assert_eq!(req, SplitRequest::Single(Split::Dev));
        assert!(!req.contains(Split::Train));
    }

    #[test]
    fn test_release_file_names() {
        assert_eq!(SquadVersion::Squad1.file_name(Split::Train), "train-v1.1.json");
        assert_eq!(SquadVersion::Squad2.file_name(Split::Dev), "dev-v2.0.json");
    }
}
