use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which of the two disjoint participant sets an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Proposer,
    Receiver,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Proposer => Side::Receiver,
            Side::Receiver => Side::Proposer,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Proposer => write!(f, "proposer"),
            Side::Receiver => write!(f, "receiver"),
        }
    }
}

/// Complete set of strict preference rankings for both sides
///
/// `proposers` and `receivers` fix the participant order used for
/// enumeration, so two equal profiles always enumerate identically.
/// The lists themselves are only checked when the profile is evaluated
/// (see `PreferenceProfile::validate`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub proposers: Vec<String>,
    pub receivers: Vec<String>,
    #[serde(rename = "proposerPrefs", default)]
    pub proposer_prefs: BTreeMap<String, Vec<String>>,
    #[serde(rename = "receiverPrefs", default)]
    pub receiver_prefs: BTreeMap<String, Vec<String>>,
}

impl PreferenceProfile {
    /// Create a profile with the given participants and no lists yet
    pub fn new<P, R>(proposers: P, receivers: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            proposers: proposers.into_iter().map(Into::into).collect(),
            receivers: receivers.into_iter().map(Into::into).collect(),
            proposer_prefs: BTreeMap::new(),
            receiver_prefs: BTreeMap::new(),
        }
    }

    /// Builder-style helper that stores a list without checking it
    pub fn with_list<I>(mut self, participant: &str, list: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let list: Vec<String> = list.into_iter().map(Into::into).collect();
        match self.side_of(participant) {
            Some(Side::Receiver) => {
                self.receiver_prefs.insert(participant.to_string(), list);
            }
            _ => {
                self.proposer_prefs.insert(participant.to_string(), list);
            }
        }
        self
    }

    /// Number of participants per side (proposer count)
    pub fn size(&self) -> usize {
        self.proposers.len()
    }

    pub fn participants(&self, side: Side) -> &[String] {
        match side {
            Side::Proposer => &self.proposers,
            Side::Receiver => &self.receivers,
        }
    }

    pub fn side_of(&self, participant: &str) -> Option<Side> {
        if self.proposers.iter().any(|p| p == participant) {
            Some(Side::Proposer)
        } else if self.receivers.iter().any(|r| r == participant) {
            Some(Side::Receiver)
        } else {
            None
        }
    }

    pub fn lists(&self, side: Side) -> &BTreeMap<String, Vec<String>> {
        match side {
            Side::Proposer => &self.proposer_prefs,
            Side::Receiver => &self.receiver_prefs,
        }
    }

    pub(crate) fn lists_mut(&mut self, side: Side) -> &mut BTreeMap<String, Vec<String>> {
        match side {
            Side::Proposer => &mut self.proposer_prefs,
            Side::Receiver => &mut self.receiver_prefs,
        }
    }

    /// Stored preference list of a participant, if any
    pub fn preferences(&self, participant: &str) -> Option<&[String]> {
        let side = self.side_of(participant)?;
        self.lists(side).get(participant).map(Vec::as_slice)
    }
}

/// One proposer/receiver pair of a matching
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub proposer: String,
    pub receiver: String,
}

/// Bijection between proposers and receivers, as a list of pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matching {
    pub pairs: Vec<Pair>,
}

impl Matching {
    pub fn from_pairs<I, P, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(p, r)| Pair {
                    proposer: p.into(),
                    receiver: r.into(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.iter()
    }
}

impl fmt::Display for Matching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}→{}", pair.proposer, pair.receiver)?;
        }
        Ok(())
    }
}

/// Unmatched pair where both sides prefer each other to their partners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingPair {
    pub proposer: String,
    pub receiver: String,
}

/// Rank-based dissatisfaction of a matching (0 = everyone got their first choice)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissatisfactionMetrics {
    #[serde(rename = "proposerScore")]
    pub proposer_score: usize,
    #[serde(rename = "receiverScore")]
    pub receiver_score: usize,
    pub total: usize,
    pub imbalance: usize,
    #[serde(rename = "worstRank")]
    pub worst_rank: usize,
}

/// Stable matching numbered in enumeration order, with its metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMatching {
    pub index: usize,
    pub matching: Matching,
    pub metrics: DissatisfactionMetrics,
}
