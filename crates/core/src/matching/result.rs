//! Final output of the pipeline and its JSON form.
//!
//! Serialized as `{ "<left class>": { "<right class>": rank, ... }, ... }` with candidates in
//! ascending rank order.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::matching::MatchingResult;
use crate::model::descriptor::java_to_descriptor;
use crate::pool::ClassRecord;

/// One right-side candidate for a left class.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub rank: f64,
}

impl Candidate {
    pub fn new(name: impl Into<String>, rank: f64) -> Self {
        Self { name: name.into(), rank }
    }
}

/// Ranked candidates for every left-side class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassesMatches {
    classes: BTreeMap<String, Vec<Candidate>>,
}

impl ClassesMatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the candidates of `left`, replacing earlier ones. Sorted by rank, ties keep
    /// their given order.
    pub fn insert(&mut self, left: impl Into<String>, mut candidates: Vec<Candidate>) {
        candidates.sort_by(|a, b| a.rank.total_cmp(&b.rank));
        self.classes.insert(left.into(), candidates);
    }

    /// Add every match of one scope.
    pub fn extend_from_scope(&mut self, scope: MatchingResult<Arc<ClassRecord>>) {
        for (left, matches) in scope.matches {
            let candidates = matches
                .into_iter()
                .map(|m| Candidate::new(m.right.name(), m.rank))
                .collect();
            self.insert(left, candidates);
        }
    }

    /// Entries of `other` replace entries for the same left class.
    pub fn merge(&mut self, other: ClassesMatches) {
        self.classes.extend(other.classes);
    }

    pub fn get(&self, left: &str) -> Option<&[Candidate]> {
        self.classes.get(left).map(Vec::as_slice)
    }

    /// Lowest-rank candidate of a left class given in descriptor or Java form.
    pub fn best_match(&self, left: &str) -> Option<&Candidate> {
        self.classes
            .get(left)
            .or_else(|| self.classes.get(&java_to_descriptor(left)))
            .and_then(|candidates| candidates.first())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Candidate>)> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Left classes that ended without any candidate.
    pub fn without_candidates(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().filter(|(_, c)| c.is_empty()).map(|(name, _)| name.as_str())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize class matches")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let body = self.to_json_pretty()?;
        std::fs::write(path, body)
            .with_context(|| format!("Failed to write class matches to {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read class matches at {}", path.display()))?;
        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse class matches at {}", path.display()))
    }
}

struct CandidateMap<'a>(&'a [Candidate]);

impl Serialize for CandidateMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for candidate in self.0 {
            map.serialize_entry(&candidate.name, &candidate.rank)?;
        }
        map.end()
    }
}

impl Serialize for ClassesMatches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.classes.len()))?;
        for (left, candidates) in &self.classes {
            map.serialize_entry(left, &CandidateMap(candidates))?;
        }
        map.end()
    }
}

struct CandidateList(Vec<Candidate>);

impl<'de> Deserialize<'de> for CandidateList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CandidateVisitor;

        impl<'de> Visitor<'de> for CandidateVisitor {
            type Value = CandidateList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of candidate class names to ranks")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut candidates = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, rank)) = access.next_entry::<String, f64>()? {
                    candidates.push(Candidate { name, rank });
                }
                Ok(CandidateList(candidates))
            }
        }

        deserializer.deserialize_map(CandidateVisitor)
    }
}

impl<'de> Deserialize<'de> for ClassesMatches {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, CandidateList>::deserialize(deserializer)?;
        let mut matches = ClassesMatches::new();
        for (left, CandidateList(candidates)) in raw {
            matches.insert(left, candidates);
        }
        Ok(matches)
    }
}
