use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Deref;

use crate::board::entry::{Entry, RankedEntry};
use crate::board::submission::ValidSubmission;

pub type EntryMap = BTreeMap<String, Entry>;

/// Latest entry of every submitter, keyed by name. Names are compared verbatim
/// (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard(EntryMap);

impl Leaderboard {
    pub fn new() -> Leaderboard {
        Leaderboard(EntryMap::new())
    }

    /// Insert or fully replace the entry of `submission.name`. Fields omitted
    /// in the submission fall back to their defaults, nothing is carried over
    /// from a previous entry.
    pub fn upsert(&mut self, submission: ValidSubmission) -> RankedEntry {
        let entry = Entry::new(
            submission.cleaned_gb,
            submission.starting_gb,
            submission.location,
        );
        self.0.insert(submission.name.clone(), entry.clone());
        RankedEntry {
            name: submission.name,
            entry,
        }
    }

    /// Remove the entry of `name`, if any.
    pub fn remove(&mut self, name: &str) -> Option<Entry> {
        self.0.remove(name)
    }

    /// Entries by cleaned quantity (highest first). Equal quantities are
    /// ordered by name.
    pub fn ranked(&self) -> Vec<RankedEntry> {
        self.0
            .iter()
            .sorted_by(|(name_a, a), (name_b, b)| by_cleaned_desc(a, b).then(name_a.cmp(name_b)))
            .map(|(name, entry)| RankedEntry {
                name: name.clone(),
                entry: entry.clone(),
            })
            .collect()
    }

    pub fn export(&self) -> EntryMap {
        self.0.clone()
    }
}

fn by_cleaned_desc(a: &Entry, b: &Entry) -> Ordering {
    b.cleaned_gb.total_cmp(&a.cleaned_gb)
}

impl Deref for Leaderboard {
    type Target = EntryMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<EntryMap> for Leaderboard {
    fn from(entries: EntryMap) -> Self {
        Leaderboard(entries)
    }
}

// A listing sent back by clients; the last occurrence of a name wins.
impl FromIterator<RankedEntry> for Leaderboard {
    fn from_iter<I: IntoIterator<Item = RankedEntry>>(iter: I) -> Self {
        Leaderboard(iter.into_iter().map(|r| (r.name, r.entry)).collect())
    }
}

impl From<Vec<RankedEntry>> for Leaderboard {
    fn from(entries: Vec<RankedEntry>) -> Self {
        entries.into_iter().collect()
    }
}
