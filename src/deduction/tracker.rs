//! Tracker report: a readable summary of a participant's suggestion history.
//!
//! The report is a derived view for human players, not game state. Items of
//! refuted suggestions are listed as "confirmed not in solution" and triples
//! nobody refuted as "suspicious".

use std::fmt;
use std::io::Write;
use std::path::Path;

use im::OrdSet;

use super::history::SuggestionRecord;
use crate::cards::{CardId, Catalog, Suggestion};
use crate::core::player::PlayerId;

/// Default file name used by the interactive shell.
pub const TRACKER_FILE: &str = "tracker_log.txt";

/// One line of the history section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerEntry {
    pub cards: [String; 3],
    pub refuted_by: Option<String>,
}

/// Rendered tracker for one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerReport {
    pub entries: Vec<TrackerEntry>,
    /// Catalog order, no duplicates.
    pub not_in_solution: Vec<String>,
    pub suspicious: Vec<[String; 3]>,
}

impl TrackerReport {
    /// Build the report. `name_of` resolves seats to display names.
    pub fn from_history(history: &[SuggestionRecord], catalog: &Catalog, name_of: impl Fn(PlayerId) -> String) -> Self {
        let names = |s: &Suggestion| s.cards().map(|c| catalog.name(c).to_string());

        let entries = history
            .iter()
            .map(|record| TrackerEntry {
                cards: names(&record.suggestion),
                refuted_by: record.refuter.map(&name_of),
            })
            .collect();

        let cleared: OrdSet<CardId> = history
            .iter()
            .filter(|record| record.refuted())
            .flat_map(|record| record.suggestion.cards())
            .collect();

        let suspicious = history
            .iter()
            .filter(|record| !record.refuted())
            .map(|record| names(&record.suggestion))
            .collect();

        Self {
            entries,
            not_in_solution: cleared.iter().map(|&c| catalog.name(c).to_string()).collect(),
            suspicious,
        }
    }

    /// Write the rendered report to a file, replacing previous contents.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        write!(file, "{self}")?;
        file.flush()
    }
}

impl fmt::Display for TrackerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INFO TRACKER")?;
        writeln!(f, "Your suggestion history:")?;
        for entry in &self.entries {
            let [c, w, r] = &entry.cards;
            match &entry.refuted_by {
                Some(name) => writeln!(f, "  • {c}, {w}, {r} → Refuted by {name}")?,
                None => writeln!(f, "  • {c}, {w}, {r} → No player refuted")?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Confirmed NOT in solution:")?;
        if self.not_in_solution.is_empty() {
            writeln!(f, "  None yet")?;
        } else {
            writeln!(f, "  {}", self.not_in_solution.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Suspicious (no player could refute):")?;
        for [c, w, r] in &self.suspicious {
            writeln!(f, "  • {c}, {w}, {r}")?;
        }
        Ok(())
    }
}
