use crate::index::reader::Index;
use crate::index::types::EntryType;
use serde::Serialize;
use std::io::{self, Write};

/// Summary of one built index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub generation: u64,
    pub entries: usize,
    pub creatures: u64,
    pub items: u64,
    pub abilities: u64,
    pub moves: u64,
    pub vocabulary: usize,
    pub shingles: usize,
    pub postings: u64,
    pub diagnostics: usize,
}

impl IndexStats {
    /// Collect statistics for an index; `diagnostics` is the number of
    /// build diagnostics recorded alongside it.
    pub fn collect(index: &Index, diagnostics: usize) -> Self {
        Self {
            generation: index.generation(),
            entries: index.len(),
            creatures: index.type_docs(EntryType::Creature).len(),
            items: index.type_docs(EntryType::Item).len(),
            abilities: index.type_docs(EntryType::Ability).len(),
            moves: index.type_docs(EntryType::Move).len(),
            vocabulary: index.vocabulary().len(),
            shingles: index.shingle_count(),
            postings: index.posting_count(),
            diagnostics,
        }
    }

    /// Entry count for one category
    pub fn count(&self, entry_type: EntryType) -> u64 {
        match entry_type {
            EntryType::Creature => self.creatures,
            EntryType::Item => self.items,
            EntryType::Ability => self.abilities,
            EntryType::Move => self.moves,
        }
    }

    /// Print a human-readable table
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Index Statistics")?;
        writeln!(out, "================")?;
        writeln!(out)?;
        writeln!(out, "Generation:       {}", self.generation)?;
        writeln!(out, "Entries:          {}", self.entries)?;
        for entry_type in EntryType::ALL {
            writeln!(out, "  {:15} {}", entry_type.plural(), self.count(entry_type))?;
        }
        writeln!(out)?;
        writeln!(out, "Vocabulary:       {}", self.vocabulary)?;
        writeln!(out, "Shingles:         {}", self.shingles)?;
        writeln!(out, "Postings:         {}", self.postings)?;
        writeln!(out, "Diagnostics:      {}", self.diagnostics)?;
        Ok(())
    }
}
