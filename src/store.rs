use std::collections::HashMap;

use crate::record::MatchRecord;
use crate::types::MatchId;

/// Storage seam owned by the host process. The rules engine never calls it.
pub trait MatchRepository {
    fn next_id(&mut self) -> MatchId;
    fn find_match(&self, id: MatchId) -> Option<MatchRecord>;
    fn save_match(&mut self, id: MatchId, record: MatchRecord);
}

/// In-memory repository, the way the original host kept games.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    matches: HashMap<MatchId, MatchRecord>,
    last_id: u64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl MatchRepository for MemoryRepository {
    fn next_id(&mut self) -> MatchId {
        self.last_id += 1;
        MatchId(self.last_id)
    }

    fn find_match(&self, id: MatchId) -> Option<MatchRecord> {
        self.matches.get(&id).cloned()
    }

    fn save_match(&mut self, id: MatchId, record: MatchRecord) {
        self.matches.insert(id, record);
    }
}
