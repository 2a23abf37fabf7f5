use crate::types::BlockId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub has_children: bool,
    pub archived: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            created_time: None,
            last_edited_time: None,
            has_children: false,
            archived: false,
        }
    }

    /// Sets both timestamps; fresh blocks have never been edited.
    pub fn with_times(mut self, created: DateTime<Utc>, last_edited: DateTime<Utc>) -> Self {
        self.created_time = Some(created);
        self.last_edited_time = Some(last_edited);
        self
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::new_v4())
    }
}
