//! ForumScope and IdSet - watch-predicate id collections
//!
//! The storage layer keeps forum and usergroup selections as comma-joined
//! text columns (`-1` marks the all-forums sentinel). The encode/decode
//! boundary lives here and nowhere else.

use serde::{Deserialize, Serialize};

/// Which forums a webhook target watches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForumScope {
    /// The `-1` sentinel: every forum matches
    All,
    /// An explicit forum id set; empty means no forum matches
    Forums(Vec<i64>),
}

impl ForumScope {
    pub fn contains(&self, forum_id: i64) -> bool {
        match self {
            ForumScope::All => true,
            ForumScope::Forums(ids) => ids.contains(&forum_id),
        }
    }

    /// Decode the stored column value
    pub fn decode(raw: &str) -> Self {
        if raw.trim() == "-1" {
            return ForumScope::All;
        }
        ForumScope::Forums(decode_id_list(raw))
    }

    /// Encode for the stored column value
    pub fn encode(&self) -> String {
        match self {
            ForumScope::All => "-1".to_string(),
            ForumScope::Forums(ids) => encode_id_list(ids),
        }
    }
}

impl Default for ForumScope {
    fn default() -> Self {
        ForumScope::Forums(Vec::new())
    }
}

/// A plain id set with the same comma-joined storage encoding (usergroups)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdSet(pub Vec<i64>);

impl IdSet {
    pub fn decode(raw: &str) -> Self {
        IdSet(decode_id_list(raw))
    }

    pub fn encode(&self) -> String {
        encode_id_list(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }
}

fn decode_id_list(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

fn encode_id_list(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_forums_sentinel() {
        let scope = ForumScope::decode("-1");
        assert_eq!(scope, ForumScope::All);
        assert!(scope.contains(42));
        assert_eq!(scope.encode(), "-1");
    }

    #[test]
    fn test_explicit_forum_set() {
        let scope = ForumScope::decode("7,8");
        assert!(scope.contains(7));
        assert!(scope.contains(8));
        assert!(!scope.contains(9));
        assert_eq!(scope.encode(), "7,8");
    }

    #[test]
    fn test_empty_scope_matches_nothing() {
        let scope = ForumScope::decode("");
        assert!(!scope.contains(1));
        assert_ne!(scope, ForumScope::All);
    }

    #[test]
    fn test_id_set_skips_garbage() {
        let set = IdSet::decode("1, 2,x,3");
        assert_eq!(set.0, vec![1, 2, 3]);
        assert_eq!(set.encode(), "1,2,3");
    }
}
