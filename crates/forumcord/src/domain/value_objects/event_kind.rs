//! EventKind - Forum lifecycle events a webhook target can watch

use serde::{Deserialize, Serialize};

/// Forum lifecycle event classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewThread,
    NewPost,
    EditThread,
    EditPost,
    DeleteThread,
    DeletePost,
    NewRegistration,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::NewThread => write!(f, "new_thread"),
            EventKind::NewPost => write!(f, "new_post"),
            EventKind::EditThread => write!(f, "edit_thread"),
            EventKind::EditPost => write!(f, "edit_post"),
            EventKind::DeleteThread => write!(f, "delete_thread"),
            EventKind::DeletePost => write!(f, "delete_post"),
            EventKind::NewRegistration => write!(f, "new_registration"),
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new_thread" => Ok(EventKind::NewThread),
            "new_post" => Ok(EventKind::NewPost),
            "edit_thread" => Ok(EventKind::EditThread),
            "edit_post" => Ok(EventKind::EditPost),
            "delete_thread" => Ok(EventKind::DeleteThread),
            "delete_post" => Ok(EventKind::DeletePost),
            "new_registration" => Ok(EventKind::NewRegistration),
            _ => Err(format!("Unknown event kind: {}", s)),
        }
    }
}

/// Per-target watch flags, one independently toggleable flag per event kind
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchedEvents {
    pub new_threads: bool,
    pub new_posts: bool,
    pub edit_threads: bool,
    pub edit_posts: bool,
    pub delete_threads: bool,
    pub delete_posts: bool,
    pub new_registrations: bool,
}

impl WatchedEvents {
    /// Whether this flag set covers the given event kind
    pub fn watches(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::NewThread => self.new_threads,
            EventKind::NewPost => self.new_posts,
            EventKind::EditThread => self.edit_threads,
            EventKind::EditPost => self.edit_posts,
            EventKind::DeleteThread => self.delete_threads,
            EventKind::DeletePost => self.delete_posts,
            EventKind::NewRegistration => self.new_registrations,
        }
    }

    /// Every flag enabled
    pub fn all() -> Self {
        Self {
            new_threads: true,
            new_posts: true,
            edit_threads: true,
            edit_posts: true,
            delete_threads: true,
            delete_posts: true,
            new_registrations: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_event_kind_roundtrip() {
        for kind in [
            EventKind::NewThread,
            EventKind::NewPost,
            EventKind::EditThread,
            EventKind::EditPost,
            EventKind::DeleteThread,
            EventKind::DeletePost,
            EventKind::NewRegistration,
        ] {
            assert_eq!(EventKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_watches_flags_are_independent() {
        let events = WatchedEvents {
            new_posts: true,
            ..Default::default()
        };
        assert!(events.watches(EventKind::NewPost));
        assert!(!events.watches(EventKind::NewThread));
        assert!(!events.watches(EventKind::DeletePost));
    }
}
