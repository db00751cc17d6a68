use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(TodoId);

/// Lifecycle state of a todo as reported by the server.
///
/// The server writes `"New"` on create and `"Completed"` on mark-complete.
/// Anything else is kept verbatim so a newer server never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TodoStatus {
    New,
    Completed,
    Other(String),
}

impl TodoStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "New",
            Self::Completed => "Completed",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl From<String> for TodoStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "new" | "pending" => Self::New,
            "completed" => Self::Completed,
            _ => Self::Other(raw),
        }
    }
}

impl From<TodoStatus> for String {
    fn from(status: TodoStatus) -> Self {
        match status {
            TodoStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_matches_known_values_case_insensitively() {
        assert_eq!(TodoStatus::from("completed".to_string()), TodoStatus::Completed);
        assert_eq!(TodoStatus::from("Pending".to_string()), TodoStatus::New);
        assert_eq!(TodoStatus::from("New".to_string()), TodoStatus::New);
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status: TodoStatus = serde_json::from_str("\"Archived\"").expect("decode");
        assert_eq!(status, TodoStatus::Other("Archived".into()));
        assert_eq!(serde_json::to_string(&status).expect("encode"), "\"Archived\"");
    }

    #[test]
    fn known_status_serializes_in_server_casing() {
        let status: TodoStatus = serde_json::from_str("\"pending\"").expect("decode");
        assert_eq!(serde_json::to_string(&status).expect("encode"), "\"New\"");
    }
}
