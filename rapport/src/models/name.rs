use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured display name of a friend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Name {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
        }
    }

    /// True when both parts are blank
    pub fn is_blank(&self) -> bool {
        self.first_name.trim().is_empty() && self.last_name.trim().is_empty()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => write!(f, "{} {}", self.first_name, self.last_name),
            (false, true) => write!(f, "{}", self.first_name),
            (true, false) => write!(f, "{}", self.last_name),
            (true, true) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Name::new("Ada", "Lovelace").to_string(), "Ada Lovelace");
        assert_eq!(Name::new(" Ada ", "").to_string(), "Ada");
        assert!(Name::new(" ", "").is_blank());
    }

    #[test]
    fn test_wire_layout() {
        let json = serde_json::to_value(Name::new("Ada", "Lovelace")).unwrap();
        assert_eq!(json, serde_json::json!({"firstName": "Ada", "lastName": "Lovelace"}));
    }
}
