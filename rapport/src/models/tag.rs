use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colors handed out to tags created without an explicit one
pub const TAG_PALETTE: [&str; 10] = [
    "#E4572E", "#29335C", "#F3A712", "#A8C686", "#669BBC", "#D3869B", "#3F88C5", "#44BBA4",
    "#E94F37", "#8E7DBE",
];

/// A labeled, colored category that can be attached to any number of friends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Tag {
    /// Create a tag, picking a palette color when none is given
    pub fn new(name: impl Into<String>, color: Option<String>) -> Self {
        let color = color.unwrap_or_else(|| {
            let index = rand::rng().random_range(0..TAG_PALETTE.len());
            TAG_PALETTE[index].to_string()
        });
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_color_comes_from_palette() {
        for _ in 0..20 {
            let tag = Tag::new("college", None);
            assert!(TAG_PALETTE.contains(&tag.color.as_str()));
        }
    }

    #[test]
    fn test_explicit_color_and_unique_ids() {
        let a = Tag::new("work", Some("#000000".to_string()));
        let b = Tag::new("work", Some("#000000".to_string()));
        assert_eq!(a.color, "#000000");
        assert_ne!(a.id, b.id);
    }
}
