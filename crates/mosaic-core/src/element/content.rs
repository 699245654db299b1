//! Kind-specific element content.

use serde::{Deserialize, Serialize};

/// Content payload of an element, matching its kind.
///
/// Dividers and spacers carry no content and use the `None` variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementContent {
    Card {
        title: String,
        description: String,
        /// Icon name from the host's icon set (empty = no icon).
        icon: String,
        /// Short badge text shown in the card corner (empty = no badge).
        badge: String,
    },
    Text {
        text: String,
    },
    Image {
        url: String,
    },
    Stat {
        value: String,
        label: String,
    },
    Button {
        label: String,
        link: String,
    },
    #[default]
    None,
}

impl ElementContent {
    /// Default content for a freshly added card.
    pub fn new_card() -> Self {
        ElementContent::Card {
            title: "New card".to_string(),
            description: String::new(),
            icon: String::new(),
            badge: String::new(),
        }
    }

    pub fn new_text() -> Self {
        ElementContent::Text {
            text: String::new(),
        }
    }

    pub fn new_image() -> Self {
        ElementContent::Image { url: String::new() }
    }

    pub fn new_stat() -> Self {
        ElementContent::Stat {
            value: "0".to_string(),
            label: "Metric".to_string(),
        }
    }

    pub fn new_button() -> Self {
        ElementContent::Button {
            label: "Button".to_string(),
            link: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_serde_round_trip() {
        let content = ElementContent::Stat {
            value: "42".to_string(),
            label: "Answers".to_string(),
        };
        let json = serde_json::to_string(&content).unwrap();
        let back: ElementContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(ElementContent::default(), ElementContent::None);
    }
}
