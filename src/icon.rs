use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Cooking-action category shown next to an instruction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum Icon {
    Cutting,
    Boiling,
    Oven,
    Mixing,
    Frying,
    Grilling,
}

impl Icon {
    pub fn label(self) -> &'static str {
        match self {
            Icon::Cutting => "Cutting",
            Icon::Boiling => "Boiling",
            Icon::Oven => "Oven",
            Icon::Mixing => "Mixing",
            Icon::Frying => "Frying",
            Icon::Grilling => "Grilling",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Icon::Cutting => write!(f, "cutting"),
            Icon::Boiling => write!(f, "boiling"),
            Icon::Oven => write!(f, "oven"),
            Icon::Mixing => write!(f, "mixing"),
            Icon::Frying => write!(f, "frying"),
            Icon::Grilling => write!(f, "grilling"),
        }
    }
}

// Evaluated in order; the first group with a whole-word hit wins.
static KEYWORD_GROUPS: LazyLock<Vec<(Regex, Icon)>> = LazyLock::new(|| {
    [
        (r"(?i)\b(chop|slice|dice|cut|mince)\b", Icon::Cutting),
        (r"(?i)\b(boil|simmer|cook|heat)\b", Icon::Boiling),
        (r"(?i)\b(bake|roast|oven)\b", Icon::Oven),
        (r"(?i)\b(mix|stir|whisk|blend)\b", Icon::Mixing),
        (r"(?i)\b(fry|sauté|pan)\b", Icon::Frying),
        (r"(?i)\b(grill|barbecue|bbq)\b", Icon::Grilling),
    ]
    .into_iter()
    .map(|(pattern, icon)| (Regex::new(pattern).expect("keyword pattern is valid"), icon))
    .collect()
});

/// Derive the icon for an instruction from its description text.
pub fn classify(description: &str) -> Option<Icon> {
    KEYWORD_GROUPS
        .iter()
        .find(|(pattern, _)| pattern.is_match(description))
        .map(|(_, icon)| *icon)
}
