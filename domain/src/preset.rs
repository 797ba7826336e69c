//! Use-case presets.
//!
//! A use case maps a named conversation type to the sampling temperature
//! sent with every outbound request. The presets themselves are static;
//! selecting one never touches the conversation state.

use serde::{Deserialize, Serialize};

/// A named preset selecting a sampling temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCase {
    pub name: String,
    /// Stable identifier used for selection.
    pub value: String,
    pub temperature: f32,
    pub description: String,
}

impl UseCase {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        temperature: f32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            temperature,
            description: description.into(),
        }
    }

    /// Built-in presets. The first entry is the default selection.
    pub fn defaults() -> Vec<UseCase> {
        vec![
            UseCase::new(
                "General Conversation",
                "general",
                1.3,
                "Balanced responses for everyday conversation",
            ),
            UseCase::new(
                "Coding & Math",
                "coding",
                0.0,
                "Precise, deterministic responses for technical tasks",
            ),
            UseCase::new(
                "Data Analysis",
                "data",
                1.0,
                "Balanced analysis for data processing tasks",
            ),
            UseCase::new(
                "Translation",
                "translation",
                1.3,
                "Natural language translation tasks",
            ),
            UseCase::new(
                "Creative Writing",
                "creative",
                1.5,
                "More creative and varied responses",
            ),
        ]
    }

    /// Look up a preset by its identifier.
    pub fn find(value: &str) -> Option<UseCase> {
        Self::defaults().into_iter().find(|uc| uc.value == value)
    }
}
