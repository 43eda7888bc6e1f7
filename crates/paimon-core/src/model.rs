//! Model catalog entries and generation styles.

use serde::{Deserialize, Serialize};

/// Deterministic generation-behavior variant keyed by model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStyle {
    /// Short answers built from the single best context.
    Concise,
    /// The default style for most FAQs.
    Balanced,
    /// Detailed answers that cite sources and scores.
    Analytical,
}

impl GenerationStyle {
    /// Returns the lowercase style name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Balanced => "balanced",
            Self::Analytical => "analytical",
        }
    }

    /// Returns the style name with a leading capital, as used in answer headers.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Concise => "Concise",
            Self::Balanced => "Balanced",
            Self::Analytical => "Analytical",
        }
    }
}

impl Default for GenerationStyle {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for GenerationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named generation configuration in the model catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Unique model name.
    pub name: String,
    /// Human-readable summary.
    pub description: String,
    /// Style this model generates with.
    pub style: GenerationStyle,
}

impl ModelSpec {
    /// Creates a new catalog entry.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        style: GenerationStyle,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            style,
        }
    }

    /// Returns the built-in model catalog, in listing order.
    #[must_use]
    pub fn builtin_catalog() -> Vec<ModelSpec> {
        vec![
            Self::new(
                "gpt-mini",
                "Fast, concise model for short answers.",
                GenerationStyle::Concise,
            ),
            Self::new(
                "gpt-balanced",
                "Balanced performance for most FAQs.",
                GenerationStyle::Balanced,
            ),
            Self::new(
                "gpt-analytic",
                "More detailed reasoning for complex queries.",
                GenerationStyle::Analytical,
            ),
        ]
    }

    /// Name of the model that is active when nothing else is configured.
    pub const DEFAULT_MODEL: &'static str = "gpt-mini";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order() {
        let names: Vec<_> = ModelSpec::builtin_catalog()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["gpt-mini", "gpt-balanced", "gpt-analytic"]);
    }

    #[test]
    fn test_each_model_has_its_own_style() {
        let catalog = ModelSpec::builtin_catalog();
        assert_eq!(catalog[0].style, GenerationStyle::Concise);
        assert_eq!(catalog[1].style, GenerationStyle::Balanced);
        assert_eq!(catalog[2].style, GenerationStyle::Analytical);
    }

    #[test]
    fn test_default_model_is_in_catalog() {
        assert!(ModelSpec::builtin_catalog()
            .iter()
            .any(|m| m.name == ModelSpec::DEFAULT_MODEL));
    }

    #[test]
    fn test_style_serialization() {
        let json = serde_json::to_string(&GenerationStyle::Analytical).unwrap();
        assert_eq!(json, "\"analytical\"");
        assert_eq!(GenerationStyle::Concise.title(), "Concise");
    }
}
