//! Interpreting classifier replies.
//!
//! A reply is tried against three shapes in order: a bare schema object, a
//! schema object embedded in surrounding text, and free text containing one
//! of the known phrases. Each shape yields the same [`Classification`].

use serde::Deserialize;
use tracing::{debug, trace};

use crate::ai::blessing::{Blessing, Category, NOT_FOOD_MARKER};

/// Reply shape that produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    Structured,
    EmbeddedJson,
    FreeText,
}

/// Normalized classifier answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Classification {
    /// Missing means the category alone decides.
    #[serde(default)]
    pub is_food: Option<bool>,
    /// Raw label; may fall outside the fixed set.
    pub category: String,
    /// Phrase the model suggested. Advisory only; `null` is tolerated.
    #[serde(default, rename = "bracha")]
    pub suggested: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Classification {
    pub fn category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }

    pub fn suggested(&self) -> &str {
        self.suggested.as_deref().unwrap_or("")
    }
}

fn parse_structured(text: &str) -> Option<Classification> {
    serde_json::from_str(text.trim()).ok()
}

/// First balanced `{...}` span, skipping braces inside string literals.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_embedded(text: &str) -> Option<Classification> {
    let span = first_json_object(text)?;
    trace!(span, "embedded json candidate");
    serde_json::from_str(span).ok()
}

/// Earliest literal occurrence of a known phrase or the not-food marker.
fn parse_free_text(text: &str) -> Option<Classification> {
    let phrase_hit = Blessing::ALL
        .into_iter()
        .filter_map(|b| text.find(b.phrase()).map(|pos| (pos, Some(b))));
    let marker_hit = text.find(NOT_FOOD_MARKER).map(|pos| (pos, None));
    let (_, hit) = phrase_hit.chain(marker_hit).min_by_key(|(pos, _)| *pos)?;

    let explanation: String = text.chars().take(200).collect();
    Some(match hit {
        Some(blessing) => Classification {
            is_food: Some(true),
            category: blessing.category().label().to_string(),
            suggested: Some(blessing.phrase().to_string()),
            explanation: Some(explanation),
            notes: None,
        },
        None => Classification {
            is_food: Some(false),
            category: Category::NotFood.label().to_string(),
            suggested: None,
            explanation: Some(explanation),
            notes: None,
        },
    })
}

/// Try every reply shape in order of preference.
pub fn parse_reply(text: &str) -> Option<(Classification, ReplyShape)> {
    let attempts: [(ReplyShape, fn(&str) -> Option<Classification>); 3] = [
        (ReplyShape::Structured, parse_structured),
        (ReplyShape::EmbeddedJson, parse_embedded),
        (ReplyShape::FreeText, parse_free_text),
    ];
    for (shape, attempt) in attempts {
        if let Some(result) = attempt(text) {
            debug!(?shape, category = %result.category, "classifier reply parsed");
            return Some((result, shape));
        }
    }
    debug!("no usable reply shape");
    None
}
