//! Category resolution: query in, guaranteed-valid decision out.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::ai::blessing::{coerce, Blessing, Category};
use crate::ai::classifier::Classifier;
use crate::ai::config::{AiConfig, ResponseContract};
use crate::ai::parse::parse_reply;
use crate::ai::prompts::build_prompt;
use crate::food::FoodQuery;
use crate::messages::not_food_text;

/// Final answer for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Blessing(Blessing),
    NotFood { query: String },
}

impl Decision {
    /// Text sent back to the user.
    pub fn reply_text(&self) -> String {
        match self {
            Decision::Blessing(b) => b.phrase().to_string(),
            Decision::NotFood { query } => not_food_text(query),
        }
    }
}

/// Failures absorbed by the pipeline.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("classifier call failed: {0:#}")]
    Classifier(anyhow::Error),
    #[error("classifier call timed out after {0:?}")]
    Timeout(Duration),
    #[error("classifier reply had no usable shape")]
    Unparseable,
}

/// Failure outcome; always resolves to the catch-all phrase.
#[derive(Debug)]
pub struct Fallback {
    pub error: ResolveError,
}

impl Fallback {
    pub fn decision(&self) -> Decision {
        Decision::Blessing(Blessing::FALLBACK)
    }
}

impl From<ResolveError> for Fallback {
    fn from(error: ResolveError) -> Self {
        Self { error }
    }
}

/// Turn a classifier reply into a decision. Pure; no I/O.
pub fn decide(query: &FoodQuery, reply: &str) -> Result<Decision, Fallback> {
    let (classification, shape) = parse_reply(reply).ok_or(ResolveError::Unparseable)?;
    let coerced = coerce(&classification.category, classification.suggested());
    debug!(
        ?shape,
        label = %classification.category,
        is_food = ?classification.is_food,
        ?coerced,
        "coerced classification"
    );
    let not_food = classification.is_food == Some(false)
        || classification.category() == Some(Category::NotFood);
    Ok(match coerced {
        Some(blessing) if !not_food => Decision::Blessing(blessing),
        _ => Decision::NotFood {
            query: query.as_str().to_string(),
        },
    })
}

/// Prompt builder, classifier and coercion composed behind one call.
#[derive(Clone)]
pub struct Pipeline {
    classifier: Arc<dyn Classifier>,
    contract: ResponseContract,
    timeout: Duration,
}

impl Pipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        contract: ResponseContract,
        timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            contract,
            timeout,
        }
    }

    pub fn from_config(classifier: Arc<dyn Classifier>, config: &AiConfig) -> Self {
        Self::new(classifier, config.contract, config.timeout)
    }

    /// One classifier round trip; failures are returned, not raised.
    #[instrument(level = "debug", skip(self), fields(classifier = self.classifier.name()))]
    pub async fn resolve(&self, query: &FoodQuery, details: &str) -> Result<Decision, Fallback> {
        let prompt = build_prompt(query, details, self.contract);
        debug!(contract = ?self.contract, "prompt built");

        let reply = tokio::time::timeout(self.timeout, self.classifier.classify(&prompt))
            .await
            .map_err(|_| ResolveError::Timeout(self.timeout))?
            .map_err(ResolveError::Classifier)?;
        debug!(reply_len = reply.len(), "classifier invoked");

        decide(query, &reply)
    }

    /// Always yields a decision; failures become the catch-all phrase.
    pub async fn run(&self, query: &FoodQuery, details: &str) -> Decision {
        match self.resolve(query, details).await {
            Ok(decision) => {
                info!(query = %query, reply = %decision.reply_text(), "query resolved");
                decision
            }
            Err(fallback) => {
                warn!(query = %query, error = %fallback.error, "using catch-all blessing");
                fallback.decision()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> FoodQuery {
        FoodQuery::parse(s).unwrap()
    }

    #[test]
    fn decide_uses_table_not_suggestion() {
        let reply = r#"{"is_food":true,"category":"bread","bracha":"בורא מיני מזונות","explanation":""}"#;
        assert_eq!(decide(&q("פיתה"), reply).unwrap(), Decision::Blessing(Blessing::HaMotzi));
    }

    #[test]
    fn decide_not_food_when_flag_is_false() {
        let reply = r#"{"is_food":false,"category":"שהכל","bracha":"שהכל נהיה בדברו","explanation":""}"#;
        assert_eq!(
            decide(&q("אבן"), reply).unwrap(),
            Decision::NotFood { query: "אבן".into() }
        );
    }

    #[test]
    fn decide_missing_flag_follows_category() {
        let reply = r#"{"category":"מזונות"}"#;
        assert_eq!(decide(&q("פסטה"), reply).unwrap(), Decision::Blessing(Blessing::Mezonot));
    }

    #[test]
    fn decide_null_suggestion_uses_table() {
        let reply = r#"{"is_food":true,"category":"לחם","bracha":null,"explanation":null}"#;
        assert_eq!(decide(&q("חלה"), reply).unwrap(), Decision::Blessing(Blessing::HaMotzi));
    }

    #[test]
    fn decide_unknown_is_not_food() {
        let reply = r#"{"is_food":true,"category":"unknown","bracha":"","explanation":"מחלוקת"}"#;
        assert!(matches!(decide(&q("קינואה"), reply).unwrap(), Decision::NotFood { .. }));
    }

    #[test]
    fn decide_unparseable_is_fallback() {
        let fallback = decide(&q("תפוח"), "sorry").unwrap_err();
        assert!(matches!(fallback.error, ResolveError::Unparseable));
        assert_eq!(fallback.decision(), Decision::Blessing(Blessing::Shehakol));
    }

    #[test]
    fn not_food_reply_text_contains_query() {
        let d = Decision::NotFood { query: "שולחן".into() };
        assert_eq!(d.reply_text(), "שולחן זה לא מאכל");
    }
}
