use tracing::trace;

/// A user's food or dish name, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodQuery(String);

impl FoodQuery {
    /// Returns `None` for blank or whitespace-only input.
    pub fn parse(text: &str) -> Option<Self> {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            trace!("Query empty after trimming");
            None
        } else {
            Some(Self(cleaned.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FoodQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::FoodQuery;

    #[test]
    fn parse_trims_input() {
        assert_eq!(FoodQuery::parse("  תפוח \n").unwrap().as_str(), "תפוח");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(FoodQuery::parse("").is_none());
        assert!(FoodQuery::parse(" \t\n").is_none());
    }
}
