use proptest::prelude::*;
use brachabot::ai::parse::{first_json_object, parse_reply};
use brachabot::ai::pipeline::decide;
use brachabot::{Blessing, Decision, FoodQuery};

fn known_phrases() -> Vec<&'static str> {
    Blessing::ALL.iter().map(|b| b.phrase()).collect()
}

// Property: any classifier reply yields a closed-set decision or the fallback
proptest! {
    #[test]
    fn prop_decide_output_is_closed(reply in "(?s).*") {
        let query = FoodQuery::parse("מאכל").unwrap();
        let decision = decide(&query, &reply).unwrap_or_else(|f| f.decision());
        match decision {
            Decision::Blessing(b) => prop_assert!(known_phrases().contains(&b.phrase())),
            Decision::NotFood { query } => prop_assert_eq!(query, "מאכל"),
        }
    }

    #[test]
    fn prop_first_json_object_is_balanced(text in "(?s).*") {
        if let Some(span) = first_json_object(&text) {
            prop_assert_eq!(span.chars().next(), Some('{'));
            prop_assert_eq!(span.chars().last(), Some('}'));
        }
    }
}

fn label_strategy() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(vec![
        "לחם", "מזונות", "פרי_עץ", "פרי_אדמה", "יין", "שהכל", "bread", "grain-product",
        "tree-fruit", "ground-produce", "wine", "generic",
    ])
}

proptest! {
    #[test]
    fn prop_embedded_json_matches_bare(
        label in label_strategy(),
        prefix in "[a-zA-Z .:\n]{0,40}",
        suffix in "[a-zA-Z .\n]{0,40}",
    ) {
        let object = serde_json::json!({
            "is_food": true,
            "category": label,
            "bracha": "",
            "explanation": "x",
        })
        .to_string();
        let bare = parse_reply(&object).unwrap().0;
        let embedded = parse_reply(&format!("{prefix}{object}{suffix}")).unwrap().0;
        prop_assert_eq!(bare, embedded);
    }

    #[test]
    fn prop_known_category_ignores_suggestion(
        label in label_strategy(),
        suggestion in "(?s).{0,30}",
    ) {
        let reply = serde_json::json!({
            "is_food": true,
            "category": label,
            "bracha": suggestion,
            "explanation": "",
        })
        .to_string();
        let query = FoodQuery::parse("מאכל").unwrap();
        let expected = brachabot::Category::from_label(label).and_then(|c| c.blessing()).unwrap();
        prop_assert_eq!(decide(&query, &reply).unwrap(), Decision::Blessing(expected));
    }
}
