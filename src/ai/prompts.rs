//! Instruction text sent to the classifier.
//!
//! Centralizing these strings makes it easy to tweak the rules without
//! digging through the request code.

use serde_json::{json, Value};

use crate::ai::blessing::{Blessing, Category, NOT_FOOD_MARKER};
use crate::ai::config::ResponseContract;
use crate::food::FoodQuery;

/// Decision rules shared by every contract, in priority order.
pub const RULES_PROMPT: &str = "אתה מומחה בהלכה יהודית בענייני ברכות. מטרתך: לקבוע ברכה ראשונה מדויקת לפי כללים הלכתיים נפוצים.
אם הקלט אינו מאכל – עליך לציין זאת במפורש.

כללים תמציתיים:
- לחם ודומיו (פת): \"המוציא\".
- דגנים שאינם לחם (פת הבאה בכסנין, עוגות/עוגיות/בורקס, דייסות, קוסקוס/פסטה/איטריות/בורגול/אורז מבושלים): \"מזונות\".
- פרי עץ אמיתי: \"בורא פרי העץ\".
- גידולי קרקע שאינם עץ (לרבות בננה): \"בורא פרי האדמה\".
- יין (יין אדום, יין לבן, יין מתוק, מיץ ענבים לקידוש): \"יין\".
- בשר/דגים/ביצים/גבינות/משקאות/ממתקים/מאכלים מעובדים/תערובות ללא רכיב דגן עיקרי: \"שהכל\".
- מנה מורכבת: המרכיב העיקרי קובע.
- אם זה לא מאכל: is_food=false, category=\"לא_מאכל\", bracha=\"—\".
- אם חסר מידע או קיימת מחלוקת משמעותית: category=\"לא_ידוע\" עם הסבר קצר.

דוגמאות קצרות:
- \"תפוח\" → פרי_עץ/בורא פרי העץ.
- \"בננה\" → פרי_אדמה/בורא פרי האדמה.
- \"קרואסון\" (רגיל, לא קביעת סעודה) → מזונות/בורא מיני מזונות.
- \"שניצל\" → שהכל/שהכל נהיה בדברו.";

/// Appended when the request carries a `json_schema` response format.
pub const JSON_ONLY_PROMPT: &str = "החזר אך ורק JSON תקין לפי הסכימה שסופקה, ללא טקסט נוסף.";

/// Name of the schema in the `response_format` block.
pub const SCHEMA_NAME: &str = "brachabot";

/// JSON schema for the structured reply.
pub fn response_schema() -> Value {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    json!({
        "type": "object",
        "properties": {
            "is_food": { "type": "boolean" },
            "category": { "type": "string", "enum": categories },
            "bracha": {
                "type": "string",
                "description": "הברכה הראשונה המתאימה או '—' אם לא מאכל/לא ידוע",
            },
            "explanation": { "type": "string" },
            "notes": { "type": "string" },
        },
        "required": ["is_food", "category", "bracha", "explanation"],
        "additionalProperties": false,
    })
}

fn free_text_prompt() -> String {
    let phrases: Vec<String> = Blessing::ALL
        .iter()
        .map(|b| format!("\"{}\"", b.phrase()))
        .collect();
    format!(
        "ענה במשפט אחד שמכיל בדיוק אחת מהברכות הבאות: {}. אם הקלט אינו מאכל, כתוב \"{NOT_FOOD_MARKER}\" ואל תציין ברכה.",
        phrases.join(", ")
    )
}

/// Complete instruction payload for one classifier call.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierPrompt {
    pub system: String,
    pub user: String,
    pub contract: ResponseContract,
}

/// Build the instruction payload for `query`.
///
/// `details` is an optional qualifier; an empty string is rendered as `—`.
pub fn build_prompt(
    query: &FoodQuery,
    details: &str,
    contract: ResponseContract,
) -> ClassifierPrompt {
    let system = match contract {
        ResponseContract::JsonSchema => format!("{RULES_PROMPT}\n\n{JSON_ONLY_PROMPT}"),
        ResponseContract::JsonInstruction => format!(
            "{RULES_PROMPT}\n\nהחזר JSON תקין בלבד לפי הסכימה: {}",
            response_schema()
        ),
        ResponseContract::FreeText => format!("{RULES_PROMPT}\n\n{}", free_text_prompt()),
    };
    let details = details.trim();
    let details = if details.is_empty() { "—" } else { details };
    let user = format!(
        "שם המאכל: \"{}\"\nתיאור (אופציונלי): {details}",
        query.as_str()
    );
    ClassifierPrompt {
        system,
        user,
        contract,
    }
}
