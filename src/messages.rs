//! Shared text sent by the bot.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

pub const HELP_TEXT: &str = "שלום! שלח/י שם של מאכל או מנה (גם מורכבת) ואחזיר את הברכה המתאימה.\n\
     דוגמה: 'סלט קינואה עם חזה עוף', 'תפוח', 'קרואסון'.";

pub const EMPTY_QUERY: &str = "שלח/י שם מאכל אחד 😄";

pub fn not_food_text(query: &str) -> String {
    format!("{query} זה לא מאכל")
}
