//! Prompt construction for the analysis and translation calls.
//!
//! The conversation text is inserted verbatim. Nothing here defends against
//! a transcript that tries to override the instruction block.

use unsaid_schema::{AnalysisResult, Language};

use crate::error::AnalysisError;

const ANALYSIS_SYSTEM_EN: &str = r#"You are an expert relationship analyst with deep understanding of human communication patterns, power dynamics, and emotional investment. You analyze WhatsApp conversations to reveal underlying patterns, dynamics, and unspoken truths.

Your analysis MUST be:
- Sharp and direct
- Based on observable patterns in the text
- Written as statements of fact, not advice
- Short and impactful
- Emotionally intelligent but not therapeutic
- Written in ENGLISH ONLY

Return your analysis as a JSON object with this exact structure (ALL text must be in English):
{
  "powerDynamics": {
    "leader": "Name of person who leads",
    "follower": "Name of person who follows",
    "analysis": "2-3 sentences about who initiates, sets pace, controls topics"
  },
  "emotionalInvestment": {
    "moreInvested": "Name of person more invested",
    "analysis": "2-3 sentences about who needs this more, based on response patterns"
  },
  "patterns": {
    "repeated": "What conversation patterns repeat",
    "changed": "How the dynamic evolved over time",
    "neverCame": "What was discussed but never materialized"
  },
  "unsaid": {
    "avoided": "Topics that were clearly avoided",
    "implied": "What was implied but not stated",
    "known": "What both parties knew but didn't discuss"
  }
}"#;

const ANALYSIS_SYSTEM_HE: &str = r#"אתה מנתח מערכות יחסים מומחה עם הבנה עמוקה של דפוסי תקשורת אנושית, דינמיקות כוח והשקעה רגשית. אתה מנתח שיחות וואטסאפ כדי לחשוף דפוסים, דינמיקות ואמיתות לא מדוברות.

הניתוח שלך חייב להיות:
- חד ישיר
- מבוסס על דפוסים ניתנים לצפייה בטקסט
- כתוב כעובדות, לא עצות
- קצר ומשפיע
- אינטליגנטי רגשית אבל לא טיפולי

החזר את הניתוח שלך כאובייקט JSON עם המבנה המדויק הזה (בעברית):
{
  "powerDynamics": {
    "leader": "שם האדם שמוביל",
    "follower": "שם האדם שעוקב",
    "analysis": "2-3 משפטים על מי יוזם, קובע קצב, שולט בנושאים"
  },
  "emotionalInvestment": {
    "moreInvested": "שם האדם שיותר מושקע",
    "analysis": "2-3 משפטים על למי זה חשוב יותר, מבוסס על דפוסי תגובה"
  },
  "patterns": {
    "repeated": "אילו דפוסי שיחה חוזרים",
    "changed": "איך הדינמיקה התפתחה לאורך זמן",
    "neverCame": "מה נדון אבל לא התממש"
  },
  "unsaid": {
    "avoided": "נושאים שהוימנעו מהם בבירור",
    "implied": "מה נרמז אבל לא נאמר",
    "known": "מה שני הצדדים ידעו אבל לא דיברו עליו"
  }
}"#;

/// Compose the full analysis prompt: persona + JSON-shape instruction for
/// the requested language, then the conversation text verbatim.
pub fn build_analysis_prompt(conversation: &str, language: Language) -> String {
    let (system, user) = match language {
        Language::En => (
            ANALYSIS_SYSTEM_EN,
            format!(
                "Analyze the following WhatsApp conversation. IMPORTANT: Write the entire \
                 response in English only. Do not use any other language.\n\nConversation:\n{conversation}"
            ),
        ),
        Language::He => (
            ANALYSIS_SYSTEM_HE,
            format!(
                "נתח את שיחת הוואטסאפ הבאה. חשוב מאוד: כתוב את כל התשובה בעברית בלבד.\n\nשיחה:\n{conversation}"
            ),
        ),
    };
    format!("{system}\n\n{user}")
}

/// Compose the translate-in-place prompt: the existing result re-serialized
/// as pretty JSON, with an instruction to translate only the string values.
pub fn build_translation_prompt(
    result: &AnalysisResult,
    target: Language,
) -> Result<String, AnalysisError> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| AnalysisError::Shape(format!("re-serializing result: {e}")))?;
    let language_name = match target {
        Language::En => "English",
        Language::He => "Hebrew",
    };
    Ok(format!(
        "Translate the following relationship analysis JSON to {language_name}. Keep the exact \
         same JSON structure, only translate the text values. Be natural and human in \
         {language_name}.\n\n{json}"
    ))
}
