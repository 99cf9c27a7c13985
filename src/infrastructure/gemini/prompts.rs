//! Prompt text and response schemas sent to the backend.
//!
//! Schemas use the OpenAPI subset `generateContent` accepts. The profile schema
//! mirrors [`ProfileRecord`](crate::domain::models::ProfileRecord); decoding is
//! still validated locally because the backend does not always honor it.

use serde_json::{json, Value};

/// Number of names asked for per suggestion lookup.
pub const SUGGESTION_COUNT: usize = 5;

pub fn suggestion_prompt(partial: &str) -> String {
    format!(
        "Suggest {SUGGESTION_COUNT} well-known singers or actors whose name relates to \"{partial}\". \
         Return only the list of names."
    )
}

pub fn suggestion_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" }
    })
}

pub const PROFILE_SYSTEM_INSTRUCTION: &str = "You are a cold, exacting global data analyst. \
Fame means penetration across languages and regions worldwide; regional fame counts as local \
data only. Score prolific but low-impact output harshly. Always answer in JSON.";

pub fn profile_prompt(name: &str) -> String {
    format!(
        "Research \"{name}\" and assign a strict global fame index (TIER INDEX) from 0.0 to 10.0.\n\
         Scale:\n\
         - 6.0: baseline global recognition across several cultural or language regions. \
         Figures famous in a single region never exceed 6.0, however dominant they are there.\n\
         - 8.0: recognized by most people in any major country, backed by cross-generational or \
         dominant global commercial numbers (world tours, global box office).\n\
         - 9.0+: reserved for historic figures whose artistic value and global reach are a \
         consensus of humankind.\n\
         Rules: discount every conventional success metric by 30%; for actors count only leading \
         roles; for singers divide total plays by the number of works; push regional acts below 6.0.\n\
         Provide a detailed analysis and follow the JSON schema exactly."
    )
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

pub fn profile_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": string(),
            "originalName": string(),
            "stageName": string(),
            "popularityRating": { "type": "NUMBER" },
            "ratingJustification": string(),
            "totalStats": {
                "type": "OBJECT",
                "properties": {
                    "views": { "type": "STRING", "description": "Average efficiency of core official works" },
                    "sales": { "type": "STRING", "description": "Leading-role global box office or official album sales" },
                    "followers": { "type": "STRING", "description": "Cross-language global recognition scale" },
                    "awards": { "type": "STRING", "description": "Short summary of major global awards, e.g. 3 Oscar, 12 Grammy" }
                }
            },
            "basicInfo": {
                "type": "OBJECT",
                "properties": {
                    "age": string(),
                    "nationality": string(),
                    "gender": string(),
                    "spouse": string(),
                    "birthDate": string(),
                    "awards": string_array()
                },
                "required": ["age", "nationality", "gender", "spouse", "birthDate", "awards"]
            },
            "socialLinks": {
                "type": "OBJECT",
                "properties": {
                    "facebook": string(),
                    "twitter": string(),
                    "instagram": string()
                }
            },
            "growthBackground": string(),
            "careerStory": string(),
            "works": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": string(),
                        "year": string(),
                        "role": string(),
                        "stats": string()
                    },
                    "required": ["title", "year"]
                }
            },
            "famousWorks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": string(),
                        "youtubeUrl": string()
                    },
                    "required": ["title", "youtubeUrl"]
                }
            },
            "featuredMedia": {
                "type": "OBJECT",
                "properties": {
                    "title": string(),
                    "type": { "type": "STRING", "enum": ["album", "movie"] },
                    "description": string(),
                    "releaseDate": string(),
                    "relatedPeople": string_array()
                },
                "required": ["title", "type", "description", "releaseDate", "relatedPeople"]
            },
            "relatedCelebrities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": string(),
                        "relationship": string()
                    },
                    "required": ["name", "relationship"]
                }
            },
            "others": string(),
            "tags": string_array()
        },
        "required": [
            "name", "originalName", "stageName", "popularityRating", "ratingJustification",
            "totalStats", "basicInfo", "socialLinks", "growthBackground", "careerStory",
            "works", "famousWorks", "featuredMedia", "relatedCelebrities", "others", "tags"
        ]
    })
}
