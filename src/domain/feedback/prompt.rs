//! Prompt construction for the classification request.

/// Instruction block sent ahead of every comment.
pub const INSTRUCTION: &str = "Analyze the following feedback comment and provide the analysis results as a JSON object.

The JSON object must contain the following keys and value types:
- sentiment (string: \"Positive\", \"Negative\", \"Neutral\", \"Mixed\")
- category (string: \"Lecture Content\", \"Lecture Materials\", \"Operations\", \"Other\")
- importance (integer: 1 to 5, where 5 is highest urgency/impact)
- isHighRisk (boolean: true or false)

Respond **EXACTLY and ONLY** with the JSON object. Do NOT include any other text, explanations, or conversational filler before or after the JSON object.";

/// Builds the prompt for one comment. Deterministic for a given input.
pub fn build_prompt(comment: &str) -> String {
    format!("{INSTRUCTION}\n\nComment: {comment}\n")
}
