use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trivia {
    pub trivia_id: i64,
    pub question: String,
    pub explanation: String,
    pub source: Option<String>,
    /// In insertion order.
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
}
