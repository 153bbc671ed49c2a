use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSet {
    pub card_set_id: i64,
    pub set_name: String,
    pub set_code: String,
    pub num_of_cards: i64,
    /// `YYYY-MM-DD`.
    pub tcg_date: Option<String>,
    pub set_image: Option<String>,
    /// Sum of member prints times their tcgplayer price, in cents.
    #[serde(default)]
    pub total_price: i64,
}

/// One card inside a set, as listed by the set-members query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMember {
    pub card_set_id: i64,
    pub set_name: String,
    pub set_code: String,
    pub card_id: i64,
    pub name: String,
    pub attack: Option<i64>,
    pub defence: Option<i64>,
    pub level: Option<i64>,
    pub archetype: Option<String>,
    pub attribute: Option<String>,
    pub frametype: Option<String>,
    pub race: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub num_of_prints: i64,
    pub tcgplayer_price: Option<i64>,
}
