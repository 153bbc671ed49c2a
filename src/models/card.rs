use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub card_id: i64,
    pub name: String,
    pub descr: String,
    pub pend_descr: Option<String>,
    pub monster_descr: Option<String>,
    pub attack: Option<i64>,
    pub defence: Option<i64>,
    pub level: Option<i64>,
    pub archetype: Option<String>,
    pub attribute: Option<String>,
    pub frametype: Option<String>,
    pub race: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,

    // -- Associated collections, filled in after the card row is fetched --
    #[serde(default)]
    pub card_sets: Vec<CardSetPrint>,
    #[serde(default)]
    pub linkmarkers: Vec<String>,
    #[serde(default)]
    pub banlists: Vec<Banlist>,
    #[serde(default)]
    pub images: Vec<CardImage>,
    #[serde(default)]
    pub card_prices: Vec<CardPrice>,
}

/// A card's membership in a set, with the number of print variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSetPrint {
    pub card_id: i64,
    pub card_set_id: i64,
    pub set_name: String,
    pub set_code: String,
    pub num_of_cards: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banlist {
    pub card_id: i64,
    pub ban_org: String,
    pub ban_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardImage {
    pub card_id: i64,
    pub image_url: Option<String>,
    pub image_url_cropped: Option<String>,
    pub image_url_small: Option<String>,
}

/// Prices in integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPrice {
    pub card_id: i64,
    pub amazon_price: i64,
    pub cardmarket_price: i64,
    pub coolstuffinc_price: i64,
    pub ebay_price: i64,
    pub tcgplayer_price: i64,
}

// ---------------------------------------------------------------------------
// NewCard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub card_id: i64,
    pub name: String,
    pub descr: String,
    pub pend_descr: Option<String>,
    pub monster_descr: Option<String>,
    pub attack: Option<i64>,
    pub defence: Option<i64>,
    pub level: Option<i64>,
    pub archetype: Option<String>,
    pub attribute: Option<String>,
    pub frametype: Option<String>,
    pub race: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
}

impl From<NewCard> for Card {
    fn from(c: NewCard) -> Self {
        Card {
            card_id: c.card_id,
            name: c.name,
            descr: c.descr,
            pend_descr: c.pend_descr,
            monster_descr: c.monster_descr,
            attack: c.attack,
            defence: c.defence,
            level: c.level,
            archetype: c.archetype,
            attribute: c.attribute,
            frametype: c.frametype,
            race: c.race,
            card_type: c.card_type,
            card_sets: Vec::new(),
            linkmarkers: Vec::new(),
            banlists: Vec::new(),
            images: Vec::new(),
            card_prices: Vec::new(),
        }
    }
}

/// Archetype popularity entry; `position` is 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rank {
    pub name: String,
    pub total: i64,
    pub position: i64,
}
