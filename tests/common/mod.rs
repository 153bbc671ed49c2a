//! Shared test fixtures for the catalog integration tests.
//!
//! `setup_catalog()` builds an in-memory DuckDB database, seeds it through the
//! population primitives with a handful of cards, three sets and two trivia
//! questions, and then opens a `Catalog` on it (which loads the cache).
//!
//! Sets get ids from a sequence in insertion order: LOB = 1, SDK = 2, MRD = 3.

#![allow(dead_code)]

use ygo_catalog::populate::{self, Populator, RawCard, RawCardSet, RawTrivia};
use ygo_catalog::{schema, Catalog, Database};

pub const BLUE_EYES_WHITE_DRAGON: i64 = 10;
pub const BLUE_EYES_ABYSS_DRAGON: i64 = 11;
pub const BLUE_EYES_JET_DRAGON: i64 = 12;
pub const DARK_MAGICIAN: i64 = 20;
pub const POT_OF_GREED: i64 = 30;
pub const DECODE_TALKER: i64 = 40;

pub const LOB: i64 = 1;
pub const SDK: i64 = 2;
pub const MRD: i64 = 3;

/// Open a seeded in-memory catalog.
pub fn setup_catalog() -> Catalog {
    let db = seeded_database();
    Catalog::open(db).unwrap()
}

/// An in-memory database with the schema applied and the sample data written,
/// without a catalog on top.
pub fn seeded_database() -> Database {
    let db = Database::open_in_memory().unwrap();
    {
        let conn = db.connect().unwrap();
        schema::apply(&conn).unwrap();
        let report = Populator::new(&conn).run(&sample_cards(), &sample_sets(), &sample_trivia());
        assert!(report.is_success(), "fixture population failed: {:?}", report.failed);
    }
    db
}

/// An in-memory catalog with the schema but no rows.
pub fn empty_catalog() -> Catalog {
    Catalog::builder().in_memory().build().unwrap()
}

pub fn sample_cards() -> Vec<RawCard> {
    let doc = serde_json::json!({
        "data": [
            {
                "id": 10,
                "name": "Blue-Eyes White Dragon",
                "desc": "This legendary dragon is a powerful engine of destruction.",
                "frameType": "normal",
                "type": "Normal Monster",
                "race": "Dragon",
                "archetype": "Blue-Eyes",
                "attribute": "LIGHT",
                "atk": 3000,
                "def": 2500,
                "level": 8,
                "card_sets": [
                    {"set_name": "Legend of Blue Eyes White Dragon", "set_code": "LOB-001"},
                    {"set_name": "Legend of Blue Eyes White Dragon", "set_code": "LOB-E001"},
                    {"set_name": "Starter Deck: Kaiba", "set_code": "SDK-001"}
                ],
                "card_prices": [{
                    "amazon_price": "2.00",
                    "cardmarket_price": "0.10",
                    "coolstuffinc_price": "0.49",
                    "ebay_price": "0.99",
                    "tcgplayer_price": "1.50"
                }],
                "card_images": [{
                    "id": 10,
                    "image_url": "https://images.example/10.jpg",
                    "image_url_small": "https://images.example/10_small.jpg",
                    "image_url_cropped": "https://images.example/10_cropped.jpg"
                }]
            },
            {
                "id": 11,
                "name": "Blue-Eyes Abyss Dragon",
                "desc": "If this card is Normal or Special Summoned: You can add 1 Ritual Spell from your Deck to your hand.",
                "frameType": "effect",
                "type": "Effect Monster",
                "race": "Dragon",
                "archetype": "Blue-Eyes",
                "attribute": "LIGHT",
                "atk": 2500,
                "def": 2500,
                "level": 8
            },
            {
                "id": 12,
                "name": "Blue-Eyes Jet Dragon",
                "desc": "Cannot be destroyed by your opponent's card effects while you control a Blue-Eyes monster.",
                "frameType": "effect",
                "type": "Effect Monster",
                "race": "Dragon",
                "archetype": "Blue-Eyes",
                "attribute": "LIGHT",
                "atk": 2500,
                "def": 3000,
                "level": 8,
                "banlist_info": {"ban_tcg": "Limited"}
            },
            {
                "id": 20,
                "name": "Dark Magician",
                "desc": "The ultimate wizard in terms of attack and defense.",
                "frameType": "normal",
                "type": "Normal Monster",
                "race": "Spellcaster",
                "archetype": "Dark Magician",
                "attribute": "DARK",
                "atk": 2500,
                "def": 2100,
                "level": 7,
                "card_sets": [
                    {"set_name": "legend of blue eyes white dragon", "set_code": "LOB-005"}
                ],
                "card_prices": [{"tcgplayer_price": "0.25"}]
            },
            {
                "id": 30,
                "name": "Pot of Greed",
                "desc": "Draw 2 cards.",
                "frameType": "spell",
                "type": "Spell Card",
                "race": "Normal",
                "banlist_info": {"ban_tcg": "Banned", "ban_ocg": "Banned"}
            },
            {
                "id": 40,
                "name": "Decode Talker",
                "desc": "2+ Effect Monsters",
                "frameType": "link",
                "type": "Link Monster",
                "race": "Cyberse",
                "archetype": "Code Talker",
                "attribute": "dark",
                "atk": 2300,
                "linkmarkers": ["Top", "Bottom-Left", "Bottom-Right"]
            }
        ]
    });
    populate::parse_cards(doc).unwrap()
}

pub fn sample_sets() -> Vec<RawCardSet> {
    let doc = serde_json::json!([
        {
            "set_name": "Legend of Blue Eyes White Dragon",
            "set_code": "LOB",
            "num_of_cards": 126,
            "tcg_date": "2002-03-08"
        },
        {
            "set_name": "Starter Deck: Kaiba",
            "set_code": "SDK",
            "num_of_cards": 50,
            "tcg_date": "2002-03-29"
        },
        {
            "set_name": "Metal Raiders",
            "set_code": "MRD",
            "num_of_cards": 144,
            "tcg_date": "2002-06-26",
            "set_image": "https://images.example/sets/MRD.jpg"
        }
    ]);
    populate::parse_card_sets(doc).unwrap()
}

pub fn sample_trivia() -> Vec<RawTrivia> {
    let doc = serde_json::json!([
        {
            "question": "What is the ATK of Blue-Eyes White Dragon?",
            "explanation": "Blue-Eyes White Dragon has 3000 ATK.",
            "source": "Legend of Blue Eyes White Dragon",
            "answers": [
                {"answer": "2500", "is_correct_answer": false},
                {"answer": "3000", "is_correct_answer": true},
                {"answer": "4000", "is_correct_answer": false}
            ]
        },
        {
            "question": "How many cards does Pot of Greed draw?",
            "explanation": "Draw 2 cards.",
            "source": null,
            "answers": [
                {"answer": "1", "is_correct_answer": false},
                {"answer": "2", "is_correct_answer": true},
                {"answer": "3", "is_correct_answer": false}
            ]
        }
    ]);
    populate::parse_trivia(doc).unwrap()
}

/// Card ids of a page, in order.
pub fn ids<T, F: Fn(&T) -> i64>(results: &[T], id: F) -> Vec<i64> {
    results.iter().map(id).collect()
}
