//! Offline population of the catalog from card-info, card-set and trivia dumps.
//!
//! Every step runs in its own transaction. A failing step is rolled back and
//! logged; the remaining steps still run. Nothing here is reachable from the
//! request path.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::cache::{add_enum_value_if_absent, EnumKind};
use crate::connection::Connection;
use crate::error::{CatalogError, Result};
use crate::sql_builder::SqlParam;

// ---------------------------------------------------------------------------
// Source records
// ---------------------------------------------------------------------------

/// One card as found in the card-info dump.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    pub id: i64,
    pub name: String,
    pub desc: String,
    pub pend_desc: Option<String>,
    pub monster_desc: Option<String>,
    pub atk: Option<i64>,
    pub def: Option<i64>,
    pub level: Option<i64>,
    pub archetype: Option<String>,
    pub attribute: Option<String>,
    #[serde(rename = "frameType")]
    pub frame_type: Option<String>,
    pub race: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    #[serde(default)]
    pub card_sets: Vec<RawCardSetEntry>,
    #[serde(default)]
    pub card_prices: Vec<RawCardPrice>,
    #[serde(default)]
    pub linkmarkers: Vec<String>,
    pub banlist_info: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub card_images: Vec<RawCardImage>,
}

impl RawCard {
    fn enum_value(&self, kind: EnumKind) -> Option<&str> {
        let value = match kind {
            EnumKind::Archetype => &self.archetype,
            EnumKind::Attribute => &self.attribute,
            EnumKind::Frametype => &self.frame_type,
            EnumKind::Race => &self.race,
            EnumKind::Type => &self.card_type,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

/// A print of a card inside a set; several entries may name the same set.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCardSetEntry {
    pub set_name: String,
    #[serde(default)]
    pub set_code: Option<String>,
}

/// Prices as decimal strings, e.g. `"0.25"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCardPrice {
    pub amazon_price: Option<String>,
    pub cardmarket_price: Option<String>,
    pub coolstuffinc_price: Option<String>,
    pub ebay_price: Option<String>,
    pub tcgplayer_price: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCardImage {
    pub id: i64,
    pub image_url: Option<String>,
    pub image_url_cropped: Option<String>,
    pub image_url_small: Option<String>,
}

/// One entry of the card-set dump.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCardSet {
    pub set_name: String,
    pub set_code: String,
    #[serde(default)]
    pub num_of_cards: i64,
    pub tcg_date: Option<String>,
    pub set_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrivia {
    pub question: String,
    pub explanation: String,
    pub source: Option<String>,
    pub answers: Vec<RawTriviaAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTriviaAnswer {
    pub answer: String,
    pub is_correct_answer: bool,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read a JSON document from an `http(s)` URL or a local file (`.gz` is
/// decompressed).
pub fn load_source(source: &str) -> Result<serde_json::Value> {
    if source.starts_with("http://") || source.starts_with("https://") {
        tracing::info!(url = source, "downloading source");
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;
        let value = client.get(source).send()?.error_for_status()?.json()?;
        return Ok(value);
    }

    let path = Path::new(source);
    tracing::info!(path = %path.display(), "reading source");
    let reader = BufReader::new(fs::File::open(path)?);
    let value = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        serde_json::from_reader(BufReader::new(GzDecoder::new(reader)))?
    } else {
        serde_json::from_reader(reader)?
    };
    Ok(value)
}

/// Cards from a card-info document: either `{"data": [...]}` or a bare array.
pub fn parse_cards(value: serde_json::Value) -> Result<Vec<RawCard>> {
    let value = match value {
        serde_json::Value::Object(mut obj) => obj.remove("data").unwrap_or_default(),
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

pub fn parse_card_sets(value: serde_json::Value) -> Result<Vec<RawCardSet>> {
    Ok(serde_json::from_value(value)?)
}

pub fn parse_trivia(value: serde_json::Value) -> Result<Vec<RawTrivia>> {
    Ok(serde_json::from_value(value)?)
}

/// Decimal price string to integer cents; missing means 0.
fn price_cents(raw: Option<&str>) -> std::result::Result<i64, std::num::ParseFloatError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(0),
        Some(s) => Ok((s.parse::<f64>()? * 100.0).round() as i64),
    }
}

fn blank_as_null(value: Option<&str>) -> SqlParam {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(SqlParam::from)
        .unwrap_or(SqlParam::Null)
}

// ---------------------------------------------------------------------------
// Populator
// ---------------------------------------------------------------------------

/// Rows written by each step of a run; a step that failed is absent.
#[derive(Debug, Default)]
pub struct PopulationReport {
    pub written: Vec<(&'static str, usize)>,
    pub failed: Vec<&'static str>,
}

impl PopulationReport {
    fn record(&mut self, step: &'static str, outcome: Result<usize>) {
        match outcome {
            Ok(n) => {
                tracing::info!(step, rows = n, "population step done");
                self.written.push((step, n));
            }
            Err(e) => {
                tracing::warn!(step, error = %e, "population step failed and was rolled back");
                self.failed.push(step);
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes source records into the store.
pub struct Populator<'a> {
    conn: &'a Connection,
}

impl<'a> Populator<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Run every step in dependency order.
    pub fn run(
        &self,
        cards: &[RawCard],
        card_sets: &[RawCardSet],
        trivia: &[RawTrivia],
    ) -> PopulationReport {
        let mut report = PopulationReport::default();
        report.record("enums", Ok(self.enums(cards)));
        report.record("cards", self.cards(cards));
        report.record("sets", self.sets(card_sets));
        report.record("cards_in_sets", self.cards_in_sets(cards));
        report.record("prices", self.prices(cards));
        report.record("linkmarkers", self.linkmarkers(cards));
        report.record("banlist", self.banlist(cards));
        report.record("images", self.images(cards));
        if !trivia.is_empty() {
            report.record("trivia", self.trivia(trivia));
        }
        report
    }

    /// Extend each enum with every distinct value the cards use. Returns the
    /// number of values added.
    pub fn enums(&self, cards: &[RawCard]) -> usize {
        let mut added = 0;
        for kind in EnumKind::ALL {
            let values: BTreeSet<&str> = cards.iter().filter_map(|c| c.enum_value(kind)).collect();
            for value in values {
                if add_enum_value_if_absent(self.conn, kind, value) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Insert cards, skipping ids that already exist. Blank race, type and
    /// frametype are stored as NULL.
    pub fn cards(&self, cards: &[RawCard]) -> Result<usize> {
        let rows: Vec<Vec<SqlParam>> = cards
            .iter()
            .map(|c| {
                vec![
                    c.id.into(),
                    c.name.trim().into(),
                    c.desc.trim().into(),
                    c.pend_desc.clone().into(),
                    c.monster_desc.clone().into(),
                    c.atk.into(),
                    c.def.into(),
                    c.level.into(),
                    blank_as_null(c.archetype.as_deref()),
                    blank_as_null(c.attribute.as_deref().map(str::to_uppercase).as_deref()),
                    blank_as_null(c.frame_type.as_deref()),
                    blank_as_null(c.race.as_deref()),
                    blank_as_null(c.card_type.as_deref()),
                ]
            })
            .collect();

        self.conn.transaction(|tx| {
            tx.execute_many(
                r#"INSERT INTO cards (
                    card_id, name, descr, pend_descr, monster_descr, attack, defence, level,
                    archetype, attribute, frametype, race, "type"
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT DO NOTHING"#,
                &rows,
            )
        })
    }

    /// Insert sets, skipping names that already exist.
    pub fn sets(&self, card_sets: &[RawCardSet]) -> Result<usize> {
        let rows: Vec<Vec<SqlParam>> = card_sets
            .iter()
            .map(|s| {
                vec![
                    s.set_name.trim().into(),
                    s.set_code.trim().into(),
                    s.num_of_cards.max(0).into(),
                    blank_as_null(s.tcg_date.as_deref()),
                    blank_as_null(s.set_image.as_deref()),
                ]
            })
            .collect();

        self.conn.transaction(|tx| {
            tx.execute_many(
                "INSERT INTO card_sets (set_name, set_code, num_of_cards, tcg_date, set_image)
                 VALUES (?, ?, ?, CAST(? AS DATE), ?)
                 ON CONFLICT (set_name) DO NOTHING",
                &rows,
            )
        })
    }

    /// Count print variants per (card, set) and upsert the counts. Set names
    /// are matched case-insensitively; entries naming an unknown set are
    /// skipped.
    pub fn cards_in_sets(&self, cards: &[RawCard]) -> Result<usize> {
        let mut prints: BTreeMap<(i64, String), i64> = BTreeMap::new();
        for card in cards {
            for entry in &card.card_sets {
                *prints
                    .entry((card.id, entry.set_name.trim().to_lowercase()))
                    .or_insert(0) += 1;
            }
        }

        let set_ids: HashMap<String, i64> = self
            .conn
            .execute("SELECT set_name, card_set_id FROM card_sets", &[])?
            .into_iter()
            .filter_map(|row| {
                let name = row.get("set_name")?.as_str()?.trim().to_lowercase();
                let id = row.get("card_set_id")?.as_i64()?;
                Some((name, id))
            })
            .collect();

        let mut rows = Vec::with_capacity(prints.len());
        for ((card_id, set_name), count) in prints {
            match set_ids.get(&set_name) {
                Some(set_id) => rows.push(vec![
                    SqlParam::Int(card_id),
                    SqlParam::Int(*set_id),
                    SqlParam::Int(count),
                ]),
                None => {
                    tracing::warn!(card_id, set_name = %set_name, "card references unknown set")
                }
            }
        }

        self.conn.transaction(|tx| {
            tx.execute_many(
                "INSERT INTO cards_in_sets (card_id, card_set_id, num_of_cards)
                 VALUES (?, ?, ?)
                 ON CONFLICT (card_id, card_set_id)
                 DO UPDATE SET num_of_cards = EXCLUDED.num_of_cards",
                &rows,
            )
        })
    }

    /// First price entry of each card, in cents.
    pub fn prices(&self, cards: &[RawCard]) -> Result<usize> {
        let mut rows = Vec::new();
        for card in cards {
            let Some(p) = card.card_prices.first() else {
                continue;
            };
            let parsed = [
                price_cents(p.amazon_price.as_deref()),
                price_cents(p.cardmarket_price.as_deref()),
                price_cents(p.coolstuffinc_price.as_deref()),
                price_cents(p.ebay_price.as_deref()),
                price_cents(p.tcgplayer_price.as_deref()),
            ];
            let cents: std::result::Result<Vec<i64>, _> = parsed.into_iter().collect();
            match cents {
                Ok(cents) => {
                    let mut row = vec![SqlParam::Int(card.id)];
                    row.extend(cents.into_iter().map(SqlParam::Int));
                    rows.push(row);
                }
                Err(e) => {
                    tracing::warn!(card_id = card.id, error = %e, "unparseable price skipped")
                }
            }
        }

        self.conn.transaction(|tx| {
            tx.execute_many(
                "INSERT INTO card_prices (
                    card_id, amazon_price, cardmarket_price, coolstuffinc_price,
                    ebay_price, tcgplayer_price
                 ) VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT DO NOTHING",
                &rows,
            )
        })
    }

    pub fn linkmarkers(&self, cards: &[RawCard]) -> Result<usize> {
        let rows: Vec<Vec<SqlParam>> = cards
            .iter()
            .flat_map(|c| {
                c.linkmarkers
                    .iter()
                    .map(move |m| vec![SqlParam::Int(c.id), m.trim().into()])
            })
            .collect();

        self.conn.transaction(|tx| {
            tx.execute_many(
                r#"INSERT INTO linkmarkers (card_id, "position") VALUES (?, ?)
                ON CONFLICT DO NOTHING"#,
                &rows,
            )
        })
    }

    /// Replace the whole ban list. Keys such as `ban_tcg` are stored as `tcg`.
    pub fn banlist(&self, cards: &[RawCard]) -> Result<usize> {
        let rows: Vec<Vec<SqlParam>> = cards
            .iter()
            .filter_map(|c| c.banlist_info.as_ref().map(|info| (c.id, info)))
            .flat_map(|(card_id, info)| {
                info.iter().map(move |(org, ban_type)| {
                    vec![
                        SqlParam::Int(card_id),
                        org.replace("ban_", "").trim().into(),
                        ban_type.trim().into(),
                    ]
                })
            })
            .collect();

        // DuckDB checks unique keys eagerly, so rows deleted and re-inserted
        // inside one transaction would conflict.
        self.conn
            .transaction(|tx| tx.execute_statement("DELETE FROM banlist", &[]))?;
        self.conn.transaction(|tx| {
            tx.execute_many(
                "INSERT INTO banlist (card_id, ban_org, ban_type) VALUES (?, ?, ?)
                 ON CONFLICT DO NOTHING",
                &rows,
            )
        })
    }

    /// Image references as given by the source; nothing is downloaded.
    pub fn images(&self, cards: &[RawCard]) -> Result<usize> {
        let rows: Vec<Vec<SqlParam>> = cards
            .iter()
            .flat_map(|c| c.card_images.iter())
            .map(|img| {
                vec![
                    SqlParam::Int(img.id),
                    blank_as_null(img.image_url.as_deref()),
                    blank_as_null(img.image_url_cropped.as_deref()),
                    blank_as_null(img.image_url_small.as_deref()),
                ]
            })
            .collect();

        self.conn.transaction(|tx| {
            tx.execute_many(
                "INSERT INTO card_images (card_id, image_url, image_url_cropped, image_url_small)
                 VALUES (?, ?, ?, ?)
                 ON CONFLICT DO NOTHING",
                &rows,
            )
        })
    }

    /// Insert trivia questions and their answers.
    ///
    /// Every question must have exactly one correct answer; if any does not,
    /// nothing is written and the step fails.
    pub fn trivia(&self, trivia: &[RawTrivia]) -> Result<usize> {
        if let Some(bad) = trivia
            .iter()
            .find(|t| t.answers.iter().filter(|a| a.is_correct_answer).count() != 1)
        {
            let correct = bad.answers.iter().filter(|a| a.is_correct_answer).count();
            return Err(CatalogError::InvalidArgument(format!(
                "trivia {:?} has {} correct answers",
                bad.question, correct
            )));
        }

        let questions: Vec<Vec<SqlParam>> = trivia
            .iter()
            .map(|t| {
                vec![
                    SqlParam::from(t.question.as_str()),
                    t.explanation.as_str().into(),
                    t.source.clone().into(),
                ]
            })
            .collect();

        self.conn.transaction(|tx| {
            tx.execute_many(
                "INSERT INTO trivias (question, explanation, source) VALUES (?, ?, ?)
                 ON CONFLICT (question) DO NOTHING",
                &questions,
            )?;

            let ids: HashMap<String, i64> = tx
                .execute("SELECT trivia_id, question FROM trivias", &[])?
                .into_iter()
                .filter_map(|row| {
                    let question = row.get("question")?.as_str()?.to_string();
                    let id = row.get("trivia_id")?.as_i64()?;
                    Some((question, id))
                })
                .collect();

            let mut answers = Vec::new();
            for t in trivia {
                let Some(trivia_id) = ids.get(&t.question) else {
                    continue;
                };
                for a in &t.answers {
                    answers.push(vec![
                        SqlParam::Int(*trivia_id),
                        a.answer.as_str().into(),
                        a.is_correct_answer.into(),
                    ]);
                }
            }

            tx.execute_many(
                "INSERT INTO trivia_answers (trivia_id, answer, is_correct_answer)
                 VALUES (?, ?, ?)
                 ON CONFLICT (trivia_id, answer) DO NOTHING",
                &answers,
            )
        })
    }
}
