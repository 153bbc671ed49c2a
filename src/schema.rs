//! Relational layout the catalog reads from.
//!
//! [`apply`] is idempotent; the population binary and test fixtures call it
//! before writing, and [`CatalogBuilder`](crate::CatalogBuilder) calls it on
//! open unless told not to.

use crate::connection::Connection;
use crate::error::Result;

const TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS enum_values (
    enum_name VARCHAR NOT NULL,
    value VARCHAR NOT NULL,
    PRIMARY KEY (enum_name, value)
);

CREATE TABLE IF NOT EXISTS cards (
    card_id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    descr VARCHAR NOT NULL,
    pend_descr VARCHAR,
    monster_descr VARCHAR,
    attack BIGINT,
    defence BIGINT,
    level BIGINT,
    archetype VARCHAR,
    attribute VARCHAR,
    frametype VARCHAR,
    race VARCHAR,
    "type" VARCHAR
);

CREATE SEQUENCE IF NOT EXISTS card_set_id_seq START 1;

CREATE TABLE IF NOT EXISTS card_sets (
    card_set_id BIGINT PRIMARY KEY DEFAULT nextval('card_set_id_seq'),
    set_name VARCHAR NOT NULL UNIQUE,
    set_code VARCHAR NOT NULL,
    num_of_cards BIGINT NOT NULL CHECK (num_of_cards >= 0),
    tcg_date DATE,
    set_image VARCHAR
);

CREATE TABLE IF NOT EXISTS cards_in_sets (
    card_id BIGINT NOT NULL,
    card_set_id BIGINT NOT NULL,
    num_of_cards BIGINT NOT NULL CHECK (num_of_cards >= 1),
    PRIMARY KEY (card_id, card_set_id)
);

CREATE TABLE IF NOT EXISTS card_prices (
    card_id BIGINT PRIMARY KEY,
    amazon_price BIGINT NOT NULL DEFAULT 0,
    cardmarket_price BIGINT NOT NULL DEFAULT 0,
    coolstuffinc_price BIGINT NOT NULL DEFAULT 0,
    ebay_price BIGINT NOT NULL DEFAULT 0,
    tcgplayer_price BIGINT NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS linkmarkers (
    card_id BIGINT NOT NULL,
    "position" VARCHAR NOT NULL,
    PRIMARY KEY (card_id, "position")
);

CREATE TABLE IF NOT EXISTS banlist (
    card_id BIGINT NOT NULL,
    ban_org VARCHAR NOT NULL,
    ban_type VARCHAR NOT NULL,
    PRIMARY KEY (card_id, ban_org, ban_type)
);

CREATE TABLE IF NOT EXISTS card_images (
    card_id BIGINT PRIMARY KEY,
    image_url VARCHAR,
    image_url_cropped VARCHAR,
    image_url_small VARCHAR
);

CREATE SEQUENCE IF NOT EXISTS trivia_id_seq START 1;

CREATE TABLE IF NOT EXISTS trivias (
    trivia_id BIGINT PRIMARY KEY DEFAULT nextval('trivia_id_seq'),
    question VARCHAR NOT NULL UNIQUE,
    explanation VARCHAR NOT NULL,
    source VARCHAR
);

CREATE SEQUENCE IF NOT EXISTS trivia_answer_id_seq START 1;

CREATE TABLE IF NOT EXISTS trivia_answers (
    trivia_answer_id BIGINT PRIMARY KEY DEFAULT nextval('trivia_answer_id_seq'),
    trivia_id BIGINT NOT NULL,
    answer VARCHAR NOT NULL,
    is_correct_answer BOOLEAN NOT NULL,
    UNIQUE (trivia_id, answer)
);
"#;

const VIEWS: &str = r#"
CREATE OR REPLACE VIEW card_sets_v AS
SELECT
    s.card_set_id,
    s.set_name,
    s.set_code,
    s.num_of_cards,
    CAST(s.tcg_date AS VARCHAR) AS tcg_date,
    s.set_image,
    CAST(COALESCE(SUM(cis.num_of_cards * cp.tcgplayer_price), 0) AS BIGINT) AS total_price
FROM card_sets s
LEFT JOIN cards_in_sets cis ON cis.card_set_id = s.card_set_id
LEFT JOIN card_prices cp ON cp.card_id = cis.card_id
GROUP BY s.card_set_id, s.set_name, s.set_code, s.num_of_cards, s.tcg_date, s.set_image;

CREATE OR REPLACE VIEW card_set_members_v AS
SELECT
    cis.card_set_id,
    s.set_name,
    s.set_code,
    c.card_id,
    c.name,
    c.attack,
    c.defence,
    c.level,
    c.archetype,
    c.attribute,
    c.frametype,
    c.race,
    c."type",
    cis.num_of_cards AS num_of_prints,
    cp.tcgplayer_price
FROM cards_in_sets cis
JOIN cards c ON c.card_id = cis.card_id
JOIN card_sets s ON s.card_set_id = cis.card_set_id
LEFT JOIN card_prices cp ON cp.card_id = cis.card_id;
"#;

/// Create all tables and views if they do not exist yet.
pub fn apply(conn: &Connection) -> Result<()> {
    conn.execute_batch(TABLES)?;
    conn.execute_batch(VIEWS)?;
    tracing::debug!("catalog schema applied");
    Ok(())
}
