//! Canonicalization of client-supplied sort parameters.
//!
//! Nothing here fails: unknown columns fall back to the collection's default
//! column and unknown directions fall back to ascending. The resulting
//! [`Ordering`] only ever contains whitelisted identifiers and fixed keywords.

/// A whitelisted, sortable column of some collection.
pub trait SortColumn: Copy {
    fn column(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Either a concrete column or a request for random order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<C> {
    Column(C),
    Random,
}

impl<C> SortKey<C> {
    pub fn is_random(&self) -> bool {
        matches!(self, SortKey::Random)
    }
}

// ---------------------------------------------------------------------------
// Per-collection columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSortColumn {
    Name,
    Attack,
    Defence,
    Level,
    CardId,
}

impl SortColumn for CardSortColumn {
    fn column(&self) -> &'static str {
        match self {
            CardSortColumn::Name => "name",
            CardSortColumn::Attack => "attack",
            CardSortColumn::Defence => "defence",
            CardSortColumn::Level => "level",
            CardSortColumn::CardId => "card_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetSortColumn {
    SetName,
    SetCode,
    NumOfCards,
    TcgDate,
    Price,
}

impl SortColumn for SetSortColumn {
    fn column(&self) -> &'static str {
        match self {
            SetSortColumn::SetName => "set_name",
            SetSortColumn::SetCode => "set_code",
            SetSortColumn::NumOfCards => "num_of_cards",
            SetSortColumn::TcgDate => "tcg_date",
            SetSortColumn::Price => "total_price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaSortColumn {
    TriviaId,
}

impl SortColumn for TriviaSortColumn {
    fn column(&self) -> &'static str {
        "trivia_id"
    }
}

// ---------------------------------------------------------------------------
// Normalizers
// ---------------------------------------------------------------------------

fn canonical(raw: Option<&str>) -> String {
    raw.map(|s| s.trim().to_ascii_lowercase()).unwrap_or_default()
}

/// Card `sort_by`: one of `name`, `attack`, `defence`, `level`, `card_id`, or
/// `random`; anything else becomes `name`.
pub fn normalize_card_sort_by(raw: Option<&str>) -> SortKey<CardSortColumn> {
    match canonical(raw).as_str() {
        "random" => SortKey::Random,
        "attack" => SortKey::Column(CardSortColumn::Attack),
        "defence" => SortKey::Column(CardSortColumn::Defence),
        "level" => SortKey::Column(CardSortColumn::Level),
        "card_id" => SortKey::Column(CardSortColumn::CardId),
        _ => SortKey::Column(CardSortColumn::Name),
    }
}

/// Card-set `sort_by`; anything unrecognized becomes `set_name`.
pub fn normalize_card_sets_sort_by(raw: Option<&str>) -> SetSortColumn {
    match canonical(raw).as_str() {
        "card_set_code" | "set_code" => SetSortColumn::SetCode,
        "num_of_cards" => SetSortColumn::NumOfCards,
        "tcg_date" => SetSortColumn::TcgDate,
        "price" | "total_price" => SetSortColumn::Price,
        // "name", "set_name" and everything else
        _ => SetSortColumn::SetName,
    }
}

/// Trivia `sort_by`: `random`, otherwise by id.
pub fn normalize_trivia_sort_by(raw: Option<&str>) -> SortKey<TriviaSortColumn> {
    match canonical(raw).as_str() {
        "random" => SortKey::Random,
        _ => SortKey::Column(TriviaSortColumn::TriviaId),
    }
}

/// `asc`/`desc` in any case; anything else becomes `asc`. Random ordering has
/// no direction at all.
pub fn normalize_sort_order(raw: Option<&str>, is_random: bool) -> Option<SortOrder> {
    if is_random {
        return None;
    }
    match canonical(raw).as_str() {
        "desc" => Some(SortOrder::Desc),
        _ => Some(SortOrder::Asc),
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Rendered ORDER BY terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    terms: Vec<String>,
}

impl Ordering {
    /// Build the ORDER BY terms for a normalized sort.
    ///
    /// Column sorts get `NULLS FIRST`/`NULLS LAST` and are followed by an
    /// ascending sort on each `tie_break` column so that page boundaries are
    /// stable. Random sorts render as `RANDOM()` alone.
    pub fn new<C: SortColumn>(
        key: SortKey<C>,
        order: Option<SortOrder>,
        nulls_first: bool,
        tie_break: &[&'static str],
    ) -> Self {
        let column = match key {
            SortKey::Random => {
                return Self {
                    terms: vec!["RANDOM()".to_string()],
                }
            }
            SortKey::Column(c) => c.column(),
        };

        let direction = order.unwrap_or(SortOrder::Asc).as_sql();
        let nulls = if nulls_first { "NULLS FIRST" } else { "NULLS LAST" };
        let mut terms = vec![format!("{} {} {}", column, direction, nulls)];
        terms.extend(
            tie_break
                .iter()
                .filter(|t| **t != column)
                .map(|t| format!("{} ASC", t)),
        );
        Self { terms }
    }

    pub fn terms(&self) -> Vec<&str> {
        self.terms.iter().map(String::as_str).collect()
    }
}
