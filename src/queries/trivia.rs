//! Trivia queries.

use std::collections::HashMap;

use serde::Deserialize;

use crate::connection::{Connection, Database};
use crate::error::Result;
use crate::filters::Predicate;
use crate::list::{Collection, ListRequest};
use crate::models::{Page, PageRequest, Trivia};
use crate::normalize::normalize_trivia_sort_by;
use crate::sql_builder::{SqlBuilder, SqlParam};

#[derive(Debug, Clone, Default)]
pub struct ListTriviaParams {
    /// `random`, or anything else for id order.
    pub sort_by: Option<String>,
    pub page: PageRequest,
}

pub struct TriviaQuery<'a> {
    db: &'a Database,
}

impl<'a> TriviaQuery<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn list(&self, params: &ListTriviaParams) -> Result<Page<Trivia>> {
        let key = normalize_trivia_sort_by(params.sort_by.as_deref());
        let request = ListRequest::new(
            Collection::Trivia,
            key,
            None,
            false,
            Predicate::empty(),
            params.page,
        );

        let conn = self.db.connect()?;
        let mut page: Page<Trivia> = request.execute(&conn)?;
        attach_answers(&conn, &mut page.results)?;
        Ok(page)
    }
}

#[derive(Deserialize)]
struct AnswerRow {
    trivia_id: i64,
    answer: String,
    is_correct_answer: bool,
}

fn attach_answers(conn: &Connection, trivias: &mut [Trivia]) -> Result<()> {
    if trivias.is_empty() {
        return Ok(());
    }
    let ids: Vec<SqlParam> = trivias.iter().map(|t| SqlParam::Int(t.trivia_id)).collect();
    let (sql, params) = SqlBuilder::new("trivia_answers")
        .select(&["trivia_id", "answer", "is_correct_answer"])
        .where_in("trivia_id", &ids)
        .order_by(&["trivia_answer_id ASC"])
        .build();
    let rows: Vec<AnswerRow> = conn.execute_into(&sql, &params)?;

    let mut by_trivia: HashMap<i64, Vec<AnswerRow>> = HashMap::new();
    for row in rows {
        by_trivia.entry(row.trivia_id).or_default().push(row);
    }

    for trivia in trivias.iter_mut() {
        let answers = by_trivia.remove(&trivia.trivia_id).unwrap_or_default();
        trivia.correct_answer = answers
            .iter()
            .find(|a| a.is_correct_answer)
            .map(|a| a.answer.clone())
            .unwrap_or_default();
        trivia.answers = answers.into_iter().map(|a| a.answer).collect();
    }
    Ok(())
}
