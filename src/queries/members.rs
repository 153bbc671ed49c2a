//! Cards inside a set.

use crate::connection::Database;
use crate::error::{CatalogError, Result};
use crate::filters::Predicate;
use crate::list::{Collection, ListRequest};
use crate::models::{Page, PageRequest, SetMember};
use crate::normalize::{normalize_card_sort_by, normalize_sort_order};

/// Which set(s) to list members of. At least one field is required;
/// precedence is id, then code, then name substring.
#[derive(Debug, Clone, Default)]
pub struct SetSelector {
    pub card_set_id: Option<i64>,
    pub set_code: Option<String>,
    pub set_name: Option<String>,
}

impl SetSelector {
    fn predicate(&self) -> Result<Predicate> {
        let mut predicate = Predicate::empty();
        if let Some(id) = self.card_set_id {
            predicate.push_eq("card_set_id", id);
        } else if let Some(code) = self.set_code.as_deref().filter(|c| !c.is_empty()) {
            predicate.push_eq("set_code", code);
        } else if let Some(name) = self.set_name.as_deref().filter(|n| !n.is_empty()) {
            predicate.push_search("set_name", name);
        } else {
            return Err(CatalogError::MissingParameter(
                "one of card_set_id, set_code or set_name".to_string(),
            ));
        }
        Ok(predicate)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListSetMembersParams {
    pub set: SetSelector,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub null_first: bool,
    pub page: PageRequest,
}

/// Query interface for the `card_set_members_v` view.
pub struct SetMemberQuery<'a> {
    db: &'a Database,
}

impl<'a> SetMemberQuery<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List the cards of the selected set(s), sorted like the card list.
    pub fn list(&self, params: &ListSetMembersParams) -> Result<Page<SetMember>> {
        let predicate = params.set.predicate()?;
        let key = normalize_card_sort_by(params.sort_by.as_deref());
        let order = normalize_sort_order(params.sort_order.as_deref(), key.is_random());
        let request = ListRequest::new(
            Collection::SetMembers,
            key,
            order,
            params.null_first,
            predicate,
            params.page,
        );

        let conn = self.db.connect()?;
        request.execute(&conn)
    }
}
