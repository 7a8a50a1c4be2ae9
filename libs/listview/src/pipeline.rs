use chrono::{DateTime, Utc};

/// An item a list view can search, tag-filter, and sort.
pub trait ListItem {
    /// Text fields the substring search runs over (title, body, ...).
    fn search_fields(&self) -> Vec<&str>;

    /// Tags attached to the item; empty where the entity has none.
    fn tags(&self) -> &[String] {
        &[]
    }

    /// Timestamp the view sorts by.
    fn sort_key(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Current search/filter/sort selections of a list view.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub order: SortOrder,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

/// Derive the displayed sequence from a collection snapshot.
///
/// Pure and deterministic in its two inputs: substring search
/// (case-insensitive, OR across fields and tags), then exact tag match,
/// then a stable sort by timestamp. Ties keep the snapshot's order.
pub fn apply<T: ListItem + Clone>(items: &[T], query: &ListQuery) -> Vec<T> {
    let term = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut out: Vec<T> = items
        .iter()
        .filter(|item| {
            if let Some(term) = &term {
                let field_hit = item
                    .search_fields()
                    .iter()
                    .any(|f| f.to_lowercase().contains(term));
                let tag_hit = item.tags().iter().any(|t| t.to_lowercase().contains(term));
                if !field_hit && !tag_hit {
                    return false;
                }
            }
            if let Some(tag) = &query.tag {
                if !item.tags().iter().any(|t| t == tag) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    match query.order {
        SortOrder::NewestFirst => out.sort_by(|a, b| b.sort_key().cmp(&a.sort_key())),
        SortOrder::OldestFirst => out.sort_by(|a, b| a.sort_key().cmp(&b.sort_key())),
    }
    out
}
