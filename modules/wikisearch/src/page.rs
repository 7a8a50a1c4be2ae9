/// Results per page, fixed by the search API request.
pub const PAGE_SIZE: u64 = 10;

/// One search hit, snippet already stripped of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
}

/// One page of search results plus enough bookkeeping to page around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    pub total_hits: u64,
    pub offset: u64,
}

impl SearchPage {
    pub fn has_next(&self) -> bool {
        self.offset + PAGE_SIZE < self.total_hits
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    pub fn next_offset(&self) -> Option<u64> {
        self.has_next().then(|| self.offset + PAGE_SIZE)
    }

    pub fn prev_offset(&self) -> Option<u64> {
        self.has_prev().then(|| self.offset.saturating_sub(PAGE_SIZE))
    }
}

/// URL of the article behind a hit, opened in an external viewer.
pub fn article_url(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", urlencoding::encode(title))
}
