use nursery_shared::{locale, Category, Nursery, Offer};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Nursery,
    Offer,
    Category,
}

/// One row of the search dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: ResultType,
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub link: String,
    pub tags: Vec<String>,
}

const MAX_TAGS: usize = 2;

fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

fn any_matches(haystacks: &[String], term: &str) -> bool {
    haystacks.iter().any(|h| contains_term(h, term))
}

fn first_tags(tags: &[String]) -> Vec<String> {
    tags.iter().take(MAX_TAGS).cloned().collect()
}

/// Case-insensitive substring search over everything loaded on the page.
///
/// Results are grouped nurseries, then offers, then categories, each in
/// load order. A blank query yields nothing.
pub fn search(query: &str, nurseries: &[Nursery], offers: &[Offer], categories: &[Category]) -> Vec<SearchResult> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    let nursery_hits = nurseries
        .iter()
        .filter(|n| {
            contains_term(&n.name, &term)
                || contains_term(&n.location, &term)
                || any_matches(&n.categories, &term)
                || any_matches(&n.services, &term)
        })
        .map(|n| SearchResult {
            kind: ResultType::Nursery,
            id: n.id.clone(),
            title: n.name.clone(),
            subtitle: n.location.clone(),
            link: format!("/nurseries/{}", n.id),
            tags: first_tags(&n.categories),
        });

    let offer_hits = offers
        .iter()
        .filter(|o| {
            contains_term(&o.title, &term)
                || contains_term(&o.description, &term)
                || o.tags.as_deref().is_some_and(|tags| any_matches(tags, &term))
                || o.nursery_name.as_deref().is_some_and(|name| contains_term(name, &term))
        })
        .map(|o| SearchResult {
            kind: ResultType::Offer,
            id: o.id.clone(),
            title: o.title.clone(),
            subtitle: format!(
                "{}{}",
                locale::OFFER_FROM_PREFIX,
                o.nursery_name.as_deref().filter(|name| !name.is_empty()).unwrap_or(locale::GENERIC_OFFER)
            ),
            link: format!("/offers/{}", o.id),
            tags: o.tags.as_deref().map(first_tags).unwrap_or_default(),
        });

    let category_hits = categories
        .iter()
        .filter(|c| {
            contains_term(&c.title, &term) || c.description.as_deref().is_some_and(|d| contains_term(d, &term))
        })
        .map(|c| SearchResult {
            kind: ResultType::Category,
            id: c.id.clone(),
            title: c.title.clone(),
            subtitle: locale::CATEGORY_AVAILABLE.to_string(),
            link: "/nurseries".to_string(),
            tags: vec![locale::CATEGORY_TAG.to_string()],
        });

    nursery_hits.chain(offer_hits).chain(category_hits).collect()
}

/// Narrows already-computed results by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultFilter {
    #[default]
    All,
    Category,
    /// Nurseries and their offers are both "services" on the page.
    Service,
}

impl ResultFilter {
    pub const ALL: [ResultFilter; 3] = [ResultFilter::All, ResultFilter::Category, ResultFilter::Service];

    pub fn key(self) -> &'static str {
        match self {
            ResultFilter::All => "all",
            ResultFilter::Category => "category",
            ResultFilter::Service => "service",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResultFilter::All => locale::FILTER_ALL,
            ResultFilter::Category => locale::FILTER_CATEGORIES,
            ResultFilter::Service => locale::FILTER_SERVICES,
        }
    }

    /// Unknown keys fall back to showing everything.
    pub fn from_key(key: &str) -> Self {
        Self::ALL.into_iter().find(|f| f.key() == key).unwrap_or_default()
    }

    pub fn accepts(self, result: &SearchResult) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Category => result.kind == ResultType::Category,
            ResultFilter::Service => matches!(result.kind, ResultType::Nursery | ResultType::Offer),
        }
    }

    pub fn apply(self, results: &[SearchResult]) -> Vec<&SearchResult> {
        results.iter().filter(|r| self.accepts(r)).collect()
    }
}
