use futures_util::future::{BoxFuture, FutureExt};
use futures_util::stream::{FuturesUnordered, StreamExt};
use nursery_shared::{locale, Category, Nursery, Offer, SiteSettings, Sponsor};
use serde_json::Value;
use tracing::{error, warn};

use crate::api::{ApiClient, ClientError};
use crate::readiness::{Gate, Readiness};
use crate::search::{search, ResultFilter, SearchResult};
use crate::view::{nurseries_in, Section, ViewMode};

/// Outcome of one home page fetch.
#[derive(Debug)]
pub enum Loaded {
    Settings(Result<Value, ClientError>),
    Nurseries(Result<Vec<Nursery>, ClientError>),
    Offers(Result<Vec<Offer>, ClientError>),
    Categories(Result<Vec<Category>, ClientError>),
    Sponsors(Result<Vec<Sponsor>, ClientError>),
}

/// View state of the directory home page.
///
/// Search results are derived state: they are recomputed whenever the query
/// or one of the searchable lists changes, never edited directly.
#[derive(Debug, Clone)]
pub struct HomePage {
    pub settings: SiteSettings,
    pub nurseries: Vec<Nursery>,
    pub offers: Vec<Offer>,
    pub categories: Vec<Category>,
    pub sponsors: Vec<Sponsor>,
    pub filter: ResultFilter,
    query: String,
    results: Vec<SearchResult>,
    readiness: Readiness,
    view: ViewMode,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            settings: SiteSettings::default(),
            nurseries: Vec::new(),
            offers: Vec::new(),
            categories: Vec::new(),
            sponsors: Vec::new(),
            filter: ResultFilter::default(),
            query: String::new(),
            results: Vec::new(),
            readiness: Readiness::home_page(),
            view: ViewMode::Home,
        }
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues all five fetches at once and applies each outcome as it
    /// settles. A failed fetch leaves its section empty (or the default
    /// settings) without affecting the others.
    pub async fn load(client: &ApiClient) -> Self {
        let mut page = Self::new();

        let mut pending: FuturesUnordered<BoxFuture<'_, Loaded>> = FuturesUnordered::new();
        pending.push(async { Loaded::Settings(client.settings().await) }.boxed());
        pending.push(async { Loaded::Nurseries(client.nurseries().await) }.boxed());
        pending.push(async { Loaded::Offers(client.offers().await) }.boxed());
        pending.push(async { Loaded::Categories(client.categories().await) }.boxed());
        pending.push(async { Loaded::Sponsors(client.sponsors().await) }.boxed());

        while let Some(loaded) = pending.next().await {
            page.apply(loaded);
        }
        page
    }

    pub fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Settings(result) => {
                match result {
                    Ok(remote) => self.settings = SiteSettings::default().merged_with(&remote),
                    Err(err) => warn!("Using default site settings: {}", err),
                }
                self.readiness.settle(Gate::Settings);
            }
            Loaded::Nurseries(result) => {
                self.nurseries = or_empty("nurseries", result);
                self.refresh_results();
            }
            Loaded::Offers(result) => {
                self.offers = or_empty("offers", result);
                self.refresh_results();
            }
            Loaded::Categories(result) => {
                self.categories = or_empty("categories", result);
                self.readiness.settle(Gate::Categories);
                self.refresh_results();
            }
            Loaded::Sponsors(result) => {
                self.sponsors = or_empty("sponsors", result);
                self.readiness.settle(Gate::Sponsors);
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh_results();
    }

    pub fn set_filter(&mut self, filter: ResultFilter) {
        self.filter = filter;
    }

    /// Every match for the current query, before the type filter.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Matches narrowed by the active filter.
    pub fn visible_results(&self) -> Vec<&SearchResult> {
        self.filter.apply(&self.results)
    }

    pub fn view(&self) -> &ViewMode {
        &self.view
    }

    /// Switches the body to the nurseries of one category. A blank name
    /// goes back to the home view.
    pub fn select_category(&mut self, category: impl Into<String>) {
        let category = category.into().trim().to_string();
        self.view = if category.is_empty() {
            ViewMode::Home
        } else {
            ViewMode::CategoryResults(category)
        };
    }

    pub fn back_home(&mut self) {
        self.view = ViewMode::Home;
    }

    /// Featured nurseries, shown only on the home view.
    pub fn featured_nurseries(&self) -> Vec<&Nursery> {
        match self.view {
            ViewMode::Home => self.nurseries.iter().filter(|n| n.featured).collect(),
            ViewMode::CategoryResults(_) => Vec::new(),
        }
    }

    /// Nurseries of the selected category; empty on the home view.
    pub fn category_results(&self) -> Vec<&Nursery> {
        self.view
            .selected_category()
            .map(|category| nurseries_in(&self.nurseries, category))
            .unwrap_or_default()
    }

    /// Sections to render, in order. Nothing but the loading message is
    /// shown until the page is ready.
    pub fn sections(&self) -> Vec<Section> {
        if !self.is_ready() {
            return Vec::new();
        }

        let mut sections = vec![Section::Hero, Section::Search];
        match self.view {
            ViewMode::Home => {
                sections.push(Section::Categories);
                if !self.featured_nurseries().is_empty() {
                    sections.push(Section::Featured);
                }
                sections.extend([Section::Premium, Section::Sponsors]);
            }
            ViewMode::CategoryResults(_) => sections.push(Section::CategoryResults),
        }
        sections
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// Placeholder text while settings, categories or sponsors are still loading.
    pub fn loading_message(&self) -> Option<&'static str> {
        (!self.is_ready()).then_some(locale::LOADING)
    }

    fn refresh_results(&mut self) {
        self.results = search(&self.query, &self.nurseries, &self.offers, &self.categories);
    }
}

fn or_empty<T>(what: &str, result: Result<Vec<T>, ClientError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        error!("Error fetching {}: {}", what, err);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Resource;
    use reqwest::StatusCode;
    use serde_json::json;

    fn failed(resource: Resource) -> ClientError {
        ClientError::Status { resource, status: StatusCode::INTERNAL_SERVER_ERROR }
    }

    fn nursery(id: &str, name: &str, featured: bool) -> Nursery {
        Nursery {
            id: id.to_string(),
            name: name.to_string(),
            featured,
            ..Default::default()
        }
    }

    #[test]
    fn test_loading_until_gates_settle() {
        let mut page = HomePage::new();
        assert_eq!(page.loading_message(), Some("جاري التحميل..."));

        page.apply(Loaded::Nurseries(Ok(vec![])));
        page.apply(Loaded::Offers(Ok(vec![])));
        page.apply(Loaded::Settings(Err(failed(Resource::Settings))));
        page.apply(Loaded::Categories(Ok(vec![])));
        assert!(!page.is_ready());

        page.apply(Loaded::Sponsors(Err(failed(Resource::Sponsors))));
        assert!(page.is_ready());
        assert_eq!(page.loading_message(), None);
    }

    #[test]
    fn results_follow_query_and_data() {
        let mut page = HomePage::new();
        page.set_query("oasis");
        assert!(page.results().is_empty());

        page.apply(Loaded::Nurseries(Ok(vec![nursery("n1", "Green Oasis", false)])));
        assert_eq!(page.results().len(), 1);

        page.set_query("   ");
        assert!(page.results().is_empty());
    }

    #[test]
    fn test_filter_does_not_rerun_search() {
        let mut page = HomePage::new();
        page.apply(Loaded::Nurseries(Ok(vec![nursery("n1", "Green Oasis", false)])));
        page.set_query("green");

        page.set_filter(ResultFilter::Category);
        assert!(page.visible_results().is_empty());
        assert_eq!(page.results().len(), 1);

        page.set_filter(ResultFilter::Service);
        assert_eq!(page.visible_results().len(), 1);
    }

    #[test]
    fn failed_fetch_keeps_defaults() {
        let mut page = HomePage::new();
        page.apply(Loaded::Nurseries(Ok(vec![nursery("n1", "A", false)])));
        page.apply(Loaded::Nurseries(Err(failed(Resource::Nurseries))));
        assert!(page.nurseries.is_empty());

        page.apply(Loaded::Settings(Err(failed(Resource::Settings))));
        assert_eq!(page.settings, SiteSettings::default());
    }

    #[test]
    fn test_remote_settings_are_merged() {
        let mut page = HomePage::new();
        page.apply(Loaded::Settings(Ok(json!({"id": "site", "subtitle": "Welcome"}))));

        assert_eq!(page.settings.subtitle, "Welcome");
        assert_eq!(page.settings.title, SiteSettings::default().title);
    }

    #[test]
    fn test_featured_nurseries() {
        let mut page = HomePage::new();
        page.apply(Loaded::Nurseries(Ok(vec![
            nursery("n1", "A", true),
            nursery("n2", "B", false),
            nursery("n3", "C", true),
        ])));
        page.set_query("zzz");
        page.set_filter(ResultFilter::Category);

        let featured: Vec<&str> = page.featured_nurseries().into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(featured, vec!["n1", "n3"]);
    }

    fn ready_page() -> HomePage {
        let mut page = HomePage::new();
        page.apply(Loaded::Settings(Ok(json!({}))));
        page.apply(Loaded::Categories(Ok(vec![])));
        page.apply(Loaded::Sponsors(Ok(vec![])));
        page
    }

    #[test]
    fn test_sections_follow_view_mode() {
        let mut page = HomePage::new();
        assert!(page.sections().is_empty());

        let mut page_ready = ready_page();
        assert_eq!(
            page_ready.sections(),
            vec![Section::Hero, Section::Search, Section::Categories, Section::Premium, Section::Sponsors]
        );

        page_ready.apply(Loaded::Nurseries(Ok(vec![nursery("n1", "A", true)])));
        assert_eq!(
            page_ready.sections(),
            vec![
                Section::Hero,
                Section::Search,
                Section::Categories,
                Section::Featured,
                Section::Premium,
                Section::Sponsors
            ]
        );

        page_ready.select_category("Palms");
        assert_eq!(page_ready.sections(), vec![Section::Hero, Section::Search, Section::CategoryResults]);
        assert!(page_ready.featured_nurseries().is_empty());

        page.select_category("Palms");
        assert!(page.sections().is_empty());
    }

    #[test]
    fn selecting_a_category_lists_its_nurseries() {
        let mut page = ready_page();
        let mut palms = nursery("n1", "Palm House", true);
        palms.categories = vec!["Palms".to_string()];
        page.apply(Loaded::Nurseries(Ok(vec![palms, nursery("n2", "Rose Yard", false)])));
        assert!(page.category_results().is_empty());

        page.select_category("palms");
        assert_eq!(page.view(), &ViewMode::CategoryResults("palms".to_string()));
        let ids: Vec<&str> = page.category_results().into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n1"]);

        page.back_home();
        assert_eq!(page.view(), &ViewMode::Home);
        assert!(page.category_results().is_empty());
        assert_eq!(page.featured_nurseries().len(), 1);

        page.select_category("   ");
        assert_eq!(page.view(), &ViewMode::Home);
    }
}
