use nursery_shared::Nursery;

/// What the page body shows below the hero and the search bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Home,
    /// Nurseries carrying the named category.
    CategoryResults(String),
}

impl ViewMode {
    pub fn selected_category(&self) -> Option<&str> {
        match self {
            ViewMode::Home => None,
            ViewMode::CategoryResults(category) => Some(category),
        }
    }
}

/// Home page sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Search,
    Categories,
    Featured,
    CategoryResults,
    Premium,
    Sponsors,
}

/// Nurseries that list `category`, ignoring case and surrounding spaces.
pub fn nurseries_in<'a>(nurseries: &'a [Nursery], category: &str) -> Vec<&'a Nursery> {
    let wanted = category.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }

    nurseries
        .iter()
        .filter(|n| n.categories.iter().any(|c| c.trim().to_lowercase() == wanted))
        .collect()
}
