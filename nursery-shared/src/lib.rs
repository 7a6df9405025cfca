pub mod locale;
pub mod models;
pub mod published;
pub mod settings;

pub use models::{Category, Nursery, Offer, Sponsor};
pub use published::Published;
pub use settings::{Contacts, SiteSettings};
