mod lenient;
pub mod records;

pub use records::{Category, Nursery, Offer, Sponsor};
