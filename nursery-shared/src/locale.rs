//! Static Arabic strings shown to visitors.
//!
//! The site ships a single locale, so these live as plain constants rather than
//! behind a translation catalog.

pub const HEALTH_MESSAGE: &str = "Nursery API is running 🌿";
pub const ORIGIN_REJECTED: &str = "Not allowed by CORS";

pub const NURSERIES_LOAD_FAILED: &str = "فشل تحميل المشاتل";
pub const OFFERS_LOAD_FAILED: &str = "فشل تحميل العروض";
pub const CATEGORIES_LOAD_FAILED: &str = "فشل تحميل التصنيفات";
pub const SPONSORS_LOAD_FAILED: &str = "فشل تحميل الرعاة";
pub const SETTINGS_LOAD_FAILED: &str = "فشل تحميل إعدادات الموقع";

pub const LOADING: &str = "جاري التحميل...";

/// Subtitle prefix for offer search results ("from: ...").
pub const OFFER_FROM_PREFIX: &str = "من: ";
/// Used when an offer is not tied to a named nursery.
pub const GENERIC_OFFER: &str = "عرض عام";
pub const CATEGORY_AVAILABLE: &str = "تصنيف متاح";
pub const CATEGORY_TAG: &str = "تصنيف";

pub const FILTER_ALL: &str = "الكل";
pub const FILTER_CATEGORIES: &str = "تصنيفات";
pub const FILTER_SERVICES: &str = "خدمات";
