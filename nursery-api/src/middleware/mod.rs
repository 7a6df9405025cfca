pub mod origin;

pub use origin::{cors_layer, origin_guard_middleware, AllowedOrigins};
