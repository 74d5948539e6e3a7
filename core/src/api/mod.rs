//! Resource access modules.
//!
//! Each façade borrows the shared `ApiClient` and maps one domain operation
//! onto exactly one HTTP call. No retries, no caching; `ApiError` is
//! returned unchanged so views can read `status` and `message` themselves.

pub mod auth;
pub mod products;
pub mod users;

pub use auth::AuthApi;
pub use products::ProductsApi;
pub use users::UsersApi;
