//! Client core for the ULoveMovies service.
//!
//! # Overview
//! A synchronous client for the movie/user REST API plus the state machines
//! behind its five screens. Nothing here draws anything: hosts read view
//! state and feed user actions back in.
//!
//! # Design
//! - `ApiClient` is the single HTTP entry point. Requests and responses are
//!   plain data; a `Transport` executes them (`UreqTransport` in production,
//!   `testing::ScriptedTransport` in tests).
//! - `api::{AuthApi, ProductsApi, UsersApi}` map one operation to one call
//!   and never swallow errors.
//! - `views` hold per-screen state. Results are applied only while the
//!   request ticket is current, so late responses are dropped.
//! - `App` owns the shared `AppContext` (client + session) and the mounted view.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;
pub mod views;

pub use app::{ActionError, ActiveView, App, AppContext};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use router::{Route, RouteError};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, SessionStoreError};
pub use types::{
    Credentials, Movie, MovieId, MovieInput, NewUser, Registration, SessionInfo, User, UserId,
    UserUpdate,
};
pub use views::{Navigation, Phase};
