//! Movie catalogue with rate and favorite actions.
//!
//! Favorites are held in this view instance only and vanish with it. Rating
//! is a placeholder notice; neither action touches the network.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::{Navigation, Phase, RequestGuard, Ticket};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::router::Route;
use crate::session::Session;
use crate::types::{Movie, MovieId};

pub const LOAD_FAILED: &str = "Failed to load movies";
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/200x300";
pub const NO_DESCRIPTION: &str = "No description available";

/// What a host needs to draw one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub poster: String,
    pub favorited: bool,
    /// Anonymous visitors are told to log in to rate and favorite.
    pub login_prompt: bool,
}

#[derive(Debug, Default)]
pub struct MoviesView {
    movies: Vec<Movie>,
    favorites: BTreeSet<MovieId>,
    notice: Option<String>,
    phase: Phase,
    guard: RequestGuard,
}

impl MoviesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn favorites(&self) -> &BTreeSet<MovieId> {
        &self.favorites
    }

    pub fn is_favorite(&self, id: MovieId) -> bool {
        self.favorites.contains(&id)
    }

    /// Last placeholder notification, e.g. after rating.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.phase = Phase::Loading;
        self.guard.begin()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Movie>, ApiError>) {
        if !self.guard.accepts(ticket) {
            debug!("dropping stale movie list");
            return;
        }
        match result {
            Ok(movies) => {
                debug!(count = movies.len(), "movies loaded");
                self.movies = movies;
                self.phase = Phase::Success;
            }
            Err(err) => {
                warn!(error = %err, "error fetching movies");
                self.phase = Phase::Failed(err.display_message(LOAD_FAILED));
            }
        }
    }

    pub fn load<T: Transport>(&mut self, client: &ApiClient<T>) {
        let ticket = self.begin_load();
        let result = client.products().list();
        self.finish_load(ticket, result);
    }

    pub fn rate(&mut self, id: MovieId, session: &Session) -> Option<Navigation> {
        if !session.is_logged_in() {
            return Some(Navigation::To(Route::Login));
        }
        info!(movie = id, "movie rated");
        self.notice = Some(format!("You rated movie {id}! Feature coming soon."));
        None
    }

    pub fn toggle_favorite(&mut self, id: MovieId, session: &Session) -> Option<Navigation> {
        if !session.is_logged_in() {
            return Some(Navigation::To(Route::Login));
        }
        if !self.favorites.remove(&id) {
            self.favorites.insert(id);
        }
        None
    }

    /// Status line to show instead of the grid, if any.
    pub fn status_text(&self) -> Option<&'static str> {
        if self.phase.is_loading() {
            Some("Loading movies...")
        } else if self.movies.is_empty() {
            Some("No movies available yet")
        } else {
            None
        }
    }

    pub fn cards(&self, session: &Session) -> Vec<MovieCard> {
        let login_prompt = !session.is_logged_in();
        self.movies
            .iter()
            .map(|movie| MovieCard {
                id: movie.id,
                title: movie.display_title().to_string(),
                description: non_empty(movie.description.as_deref())
                    .unwrap_or(NO_DESCRIPTION)
                    .to_string(),
                poster: non_empty(movie.poster.as_deref())
                    .unwrap_or(PLACEHOLDER_POSTER)
                    .to_string(),
                favorited: self.is_favorite(movie.id),
                login_prompt,
            })
            .collect()
    }

    pub fn unmount(&mut self) {
        self.guard.unmount();
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::testing::ScriptedTransport;
    use crate::types::SessionInfo;

    fn signed_in() -> Session {
        Session::restore(Box::new(MemorySessionStore::with_session(SessionInfo::default())))
    }

    #[test]
    fn dune_without_poster_renders_placeholder() {
        let client = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        client
            .transport()
            .push_response(200, r#"[{"id":1,"name":"Dune","description":"...","poster":null}]"#);
        let mut view = MoviesView::new();
        view.load(&client);

        assert_eq!(view.phase(), &Phase::Success);
        let cards = view.cards(&Session::in_memory());
        assert_eq!(
            cards,
            vec![MovieCard {
                id: 1,
                title: "Dune".into(),
                description: "...".into(),
                poster: PLACEHOLDER_POSTER.into(),
                favorited: false,
                login_prompt: true,
            }]
        );
        assert_eq!(view.status_text(), None);
    }

    #[test]
    fn missing_description_and_title_fallbacks() {
        let mut view = MoviesView::new();
        let ticket = view.begin_load();
        view.finish_load(
            ticket,
            Ok(vec![Movie {
                id: 2,
                name: None,
                title: Some("Heat".into()),
                description: None,
                poster: Some("https://img.test/heat.jpg".into()),
            }]),
        );
        let card = &view.cards(&signed_in())[0];
        assert_eq!(card.title, "Heat");
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.poster, "https://img.test/heat.jpg");
        assert!(!card.login_prompt);
    }

    #[test]
    fn load_failure_uses_message_or_fallback() {
        let client = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        client.transport().push_response(503, r#"{"message":"Catalogue offline"}"#);
        client.transport().push_error(ApiError::Timeout { after_ms: 10_000 });

        let mut view = MoviesView::new();
        view.load(&client);
        assert_eq!(view.error(), Some("Catalogue offline"));
        view.load(&client);
        assert_eq!(view.error(), Some(LOAD_FAILED));
        assert_eq!(view.status_text(), Some("No movies available yet"));
    }

    #[test]
    fn status_text_while_loading() {
        let mut view = MoviesView::new();
        view.begin_load();
        assert_eq!(view.status_text(), Some("Loading movies..."));
    }

    #[test]
    fn anonymous_actions_redirect_to_login() {
        let session = Session::in_memory();
        let mut view = MoviesView::new();
        assert_eq!(view.rate(1, &session), Some(Navigation::To(Route::Login)));
        assert_eq!(view.toggle_favorite(1, &session), Some(Navigation::To(Route::Login)));
        assert!(view.favorites().is_empty());
        assert_eq!(view.notice(), None);
    }

    #[test]
    fn favorite_toggle_is_an_involution() {
        let session = signed_in();
        let mut view = MoviesView::new();
        view.toggle_favorite(3, &session);
        let before = view.favorites().clone();

        assert_eq!(view.toggle_favorite(7, &session), None);
        assert_eq!(
            view.favorites().difference(&before).copied().collect::<Vec<_>>(),
            vec![7]
        );
        assert!(view.is_favorite(7));

        view.toggle_favorite(7, &session);
        assert_eq!(view.favorites(), &before);
    }

    #[test]
    fn rating_is_a_local_notice() {
        let session = signed_in();
        let mut view = MoviesView::new();
        assert_eq!(view.rate(4, &session), None);
        assert_eq!(view.notice(), Some("You rated movie 4! Feature coming soon."));
    }

    #[test]
    fn stale_load_is_ignored() {
        let mut view = MoviesView::new();
        let old = view.begin_load();
        let new = view.begin_load();
        view.finish_load(new, Ok(Vec::new()));
        view.finish_load(
            old,
            Ok(vec![Movie {
                id: 1,
                name: Some("Late".into()),
                title: None,
                description: None,
                poster: None,
            }]),
        );
        assert!(view.movies().is_empty());
        assert_eq!(view.phase(), &Phase::Success);
    }
}
