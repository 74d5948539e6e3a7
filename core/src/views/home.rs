use crate::router::Route;
use crate::session::Session;

pub const BRAND: &str = "ULoveMovies";
pub const TAGLINE: &str = "Your gateway to cinema excellence";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeModel {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub greeting: Option<String>,
    pub links: Vec<Route>,
}

/// Landing page. Holds no state of its own.
#[derive(Debug, Default)]
pub struct HomeView;

impl HomeView {
    pub fn new() -> Self {
        Self
    }

    pub fn model(&self, session: &Session) -> HomeModel {
        let links = if session.is_logged_in() {
            vec![Route::Movies, Route::Users]
        } else {
            vec![Route::Movies, Route::Login, Route::Register]
        };
        HomeModel {
            brand: BRAND,
            tagline: TAGLINE,
            greeting: session.user().map(|user| format!("Welcome back, {}", user.name)),
            links,
        }
    }
}
