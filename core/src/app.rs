//! App shell: shared context, current route and the mounted view.
//!
//! # Design
//! `AppContext` carries the two things views share, the `ApiClient` and the
//! `Session`. `App` mounts exactly one view at a time. Navigating unmounts the
//! old view first, so any result still addressed to it is dropped, then mounts
//! a fresh instance and runs its mount fetch. Actions that ask for navigation
//! are followed before returning.

use thiserror::Error;
use tracing::info;

use crate::client::ApiClient;
use crate::http::{Transport, UreqTransport};
use crate::router::{Route, RouteError};
use crate::session::{Session, SessionStore};
use crate::types::{MovieId, UserId};
use crate::views::{HomeView, LoginView, MoviesView, Navigation, RegisterView, UserListView};

pub struct AppContext<T = UreqTransport> {
    pub client: ApiClient<T>,
    pub session: Session,
}

impl<T> AppContext<T> {
    pub fn new(client: ApiClient<T>, session: Session) -> Self {
        Self { client, session }
    }
}

#[derive(Debug)]
pub enum ActiveView {
    Home(HomeView),
    Login(LoginView),
    Register(RegisterView),
    Movies(MoviesView),
    Users(UserListView),
}

impl ActiveView {
    pub fn route(&self) -> Route {
        match self {
            ActiveView::Home(_) => Route::Home,
            ActiveView::Login(_) => Route::Login,
            ActiveView::Register(_) => Route::Register,
            ActiveView::Movies(_) => Route::Movies,
            ActiveView::Users(_) => Route::Users,
        }
    }

    fn unmount(&mut self) {
        match self {
            ActiveView::Home(_) => {}
            ActiveView::Login(view) => view.unmount(),
            ActiveView::Register(view) => view.unmount(),
            ActiveView::Movies(view) => view.unmount(),
            ActiveView::Users(view) => view.unmount(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("{action} is not available on {route}")]
    NotAvailable { action: &'static str, route: Route },
}

pub struct App<T = UreqTransport> {
    ctx: AppContext<T>,
    view: ActiveView,
}

impl<T: Transport> App<T> {
    /// Restore the session from `store` and mount the home view.
    pub fn start(client: ApiClient<T>, store: Box<dyn SessionStore>) -> Self {
        Self::with_context(AppContext::new(client, Session::restore(store)))
    }

    pub fn with_context(ctx: AppContext<T>) -> Self {
        Self {
            ctx,
            view: ActiveView::Home(HomeView::new()),
        }
    }

    pub fn route(&self) -> Route {
        self.view.route()
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ActiveView {
        &mut self.view
    }

    pub fn context(&self) -> &AppContext<T> {
        &self.ctx
    }

    pub fn session(&self) -> &Session {
        &self.ctx.session
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.ctx.client
    }

    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.view.route(), to = %route, "navigate");
        self.view.unmount();
        self.view = match route {
            Route::Home => ActiveView::Home(HomeView::new()),
            Route::Login => ActiveView::Login(LoginView::new()),
            Route::Register => ActiveView::Register(RegisterView::new()),
            Route::Movies => {
                let mut view = MoviesView::new();
                view.load(&self.ctx.client);
                ActiveView::Movies(view)
            }
            Route::Users => {
                let mut view = UserListView::new();
                view.load(&self.ctx.client);
                ActiveView::Users(view)
            }
        };
    }

    pub fn open(&mut self, location: &str) -> Result<Route, RouteError> {
        let route = Route::parse(location)?;
        self.navigate(route);
        Ok(route)
    }

    fn follow(&mut self, navigation: Option<Navigation>) {
        if let Some(Navigation::To(route)) = navigation {
            self.navigate(route);
        }
    }

    fn unavailable(&self, action: &'static str) -> ActionError {
        ActionError::NotAvailable {
            action,
            route: self.route(),
        }
    }

    fn ensure(&self, action: &'static str, allowed: &[Route]) -> Result<(), ActionError> {
        if allowed.contains(&self.route()) {
            Ok(())
        } else {
            Err(self.unavailable(action))
        }
    }

    /// Submit the login or registration form currently on screen.
    pub fn submit(&mut self) -> Result<(), ActionError> {
        self.ensure("submit", &[Route::Login, Route::Register])?;
        let AppContext { client, session } = &mut self.ctx;
        let navigation = match &mut self.view {
            ActiveView::Login(view) => view.submit(client, session),
            ActiveView::Register(view) => view.submit(client, session),
            _ => None,
        };
        self.follow(navigation);
        Ok(())
    }

    /// Re-run the mount fetch of a list view.
    pub fn reload(&mut self) -> Result<(), ActionError> {
        self.ensure("reload", &[Route::Movies, Route::Users])?;
        match &mut self.view {
            ActiveView::Movies(view) => view.load(&self.ctx.client),
            ActiveView::Users(view) => view.load(&self.ctx.client),
            _ => {}
        }
        Ok(())
    }

    pub fn rate(&mut self, id: MovieId) -> Result<(), ActionError> {
        self.ensure("rate", &[Route::Movies])?;
        let navigation = match &mut self.view {
            ActiveView::Movies(view) => view.rate(id, &self.ctx.session),
            _ => None,
        };
        self.follow(navigation);
        Ok(())
    }

    pub fn toggle_favorite(&mut self, id: MovieId) -> Result<(), ActionError> {
        self.ensure("favorite", &[Route::Movies])?;
        let navigation = match &mut self.view {
            ActiveView::Movies(view) => view.toggle_favorite(id, &self.ctx.session),
            _ => None,
        };
        self.follow(navigation);
        Ok(())
    }

    pub fn add_user(&mut self) -> Result<(), ActionError> {
        self.ensure("add user", &[Route::Users])?;
        if let ActiveView::Users(view) = &mut self.view {
            view.add_user(&self.ctx.client);
        }
        Ok(())
    }

    pub fn delete_user(&mut self, id: UserId) -> Result<(), ActionError> {
        self.ensure("delete user", &[Route::Users])?;
        if let ActiveView::Users(view) = &mut self.view {
            view.delete_user(&self.ctx.client, id);
        }
        Ok(())
    }

    pub fn logout(&mut self) {
        self.ctx.session.logout();
        self.navigate(Route::Home);
    }
}
