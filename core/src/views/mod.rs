//! View state machines.
//!
//! # Design
//! A view owns its local state and moves through `Phase`s in response to user
//! actions. Views never render themselves; hosts read their state (or the
//! render models some views expose) and draw it however they like.
//!
//! Every network action is split into `begin_*`, which hands out a `Ticket`,
//! and `finish_*`, which applies a result only if its ticket is still
//! current. A ticket goes stale when a newer fetch starts or the view is
//! unmounted, so a late response can never touch a view that has moved on.
//! The one-shot helpers (`submit`, `load`, ...) run both halves back to back
//! over a shared `ApiClient`.

pub mod home;
pub mod login;
pub mod movies;
pub mod register;
pub mod user_list;

pub use home::{HomeModel, HomeView};
pub use login::LoginView;
pub use movies::{MovieCard, MoviesView, PLACEHOLDER_POSTER};
pub use register::RegisterView;
pub use user_list::UserListView;

use crate::router::Route;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    /// The message is on screen and the view accepts actions again.
    Failed(String),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Request to move the app to another route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    To(Route),
}

/// Proof that a result belongs to the request that is still wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Generation counter plus mounted flag for one view instance.
#[derive(Debug)]
pub struct RequestGuard {
    generation: u64,
    mounted: bool,
}

impl Default for RequestGuard {
    fn default() -> Self {
        Self {
            generation: 0,
            mounted: true,
        }
    }
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request that supersedes every earlier ticket.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Ticket for a request that should only be dropped by a newer `begin`
    /// or by unmounting.
    pub fn current(&self) -> Ticket {
        Ticket(self.generation)
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.0 == self.generation
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}
