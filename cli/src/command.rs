//! Line commands typed at the prompt.
//!
//! Each line is parsed as its own clap invocation in multicall mode, so the
//! first word names the subcommand and `help` lists them all.

use clap::{Parser, Subcommand, ValueEnum};
use cinema_core::{MovieId, UserId};

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Name,
    Email,
    Password,
    #[value(name = "confirm")]
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Go to /, /login, /register, /movies or /users.
    #[command(alias = "go")]
    Open { path: String },

    /// Fill a field of the login or registration form.
    Set {
        #[arg(value_enum)]
        field: Field,
        /// Words are joined with single spaces.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// Submit the login or registration form.
    Submit,

    /// Rate a movie.
    Rate { id: MovieId },

    /// Toggle a movie as favorite.
    #[command(alias = "favorite")]
    Fav { id: MovieId },

    /// Add the placeholder user.
    Add,

    /// Delete a user.
    Delete { id: UserId },

    /// Fetch the current list again.
    Reload,

    /// End the session.
    Logout,

    /// Redraw the current view.
    Show,

    /// Leave.
    #[command(alias = "exit")]
    Quit,
}

/// Parse one input line. A blank line redraws.
pub fn parse(line: &str) -> Result<Command, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Command::Show);
    }
    Line::try_parse_from(words).map(|line| line.command)
}
