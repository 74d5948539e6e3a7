//! Line-oriented host for the cinema client.
//!
//! Reads commands from stdin, applies them to the `App` and redraws the
//! mounted view after each one. Logs go to stderr so they never interleave
//! with the drawn view.

mod command;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use cinema_core::{
    ActiveView, ApiClient, App, ClientConfig, FileSessionStore, MemorySessionStore, SessionStore,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, Field};

const SESSION_FILE_VAR: &str = "CINEMA_SESSION_FILE";

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn session_store() -> Box<dyn SessionStore> {
    match std::env::var(SESSION_FILE_VAR) {
        Ok(path) if !path.trim().is_empty() => {
            info!(%path, "persisting session to file");
            Box::new(FileSessionStore::new(path))
        }
        _ => Box::new(MemorySessionStore::new()),
    }
}

fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = ClientConfig::from_env().context("reading client configuration")?;
    info!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "starting");
    let mut app = App::start(ApiClient::from_config(&config), session_store());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render::render(app.view(), app.session()))?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                write!(stdout, "{err}")?;
                continue;
            }
        };
        debug!(?command, "command");

        match apply(&mut app, command) {
            Outcome::Quit => break,
            Outcome::Say(message) => writeln!(stdout, "{message}")?,
            Outcome::Redraw => {}
        }
        writeln!(stdout, "{}", render::render(app.view(), app.session()))?;
    }

    Ok(())
}

enum Outcome {
    Redraw,
    Say(String),
    Quit,
}

fn apply(app: &mut App, command: Command) -> Outcome {
    let result = match command {
        Command::Open { path } => app.open(&path).map(|_| ()).map_err(|err| err.to_string()),
        Command::Set { field, value } => set_field(app.view_mut(), field, value.join(" ")),
        Command::Submit => app.submit().map_err(|err| err.to_string()),
        Command::Rate { id } => app.rate(id).map_err(|err| err.to_string()),
        Command::Fav { id } => app.toggle_favorite(id).map_err(|err| err.to_string()),
        Command::Add => app.add_user().map_err(|err| err.to_string()),
        Command::Delete { id } => app.delete_user(id).map_err(|err| err.to_string()),
        Command::Reload => app.reload().map_err(|err| err.to_string()),
        Command::Logout => {
            app.logout();
            Ok(())
        }
        Command::Show => Ok(()),
        Command::Quit => return Outcome::Quit,
    };

    match result {
        Ok(()) => Outcome::Redraw,
        Err(message) => Outcome::Say(message),
    }
}

fn set_field(view: &mut ActiveView, field: Field, value: String) -> Result<(), String> {
    let slot = match (view, field) {
        (ActiveView::Login(login), Field::Email) => &mut login.email,
        (ActiveView::Login(login), Field::Password) => &mut login.password,
        (ActiveView::Register(register), Field::Name) => &mut register.name,
        (ActiveView::Register(register), Field::Email) => &mut register.email,
        (ActiveView::Register(register), Field::Password) => &mut register.password,
        (ActiveView::Register(register), Field::ConfirmPassword) => &mut register.confirm_password,
        (view, field) => return Err(format!("{field:?} is not a field on {}", view.route())),
    };
    *slot = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_only_land_on_matching_forms() {
        let mut view = ActiveView::Register(Default::default());
        set_field(&mut view, Field::ConfirmPassword, "secret1".into()).unwrap();
        match &view {
            ActiveView::Register(register) => assert_eq!(register.confirm_password, "secret1"),
            _ => unreachable!(),
        }

        let mut view = ActiveView::Login(Default::default());
        assert!(set_field(&mut view, Field::Name, "Ada".into()).is_err());
    }
}
