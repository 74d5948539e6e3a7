//! Plain-text drawing of the mounted view.

use std::fmt::Write;

use cinema_core::{ActiveView, Route, Session};

pub fn render(view: &ActiveView, session: &Session) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = draw(&mut out, view, session);
    out
}

fn draw(out: &mut String, view: &ActiveView, session: &Session) -> std::fmt::Result {
    writeln!(out, "== {} ==", view.route())?;
    match view {
        ActiveView::Home(home) => {
            let model = home.model(session);
            writeln!(out, "{}", model.brand)?;
            writeln!(out, "{}", model.tagline)?;
            if let Some(greeting) = &model.greeting {
                writeln!(out, "{greeting}")?;
            }
            let links: Vec<&str> = model.links.iter().map(|route| route.path()).collect();
            writeln!(out, "links: {}", links.join("  "))?;
        }
        ActiveView::Login(login) => {
            writeln!(out, "email:    {}", login.email)?;
            writeln!(out, "password: {}", mask(&login.password))?;
            if let Some(error) = login.error() {
                writeln!(out, "! {error}")?;
            }
            writeln!(out, "[{}]", login.submit_label())?;
            writeln!(out, "Don't have an account? Create one now")?;
            writeln!(out, "links: {}", Route::Register.path())?;
        }
        ActiveView::Register(register) => {
            writeln!(out, "name:     {}", register.name)?;
            writeln!(out, "email:    {}", register.email)?;
            writeln!(out, "password: {}", mask(&register.password))?;
            writeln!(out, "confirm:  {}", mask(&register.confirm_password))?;
            if let Some(error) = register.error() {
                writeln!(out, "! {error}")?;
            }
            writeln!(out, "[{}]", register.submit_label())?;
            writeln!(out, "Already have an account? Sign in here")?;
            writeln!(out, "links: {}", Route::Login.path())?;
        }
        ActiveView::Movies(movies) => {
            if let Some(error) = movies.error() {
                writeln!(out, "! {error}")?;
            }
            if let Some(notice) = movies.notice() {
                writeln!(out, "* {notice}")?;
            }
            if let Some(status) = movies.status_text() {
                writeln!(out, "{status}")?;
            }
            for card in movies.cards(session) {
                let star = if card.favorited { "*" } else { " " };
                writeln!(out, "{star} #{} {}", card.id, card.title)?;
                writeln!(out, "    {}", card.description)?;
                writeln!(out, "    poster: {}", card.poster)?;
                if card.login_prompt {
                    writeln!(out, "    log in to rate and favorite")?;
                }
            }
        }
        ActiveView::Users(users) => {
            if users.phase().is_loading() {
                writeln!(out, "Loading...")?;
            }
            if let Some(error) = users.error() {
                writeln!(out, "! {error}")?;
            }
            for user in users.users() {
                writeln!(out, "#{} {} <{}>", user.id, user.name, user.email)?;
            }
        }
    }
    Ok(())
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
