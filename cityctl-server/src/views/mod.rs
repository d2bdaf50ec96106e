//! HTML views rendered with maud
//!
//! Handlers shape rows into the context types defined here; the page
//! functions only lay them out. All dynamic text is escaped by maud.

pub mod demo;
pub mod listings;
pub mod search;
pub mod users;

use chrono::NaiveDateTime;
use maud::{html, Markup, DOCTYPE};

/// One dropdown option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: i32,
    pub label: String,
}

impl Choice {
    pub fn new(id: i32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Shared page chrome
pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " · cityctl" }
            }
            body {
                nav {
                    a href="/" { "Home" } " | "
                    a href="/neighborhood" { "Neighborhoods" } " | "
                    a href="/agency" { "Agencies" } " | "
                    a href="/user" { "Users" } " | "
                    a href="/complaint/search" { "Complaints" } " | "
                    a href="/address" { "Addresses" } " | "
                    a href="/default-handlers" { "Default handlers" }
                }
                main {
                    h1 { (title) }
                    (body)
                }
            }
        }
    }
}

/// `<select>` with an empty "any" option first.
pub(crate) fn select(name: &str, blank: &str, choices: &[Choice], selected: Option<i32>) -> Markup {
    html! {
        select name=(name) {
            option value="" { (blank) }
            @for choice in choices {
                option value=(choice.id) selected[selected == Some(choice.id)] { (choice.label) }
            }
        }
    }
}

pub(crate) fn timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "—".to_owned())
}

pub(crate) fn days(value: f64) -> String {
    format!("{:.2}", value)
}
