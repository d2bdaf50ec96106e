//! Demo pages backed by the `test` table

use maud::{html, Markup};

use super::layout;

pub fn index(names: &[String]) -> Markup {
    layout(
        "Names",
        html! {
            ul {
                @for name in names {
                    li { (name) }
                }
            }
            form method="post" action="/add" {
                input type="text" name="name" required;
                " "
                button type="submit" { "Add" }
            }
            p { a href="/another" { "Another page" } }
        },
    )
}

pub fn another() -> Markup {
    layout(
        "Another page",
        html! {
            p { "Nothing dynamic here." }
            p { a href="/" { "Back" } }
        },
    )
}
