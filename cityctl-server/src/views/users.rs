//! User list, profile and complaint search pages

use maud::{html, Markup};

use super::{layout, timestamp};
use crate::models::{AppUser, ComplaintSummary, TrackedComplaint};

fn tracking_url(action: &str, user_id: i32, complaint_id: i32) -> String {
    format!("/user/{}/{}/{}", user_id, action, complaint_id)
}

pub fn user_list(users: &[AppUser]) -> Markup {
    layout(
        "Users",
        html! {
            table {
                thead { tr { th { "Name" } th { "Email" } th { "Joined" } } }
                tbody {
                    @for user in users {
                        tr {
                            td { a href=(format!("/user/{}", user.user_id)) { (user.name) } }
                            td { (user.email_address) }
                            td { (timestamp(Some(user.created_at))) }
                        }
                    }
                }
            }
        },
    )
}

pub fn user_profile(user: &AppUser, tracked: &[TrackedComplaint]) -> Markup {
    layout(
        &user.name,
        html! {
            p { (user.email_address) " · joined " (timestamp(Some(user.created_at))) }
            p {
                a href=(format!("/complaint/search?user_id={}", user.user_id)) {
                    "Find complaints to track"
                }
            }
            h2 { "Tracked complaints (" (tracked.len()) ")" }
            @if tracked.is_empty() {
                p { "Not tracking any complaints yet." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "#" } th { "Description" } th { "Type" } th { "Agency" }
                            th { "Status" } th { "Opened" } th { "Closed" } th { "Tracked" }
                            th { "Note" } th {}
                        }
                    }
                    tbody {
                        @for row in tracked {
                            tr {
                                td { (row.complaint_id) }
                                td { (row.description.as_deref().unwrap_or("")) }
                                td { (row.complaint_topic) }
                                td { (row.agency_name) }
                                td { (row.status_name) }
                                td { (timestamp(row.created_at)) }
                                td { (timestamp(row.closed_at)) }
                                td { (timestamp(Some(row.added_at))) }
                                td { (row.note.as_deref().unwrap_or("")) }
                                td {
                                    form method="post"
                                        action=(tracking_url("untrack", user.user_id, row.complaint_id)) {
                                        button type="submit" { "Untrack" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn complaint_search(
    query: &str,
    complaints: &[ComplaintSummary],
    user_id: Option<i32>,
) -> Markup {
    layout(
        "Complaint search",
        html! {
            form method="get" action="/complaint/search" {
                input type="text" name="query" value=(query) placeholder="description or type";
                @if let Some(user_id) = user_id {
                    input type="hidden" name="user_id" value=(user_id);
                }
                " "
                button type="submit" { "Search" }
            }
            @if !query.is_empty() {
                p { (complaints.len()) " result(s)" }
            }
            @if !complaints.is_empty() {
                table {
                    thead {
                        tr {
                            th { "#" } th { "Description" } th { "Type" } th { "Agency" }
                            th { "Status" } th { "Opened" }
                            @if user_id.is_some() { th { "Track" } }
                        }
                    }
                    tbody {
                        @for row in complaints {
                            tr {
                                td { (row.complaint_id) }
                                td { (row.description.as_deref().unwrap_or("")) }
                                td { (row.complaint_topic) }
                                td { (row.agency_name) }
                                td { (row.status_name) }
                                td { (timestamp(row.created_at)) }
                                @if let Some(user_id) = user_id {
                                    td {
                                        form method="post"
                                            action=(tracking_url("track", user_id, row.complaint_id)) {
                                            input type="text" name="note"
                                                placeholder="note (optional)";
                                            button type="submit" { "Track" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
