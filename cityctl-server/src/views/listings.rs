//! Read-only listings: addresses and default handlers

use maud::{html, Markup};

use super::layout;
use crate::models::{AddressListing, DefaultHandler};

pub fn addresses(rows: &[AddressListing]) -> Markup {
    layout(
        "Addresses",
        html! {
            @if rows.is_empty() {
                p { "No addresses." }
            } @else {
                table {
                    thead {
                        tr { th { "Neighborhood" } th { "Street" } th { "Postal code" } }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td {
                                    @if let Some(name) = &row.neighborhood_name {
                                        (name)
                                    } @else {
                                        em { "none" }
                                    }
                                }
                                td {
                                    (row.street_line_1)
                                    @if let Some(line) = &row.street_line_2 {
                                        br; (line)
                                    }
                                }
                                td { (row.postal_code) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn default_handlers(rows: &[DefaultHandler]) -> Markup {
    layout(
        "Default handlers",
        html! {
            table {
                thead {
                    tr { th { "Complaint type" } th { "Agency" } }
                }
                tbody {
                    @for row in rows {
                        tr { td { (row.complaint_topic) } td { (row.agency_name) } }
                    }
                }
            }
        },
    )
}
