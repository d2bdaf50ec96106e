//! Neighborhood and agency search pages

use maud::{html, Markup};

use super::{days, layout, select, Choice};
use crate::models::TypeCount;

/// Form state echoed back on every search page
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub entities: Vec<Choice>,
    pub complaint_types: Vec<Choice>,
    pub selected_entity: Option<i32>,
    pub name: String,
    pub selected_type: Option<i32>,
    pub error: Option<String>,
}

impl SearchForm {
    /// Label of the selected complaint type, if any.
    pub fn type_label(&self) -> Option<&str> {
        let selected = self.selected_type?;
        self.complaint_types
            .iter()
            .find(|c| c.id == selected)
            .map(|c| c.label.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct NeighborhoodReport {
    pub neighborhood_name: String,
    pub avg_speed: f64,
    pub complaint_types: Vec<TypeCount>,
    pub total_complaints: i64,
}

#[derive(Debug, Clone)]
pub struct AgencyReport {
    pub agency_name: String,
    pub agency_avg_speed: f64,
    pub citywide_avg_speed: f64,
    pub performance_text: String,
    /// Complaints with both timestamps, i.e. those the average covers
    pub resolved_complaints: i64,
    pub complaint_types: Vec<TypeCount>,
    pub total_complaints: i64,
}

struct FormFields {
    action: &'static str,
    id_field: &'static str,
    name_field: &'static str,
    entity_label: &'static str,
}

fn search_form(fields: &FormFields, form: &SearchForm) -> Markup {
    html! {
        @if let Some(error) = &form.error {
            p.error { (error) }
        }
        form method="get" action=(fields.action) {
            label {
                (fields.entity_label) " "
                (select(fields.id_field, "— choose —", &form.entities, form.selected_entity))
            }
            " or name "
            input type="text" name=(fields.name_field) value=(form.name);
            " "
            label {
                "Complaint type "
                (select(
                    "complaint_type_id",
                    "All types",
                    &form.complaint_types,
                    form.selected_type,
                ))
            }
            " "
            button type="submit" { "Search" }
        }
    }
}

fn type_table(counts: &[TypeCount]) -> Markup {
    html! {
        @if counts.is_empty() {
            p { "No complaints recorded." }
        } @else {
            table {
                thead { tr { th { "Complaint type" } th { "Count" } } }
                tbody {
                    @for row in counts {
                        tr { td { (row.topic) } td { (row.count) } }
                    }
                }
            }
        }
    }
}

fn filter_note(form: &SearchForm) -> Markup {
    html! {
        @if let Some(label) = form.type_label() {
            p.filter { "Filtered to complaint type: " strong { (label) } }
        }
    }
}

pub fn neighborhood_page(form: &SearchForm, report: Option<&NeighborhoodReport>) -> Markup {
    let fields = FormFields {
        action: "/neighborhood/search",
        id_field: "neighborhood_id",
        name_field: "neighborhood_name",
        entity_label: "Neighborhood",
    };
    layout(
        "Neighborhood search",
        html! {
            (search_form(&fields, form))
            @if let Some(report) = report {
                section.report {
                    h2 { (report.neighborhood_name) }
                    (filter_note(form))
                    p { "Average completion speed: " strong { (days(report.avg_speed)) } " days" }
                    p { "Total complaints: " strong { (report.total_complaints) } }
                    (type_table(&report.complaint_types))
                }
            }
        },
    )
}

pub fn agency_page(form: &SearchForm, report: Option<&AgencyReport>) -> Markup {
    let fields = FormFields {
        action: "/agency/search",
        id_field: "agency_id",
        name_field: "agency_name",
        entity_label: "Agency",
    };
    layout(
        "Agency search",
        html! {
            (search_form(&fields, form))
            @if let Some(report) = report {
                section.report {
                    h2 { (report.agency_name) }
                    (filter_note(form))
                    p {
                        "Average completion speed: "
                        strong { (days(report.agency_avg_speed)) } " days"
                        " over " strong { (report.resolved_complaints) } " resolved complaints"
                    }
                    p { "City-wide average: " strong { (days(report.citywide_avg_speed)) } " days" }
                    p.performance { (report.performance_text) }
                    p { "Total complaints: " strong { (report.total_complaints) } }
                    (type_table(&report.complaint_types))
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_shown_above_form() {
        let form = SearchForm {
            error: Some("Please enter an agency name".into()),
            ..SearchForm::default()
        };
        let page = agency_page(&form, None).into_string();
        assert!(page.contains("Please enter an agency name"));
        assert!(!page.contains("City-wide average"));
    }

    #[test]
    fn type_label_follows_selection() {
        let form = SearchForm {
            complaint_types: vec![Choice::new(1, "Noise"), Choice::new(2, "Heat")],
            selected_type: Some(2),
            ..SearchForm::default()
        };
        assert_eq!(form.type_label(), Some("Heat"));
        assert_eq!(SearchForm::default().type_label(), None);
    }
}
