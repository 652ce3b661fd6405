//! Structured field lookup for questions like "What is John Doe's email?".
//!
//! Candidates come from the semantic pass; this module only decides which
//! of them the query names and which field it asks for.

use roster_types::{Employee, or_na};

/// Returned when a field was asked for but no candidate is named.
pub const CLARIFICATION: &str =
    "Please specify which employee you're referring to, so I can look up their contact details.";

/// Employee fields reachable by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    Phone,
    Location,
    Manager,
    Department,
    Salary,
    Availability,
    JoinDate,
}

impl ContactField {
    pub fn value(self, employee: &Employee) -> String {
        match self {
            ContactField::Email => or_na(&employee.email).to_string(),
            ContactField::Phone => or_na(&employee.phone_number).to_string(),
            ContactField::Location => or_na(&employee.location).to_string(),
            ContactField::Manager => or_na(&employee.manager_name).to_string(),
            ContactField::Department => or_na(&employee.department).to_string(),
            ContactField::Salary => employee.current_salary.to_string(),
            ContactField::Availability => or_na(&employee.availability_date).to_string(),
            ContactField::JoinDate => or_na(&employee.join_date).to_string(),
        }
    }
}

/// A keyword as it appears in queries and the field it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKeyword {
    pub keyword: &'static str,
    pub field: ContactField,
}

/// Checked in order; the first keyword found decides the field.
pub const FIELD_KEYWORDS: &[FieldKeyword] = &[
    FieldKeyword { keyword: "email", field: ContactField::Email },
    FieldKeyword { keyword: "phone", field: ContactField::Phone },
    FieldKeyword { keyword: "contact", field: ContactField::Phone },
    FieldKeyword { keyword: "location", field: ContactField::Location },
    FieldKeyword { keyword: "manager", field: ContactField::Manager },
    FieldKeyword { keyword: "department", field: ContactField::Department },
    FieldKeyword { keyword: "salary", field: ContactField::Salary },
    FieldKeyword { keyword: "availability", field: ContactField::Availability },
    FieldKeyword { keyword: "join date", field: ContactField::JoinDate },
];

/// First table keyword contained in a case-folded query.
pub fn detect_field(lower: &str) -> Option<FieldKeyword> {
    FIELD_KEYWORDS
        .iter()
        .copied()
        .find(|fk| lower.contains(fk.keyword))
}

/// Outcome of a field lookup over a candidate list.
#[derive(Debug, PartialEq)]
pub enum Resolution<'a> {
    /// A candidate is named in the query
    Found {
        employee: &'a Employee,
        answer: String,
    },
    /// No candidate is named; ask the user which employee they mean
    Unresolved,
}

/// Resolve `field` against candidates in rank order.
pub fn resolve<'a>(lower: &str, field: FieldKeyword, candidates: &[&'a Employee]) -> Resolution<'a> {
    match find_named_employee(lower, candidates) {
        Some(employee) => Resolution::Found {
            employee,
            answer: field_answer(employee, field),
        },
        None => Resolution::Unresolved,
    }
}

/// `"{name}'s {keyword} is: {value}"`
pub fn field_answer(employee: &Employee, field: FieldKeyword) -> String {
    format!(
        "{}'s {} is: {}",
        employee.name,
        field.keyword,
        field.field.value(employee)
    )
}

/// First candidate whose full name, or any whitespace-separated part of
/// it, appears in the query. Parts match as substrings, so "johns email"
/// names John Doe.
pub fn find_named_employee<'a>(lower: &str, candidates: &[&'a Employee]) -> Option<&'a Employee> {
    candidates.iter().copied().find(|emp| {
        let name = emp.name.trim().to_lowercase();
        if name.is_empty() {
            return false;
        }
        lower.contains(&name) || name.split_whitespace().any(|part| lower.contains(part))
    })
}
