//! Structured roster filtering behind `GET /employees/search`.

use roster_types::Employee;
use serde::Deserialize;

/// Optional, independent filters; a record must satisfy every one given.
/// Text fields match by substring, list fields (`skill`, `language`,
/// `certification`, `project`) by whole element. All comparisons ignore
/// case; empty strings count as absent.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EmployeeFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub manager: Option<String>,
    pub education: Option<String>,
    pub skill: Option<String>,
    pub language: Option<String>,
    pub certification: Option<String>,
    pub project: Option<String>,
    pub status: Option<String>,
    pub availability: Option<String>,
    pub min_experience: Option<u32>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        let substring = [
            (&self.name, &employee.name),
            (&self.email, &employee.email),
            (&self.role, &employee.role),
            (&self.location, &employee.location),
            (&self.department, &employee.department),
            (&self.manager, &employee.manager_name),
            (&self.education, &employee.education),
        ];
        if !substring
            .iter()
            .all(|(needle, field)| needle_of(needle).is_none_or(|n| contains_ci(field, &n)))
        {
            return false;
        }

        let projects: Vec<&str> = employee.all_projects().collect();
        let membership: [(&Option<String>, Vec<&str>); 4] = [
            (&self.skill, as_strs(&employee.skills)),
            (&self.language, as_strs(&employee.languages)),
            (&self.certification, as_strs(&employee.certifications)),
            (&self.project, projects),
        ];
        if !membership.iter().all(|(needle, items)| {
            needle_of(needle).is_none_or(|n| items.iter().any(|item| item.trim().to_lowercase() == n))
        }) {
            return false;
        }

        let exact = [
            (&self.status, &employee.employee_status),
            (&self.availability, &employee.availability_status),
        ];
        if !exact
            .iter()
            .all(|(needle, field)| needle_of(needle).is_none_or(|n| field.trim().to_lowercase() == n))
        {
            return false;
        }

        self.min_experience
            .is_none_or(|floor| employee.experience_years >= floor)
    }

    /// Matching records in storage order.
    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Trimmed, case-folded needle, or `None` when the filter is unset or blank.
fn needle_of(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, lower_needle: &str) -> bool {
    haystack.to_lowercase().contains(lower_needle)
}

fn as_strs(items: &[String]) -> Vec<&str> {
    items.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Employee> {
        serde_json::from_value(serde_json::json!([
            {
                "id": 1,
                "name": "Alice Johnson",
                "email": "alice@example.com",
                "role": "Frontend Developer",
                "location": "Berlin",
                "department": "Engineering",
                "manager_name": "Priya Shah",
                "education": "B.Tech Computer Science",
                "skills": ["React", "TypeScript"],
                "languages": ["English", "German"],
                "certifications": ["AWS Certified Developer"],
                "current_projects": ["Checkout Revamp"],
                "past_projects": ["Design System"],
                "employee_status": "Full-time",
                "availability_status": "Available",
                "experience_years": 5
            },
            {
                "id": 2,
                "name": "Bob Stone",
                "email": "bob@example.com",
                "role": "Backend Engineer",
                "location": "Pune",
                "department": "Platform",
                "manager_name": "Ravi Kumar",
                "skills": ["Rust", "React Native"],
                "languages": ["Hindi", "English"],
                "current_projects": ["Payments API"],
                "employee_status": "Contract",
                "availability_status": "On Project",
                "experience_years": 2
            },
            {"id": 3, "name": "Carol Bare"}
        ]))
        .unwrap()
    }

    fn ids(filter: &EmployeeFilter) -> Vec<u64> {
        let roster = roster();
        filter.apply(&roster).iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_no_filters_matches_everything_in_order() {
        assert_eq!(ids(&EmployeeFilter::default()), vec![1, 2, 3]);
    }

    #[test]
    fn test_substring_filters_are_case_insensitive() {
        let filter = EmployeeFilter {
            role: Some("DEVELOPER".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1]);

        let filter = EmployeeFilter {
            manager: Some("kumar".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![2]);
    }

    #[test]
    fn test_membership_matches_whole_elements() {
        let filter = EmployeeFilter {
            skill: Some("REACT".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1]);

        let filter = EmployeeFilter {
            skill: Some("react native".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![2]);

        let filter = EmployeeFilter {
            certification: Some("aws certified developer".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1]);
    }

    #[test]
    fn test_membership_ignores_partial_elements() {
        let filter = EmployeeFilter {
            skill: Some("type".into()),
            ..Default::default()
        };
        assert!(ids(&filter).is_empty());

        let filter = EmployeeFilter {
            certification: Some("aws".into()),
            ..Default::default()
        };
        assert!(ids(&filter).is_empty());
    }

    #[test]
    fn test_project_covers_current_and_past() {
        let filter = EmployeeFilter {
            project: Some("design system".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1]);
    }

    #[test]
    fn test_status_and_availability_are_exact() {
        let filter = EmployeeFilter {
            status: Some("full-time".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1]);

        let filter = EmployeeFilter {
            availability: Some("available".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1]);

        let filter = EmployeeFilter {
            status: Some("full".into()),
            ..Default::default()
        };
        assert!(ids(&filter).is_empty());
    }

    #[test]
    fn test_min_experience_floor() {
        let filter = EmployeeFilter {
            min_experience: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1, 2]);

        let filter = EmployeeFilter {
            min_experience: Some(3),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1]);
    }

    #[test]
    fn test_filters_are_anded() {
        let filter = EmployeeFilter {
            language: Some("english".into()),
            location: Some("pune".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![2]);
    }

    #[test]
    fn test_blank_filter_is_ignored() {
        let filter = EmployeeFilter {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![1, 2, 3]);
    }

    #[test]
    fn test_sparse_record_fails_set_filters() {
        let filter = EmployeeFilter {
            skill: Some("rust".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter), vec![2]);
    }
}
