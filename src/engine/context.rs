use roster_types::Employee;

/// Returned when generation succeeds with nothing to say
pub const GENERATION_FALLBACK: &str = "Sorry, I couldn't generate a response right now.";

/// Build the grounding prompt sent to the LLM.
/// `query` is the user's text as typed (trimmed, not case-folded).
pub fn build_prompt(query: &str, matches: &[&Employee]) -> String {
    let mut prompt = format!(
        "You are an HR assistant. The user asked:\n'{}'\n\nHere are the top matches:\n\n",
        query
    );

    for employee in matches {
        prompt.push_str(&format_match(employee));
        prompt.push_str("\n\n");
    }

    prompt.push_str("Respond helpfully and clearly.");
    prompt
}

fn format_match(employee: &Employee) -> String {
    let projects: Vec<&str> = employee.all_projects().collect();
    format!(
        "{} is a {} from {} with {} years experience. Skills: {}. Projects: {}. Available from {}.",
        employee.name,
        employee.role,
        employee.location,
        employee.experience_years,
        employee.skills.join(", "),
        projects.join(", "),
        employee.availability_date
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_employee() -> Employee {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Alice Johnson",
            "role": "Frontend Developer",
            "location": "Berlin",
            "experience_years": 5,
            "skills": ["React", "TypeScript"],
            "current_projects": ["Checkout Revamp"],
            "past_projects": ["Design System"],
            "availability_date": "2025-02-01",
        }))
        .unwrap()
    }

    #[test]
    fn test_format_match() {
        assert_eq!(
            format_match(&sample_employee()),
            "Alice Johnson is a Frontend Developer from Berlin with 5 years experience. \
             Skills: React, TypeScript. Projects: Checkout Revamp, Design System. \
             Available from 2025-02-01."
        );
    }

    #[test]
    fn test_build_prompt_structure() {
        let alice = sample_employee();
        let prompt = build_prompt("Find React developers in Berlin", &[&alice]);

        assert!(prompt.starts_with(
            "You are an HR assistant. The user asked:\n'Find React developers in Berlin'\n\n"
        ));
        assert!(prompt.contains("Here are the top matches:\n\nAlice Johnson is a Frontend Developer"));
        assert!(prompt.ends_with("Available from 2025-02-01.\n\nRespond helpfully and clearly."));
    }

    #[test]
    fn test_build_prompt_keeps_match_order() {
        let alice = sample_employee();
        let mut bob = sample_employee();
        bob.name = "Bob Stone".into();

        let prompt = build_prompt("react", &[&bob, &alice]);
        let bob_at = prompt.find("Bob Stone").unwrap();
        let alice_at = prompt.find("Alice Johnson").unwrap();
        assert!(bob_at < alice_at);
    }

    #[test]
    fn test_build_prompt_with_sparse_record() {
        let bare: Employee =
            serde_json::from_value(serde_json::json!({"id": 2, "name": "Bare Minimum"})).unwrap();
        let prompt = build_prompt("anyone", &[&bare]);
        assert!(prompt.contains("Bare Minimum is a  from  with 0 years experience. Skills: . Projects: ."));
    }
}
