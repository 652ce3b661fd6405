//! roster-types: Employee records shared by the indexer (writes) and the chat
//! server (reads).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One employee record. Only `id` and `name` are required on the wire;
/// everything else defaults to empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub current_projects: Vec<String>,
    #[serde(default)]
    pub past_projects: Vec<String>,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub availability_status: String, // e.g. "Available", "On Project"
    #[serde(default)]
    pub availability_date: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub current_salary: i64,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub manager_name: String,
    #[serde(default)]
    pub employee_status: String, // e.g. "Full-time", "Contract"
}

impl Employee {
    /// Current projects followed by past projects.
    pub fn all_projects(&self) -> impl Iterator<Item = &str> {
        self.current_projects
            .iter()
            .chain(self.past_projects.iter())
            .map(String::as_str)
    }
}

/// Source document: `{"employees": [...]}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Roster {
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// Render a possibly-empty value for user-facing sentences.
pub fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

/// SHA256 over the canonical JSON of an ordered record list.
///
/// The index blob stores this alongside its vectors so that a loader can
/// tell whether a metadata file belongs to that index. Order matters:
/// the same records in a different order produce a different fingerprint.
pub fn fingerprint(records: &[Employee]) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    let bytes = serde_json::to_vec(records)?;
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
