//! Integration tests for artifact persistence.
//!
//! Build → save → load with a deterministic embedder; no model download.

use roster_store::artifacts::{self, ArtifactPaths, LoadError};
use roster_store::{Embed, EmbedError, NearestNeighborIndex, build_index, format_employee_profile};
use roster_types::Employee;
use std::fs;
use tempfile::TempDir;

/// Character histogram over a-z: deterministic and cheap.
struct HistogramEmbedder;

impl Embed for HistogramEmbedder {
    fn dimension(&self) -> usize {
        26
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0f32; 26];
                for c in text.to_lowercase().chars().filter(|c| c.is_ascii_lowercase()) {
                    v[(c as u8 - b'a') as usize] += 1.0;
                }
                v
            })
            .collect())
    }
}

fn employee(id: u64, name: &str, role: &str) -> Employee {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "role": role,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "skills": ["Rust", "SQL"],
    }))
    .unwrap()
}

fn roster() -> Vec<Employee> {
    vec![
        employee(1, "John Doe", "Backend Engineer"),
        employee(2, "Mary Major", "Data Scientist"),
        employee(3, "Ravi Kumar", "Frontend Developer"),
    ]
}

fn paths_in(dir: &TempDir) -> ArtifactPaths {
    ArtifactPaths {
        index: dir.path().join("out/employee_index.bin"),
        metadata: dir.path().join("out/employee_metadata.json"),
    }
}

#[test]
fn save_then_load_preserves_pairs() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let built = build_index(roster(), &HistogramEmbedder).unwrap();
    artifacts::save(&built, &paths).unwrap();

    let loaded = artifacts::load(&paths).unwrap();
    assert_eq!(loaded.index.len(), loaded.metadata.len());
    assert_eq!(loaded.metadata, roster());
    assert_eq!(loaded.index, built.index);

    for (i, emp) in loaded.metadata.iter().enumerate() {
        let expected = HistogramEmbedder
            .embed_one(&format_employee_profile(emp))
            .unwrap();
        assert_eq!(loaded.index.vector(i), Some(expected.as_slice()));
    }
}

#[test]
fn save_leaves_no_temporaries() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let built = build_index(roster(), &HistogramEmbedder).unwrap();
    artifacts::save(&built, &paths).unwrap();

    let mut names: Vec<String> = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["employee_index.bin", "employee_metadata.json"]);
}

#[test]
fn rebuild_overwrites_previous_pair() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let first = build_index(roster(), &HistogramEmbedder).unwrap();
    artifacts::save(&first, &paths).unwrap();

    let mut bigger = roster();
    bigger.push(employee(4, "Lena Fischer", "QA Engineer"));
    let second = build_index(bigger, &HistogramEmbedder).unwrap();
    artifacts::save(&second, &paths).unwrap();

    let loaded = artifacts::load(&paths).unwrap();
    assert_eq!(loaded.metadata.len(), 4);
}

#[test]
fn mismatched_metadata_is_rejected() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let built = build_index(roster(), &HistogramEmbedder).unwrap();
    artifacts::save(&built, &paths).unwrap();

    // Same length, different order: a half-swapped deployment
    let mut reordered = roster();
    reordered.reverse();
    fs::write(&paths.metadata, serde_json::to_string(&reordered).unwrap()).unwrap();

    assert!(matches!(
        artifacts::load(&paths),
        Err(LoadError::FingerprintMismatch)
    ));
}

#[test]
fn length_mismatch_is_rejected() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let built = build_index(roster(), &HistogramEmbedder).unwrap();
    artifacts::save(&built, &paths).unwrap();

    let truncated = &roster()[..2];
    fs::write(&paths.metadata, serde_json::to_string(truncated).unwrap()).unwrap();

    match artifacts::load(&paths) {
        Err(LoadError::LengthMismatch { vectors, records }) => {
            assert_eq!(vectors, 3);
            assert_eq!(records, 2);
        }
        other => panic!("expected length mismatch, got {other:?}"),
    }
}

#[test]
fn failed_save_writes_nothing() {
    let dir = TempDir::new().unwrap();
    // Metadata directory cannot be created because a file occupies its name
    fs::write(dir.path().join("blocked"), "").unwrap();
    let paths = ArtifactPaths {
        index: dir.path().join("employee_index.bin"),
        metadata: dir.path().join("blocked/employee_metadata.json"),
    };

    let built = build_index(roster(), &HistogramEmbedder).unwrap();
    assert!(artifacts::save(&built, &paths).is_err());

    assert!(!paths.index.exists());
    let leftovers = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1); // just the blocking file
}

#[test]
fn failed_metadata_rename_restores_previous_index() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);
    let first = build_index(roster(), &HistogramEmbedder).unwrap();
    artifacts::save(&first, &paths).unwrap();
    let original_index = fs::read(&paths.index).unwrap();

    // A directory at the metadata target makes only the final rename fail
    let blocked = ArtifactPaths {
        index: paths.index.clone(),
        metadata: dir.path().join("out/taken"),
    };
    fs::create_dir_all(blocked.metadata.join("inner")).unwrap();

    let mut reordered = roster();
    reordered.reverse();
    let second = build_index(reordered, &HistogramEmbedder).unwrap();
    assert!(artifacts::save(&second, &blocked).is_err());

    assert_eq!(fs::read(&paths.index).unwrap(), original_index);
    let loaded = artifacts::load(&paths).unwrap();
    assert_eq!(loaded.metadata, first.metadata);

    let mut names: Vec<String> = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["employee_index.bin", "employee_metadata.json", "taken"]
    );
}

#[test]
fn failed_metadata_rename_without_previous_index_leaves_none() {
    let dir = TempDir::new().unwrap();
    let paths = ArtifactPaths {
        index: dir.path().join("employee_index.bin"),
        metadata: dir.path().join("taken"),
    };
    fs::create_dir_all(paths.metadata.join("inner")).unwrap();

    let built = build_index(roster(), &HistogramEmbedder).unwrap();
    assert!(artifacts::save(&built, &paths).is_err());

    assert!(!paths.index.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
