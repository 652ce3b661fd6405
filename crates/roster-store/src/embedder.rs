use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use roster_types::Employee;
use std::sync::Mutex;
use thiserror::Error;

/// Sentence model used for both profiles and queries.
pub const DEFAULT_EMBEDDING_MODEL: EmbeddingModel = EmbeddingModel::AllMiniLML6V2;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("failed to initialize embedding model: {0}")]
    Init(#[from] anyhow::Error),

    #[error("unsupported embedding model: {0}")]
    UnsupportedModel(String),

    #[error("embedding generation failed: {0}")]
    Embed(String),
}

/// Text → vector capability.
///
/// Implementations must be deterministic: the same text always yields the
/// same vector, otherwise the index and the query side drift apart.
pub trait Embed: Send + Sync {
    fn dimension(&self) -> usize;

    /// Embed multiple texts in one call. Output order matches input order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError>;

    /// Embed a single text. Convenience wrapper around batch.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        self.embed_batch(&[text])?
            .pop()
            .ok_or_else(|| EmbedError::Embed("model returned no embedding".into()))
    }
}

/// Wraps a fastembed model. Holds loaded model weights in memory.
///
/// fastembed needs `&mut` to run inference, so calls are serialised behind
/// a mutex; the lock is held for one batch only.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
    dimension: usize,
}

impl FastEmbedder {
    /// Initialize with all-MiniLM-L6-v2 (384 dimensions)
    pub fn new() -> Result<Self, EmbedError> {
        Self::with_model(DEFAULT_EMBEDDING_MODEL)
    }

    pub fn with_model(model_name: EmbeddingModel) -> Result<Self, EmbedError> {
        let dimension = embedding_dimension(&model_name)?;
        let model =
            TextEmbedding::try_new(InitOptions::new(model_name).with_show_download_progress(true))?;

        Ok(Self {
            model: Mutex::new(model),
            dimension,
        })
    }
}

impl Embed for FastEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut model = self
            .model
            .lock()
            .map_err(|_| EmbedError::Embed("embedding model lock poisoned".into()))?;

        model
            .embed(texts, None)
            .map_err(|e| EmbedError::Embed(e.to_string()))
    }
}

fn embedding_dimension(model: &EmbeddingModel) -> Result<usize, EmbedError> {
    match model {
        EmbeddingModel::AllMiniLML6V2 => Ok(384),
        EmbeddingModel::AllMiniLML12V2 => Ok(384),
        EmbeddingModel::BGESmallENV15 => Ok(384),
        EmbeddingModel::BGEBaseENV15 => Ok(768),
        EmbeddingModel::BGELargeENV15 => Ok(1024),
        other => Err(EmbedError::UnsupportedModel(format!("{:?}", other))),
    }
}

/// Formats an employee record as one paragraph for embedding.
/// Every field is included so that any attribute can pull the profile
/// closer to a query.
pub fn format_employee_profile(employee: &Employee) -> String {
    format!(
        "{name} is a {role} based in {location}. \
         They bring {years} years of experience and joined us on {joined}. \
         Currently contributing to: {current}. \
         Previously worked on: {past}. \
         Core skills include: {skills}. \
         Certifications: {certs}. \
         Education background: {education}. \
         Speaks: {languages}. \
         Part of the {department} department, reporting to {manager}. \
         Current salary: ₹{salary} INR. \
         Status: {status}, available from {available_from} ({availability}).",
        name = employee.name,
        role = employee.role,
        location = employee.location,
        years = employee.experience_years,
        joined = employee.join_date,
        current = employee.current_projects.join(", "),
        past = employee.past_projects.join(", "),
        skills = employee.skills.join(", "),
        certs = employee.certifications.join(", "),
        education = employee.education,
        languages = employee.languages.join(", "),
        department = employee.department,
        manager = employee.manager_name,
        salary = employee.current_salary,
        status = employee.employee_status,
        available_from = employee.availability_date,
        availability = employee.availability_status,
    )
}
