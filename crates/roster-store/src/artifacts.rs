//! On-disk artifacts: the vector index blob and the metadata store.
//!
//! The two files are only meaningful as a pair. The blob records the
//! fingerprint of the metadata it was built against, and `load` refuses a
//! pair whose fingerprints or lengths disagree.

use roster_types::{Employee, Roster, fingerprint};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::builder::BuiltIndex;
use crate::index::{FlatL2Index, NearestNeighborIndex};

/// Bumped whenever the blob layout changes.
const INDEX_FORMAT_VERSION: u32 = 1;

pub const DEFAULT_ROSTER_PATH: &str = "data/employees_data.json";
pub const DEFAULT_INDEX_PATH: &str = "data/employee_index.bin";
pub const DEFAULT_METADATA_PATH: &str = "data/employee_metadata.json";

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode index: {0}")]
    Encode(#[from] bincode::Error),

    #[error("failed to encode metadata: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode index {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("index format version {found} is not supported (expected {expected})")]
    Version { expected: u32, found: u32 },

    #[error("index blob is malformed")]
    Malformed,

    #[error("index is empty")]
    Empty,

    #[error("index holds {vectors} vectors but metadata holds {records} records")]
    LengthMismatch { vectors: usize, records: usize },

    #[error("metadata does not belong to this index (fingerprint mismatch)")]
    FingerprintMismatch,
}

/// Where the pair lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub index: PathBuf,
    pub metadata: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            index: PathBuf::from(DEFAULT_INDEX_PATH),
            metadata: PathBuf::from(DEFAULT_METADATA_PATH),
        }
    }
}

/// Blob layout
#[derive(Serialize, Deserialize)]
struct IndexFile {
    format_version: u32,
    metadata_fingerprint: String,
    index: FlatL2Index,
}

/// A verified index/metadata pair.
#[derive(Debug)]
pub struct LoadedArtifacts {
    pub index: FlatL2Index,
    pub metadata: Vec<Employee>,
    pub fingerprint: String,
}

/// Read the source roster document (`{"employees": [...]}`).
pub fn load_roster(path: &Path) -> Result<Roster, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist both artifacts.
///
/// Both files are written in full to temporaries beside their targets
/// before either is renamed into place. On any error the previous pair is
/// left in place: temporaries are removed on drop, and a failed metadata
/// rename puts the previous index back.
pub fn save(built: &BuiltIndex, paths: &ArtifactPaths) -> Result<(), SaveError> {
    let metadata_fingerprint = fingerprint(&built.metadata)?;

    let mut index_tmp = temp_beside(&paths.index)?;
    {
        let mut writer = BufWriter::new(index_tmp.as_file_mut());
        bincode::serialize_into(
            &mut writer,
            &IndexFile {
                format_version: INDEX_FORMAT_VERSION,
                metadata_fingerprint: metadata_fingerprint.clone(),
                index: built.index.clone(),
            },
        )?;
        writer.flush().map_err(|source| io_err(&paths.index, source))?;
    }
    index_tmp
        .as_file()
        .sync_all()
        .map_err(|source| io_err(&paths.index, source))?;

    let mut metadata_tmp = temp_beside(&paths.metadata)?;
    {
        let mut writer = BufWriter::new(metadata_tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &built.metadata)?;
        writer
            .flush()
            .map_err(|source| io_err(&paths.metadata, source))?;
    }
    metadata_tmp
        .as_file()
        .sync_all()
        .map_err(|source| io_err(&paths.metadata, source))?;

    // Old index moves aside so a failed metadata rename can put it back.
    let backup = set_aside(&paths.index)?;
    if let Err(e) = index_tmp.persist(&paths.index) {
        restore(backup.as_deref(), &paths.index);
        return Err(io_err(&paths.index, e.error));
    }
    if let Err(e) = metadata_tmp.persist(&paths.metadata) {
        warn!(
            index = %paths.index.display(),
            "metadata rename failed, restoring previous index"
        );
        restore(backup.as_deref(), &paths.index);
        return Err(io_err(&paths.metadata, e.error));
    }

    info!(
        index = %paths.index.display(),
        metadata = %paths.metadata.display(),
        records = built.metadata.len(),
        fingerprint = %metadata_fingerprint,
        "saved index artifacts"
    );
    Ok(())
}

/// Load and verify the pair. Any inconsistency is an error; the caller is
/// expected to refuse to serve.
pub fn load(paths: &ArtifactPaths) -> Result<LoadedArtifacts, LoadError> {
    let file = File::open(&paths.index).map_err(|source| LoadError::Io {
        path: paths.index.clone(),
        source,
    })?;
    let blob: IndexFile =
        bincode::deserialize_from(BufReader::new(file)).map_err(|source| LoadError::Decode {
            path: paths.index.clone(),
            source,
        })?;

    if blob.format_version != INDEX_FORMAT_VERSION {
        return Err(LoadError::Version {
            expected: INDEX_FORMAT_VERSION,
            found: blob.format_version,
        });
    }
    if !blob.index.is_well_formed() {
        return Err(LoadError::Malformed);
    }

    let file = File::open(&paths.metadata).map_err(|source| LoadError::Io {
        path: paths.metadata.clone(),
        source,
    })?;
    let metadata: Vec<Employee> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
            path: paths.metadata.clone(),
            source,
        })?;

    if blob.index.is_empty() {
        return Err(LoadError::Empty);
    }
    if blob.index.len() != metadata.len() {
        return Err(LoadError::LengthMismatch {
            vectors: blob.index.len(),
            records: metadata.len(),
        });
    }

    let actual = fingerprint(&metadata).map_err(|source| LoadError::Json {
        path: paths.metadata.clone(),
        source,
    })?;
    if actual != blob.metadata_fingerprint {
        return Err(LoadError::FingerprintMismatch);
    }

    info!(
        records = metadata.len(),
        dimension = blob.index.dimension(),
        "loaded index artifacts"
    );

    Ok(LoadedArtifacts {
        index: blob.index,
        metadata,
        fingerprint: actual,
    })
}

/// Temp file in the target's directory so the final rename stays on one
/// filesystem.
fn temp_beside(target: &Path) -> Result<NamedTempFile, SaveError> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|source| io_err(&dir, source))?;
    NamedTempFile::new_in(&dir).map_err(|source| io_err(&dir, source))
}

/// Move an existing file to a temporary path beside it. `None` when there
/// is nothing at `target`. The backup is deleted when the returned path
/// drops.
fn set_aside(target: &Path) -> Result<Option<TempPath>, SaveError> {
    if !target.exists() {
        return Ok(None);
    }
    let backup = temp_beside(target)?.into_temp_path();
    fs::rename(target, &backup).map_err(|source| io_err(target, source))?;
    Ok(Some(backup))
}

/// Undo a partial swap: put the backup back, or remove the new file when
/// there was nothing before.
fn restore(backup: Option<&Path>, target: &Path) {
    let result = match backup {
        Some(backup) => fs::rename(backup, target),
        None => fs::remove_file(target).or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Ok(())
            } else {
                Err(e)
            }
        }),
    };
    if let Err(e) = result {
        error!(target = %target.display(), error = %e, "could not restore previous index");
    }
}

fn io_err(path: &Path, source: std::io::Error) -> SaveError {
    SaveError::Io {
        path: path.to_path_buf(),
        source,
    }
}
