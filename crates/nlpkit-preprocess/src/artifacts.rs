//! Persistence of preprocessing results
//!
//! Layout of an artifact directory:
//! - `processed_data.csv`: one row per input with all derived columns
//! - `tfidf_matrix.npy`: dense f64 TF-IDF matrix in NumPy format
//! - `label_encoder.json`, `tfidf_vectorizer.json`: fitted models
//! - `manifest.json`: file list, shapes and creation time
//!
//! Author: hephaex@gmail.com

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ndarray::Array2;
use nlpkit_core::{NlpError, Result};
use nlpkit_vector::TfidfVectorizer;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

use crate::encoder::LabelEncoder;
use crate::pipeline::{PreprocessOutput, ProcessedRecord};

pub const DATA_FILE: &str = "processed_data.csv";
pub const MATRIX_FILE: &str = "tfidf_matrix.npy";
pub const ENCODER_FILE: &str = "label_encoder.json";
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Summary of one saved run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub created_at: DateTime<Utc>,
    pub files: Vec<String>,
    pub data_shape: (usize, usize),
    pub tfidf_shape: (usize, usize),
    pub classes: Vec<String>,
}

/// Artifacts read back from disk
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub manifest: ArtifactManifest,
    pub records: Vec<ProcessedRecord>,
    pub tfidf: Array2<f64>,
    pub encoder: LabelEncoder,
    pub vectorizer: TfidfVectorizer,
}

/// Reads and writes artifacts in one output directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Write every artifact of a run, creating the directory if needed
    pub fn save(&self, output: &PreprocessOutput) -> Result<ArtifactManifest> {
        fs::create_dir_all(&self.dir)?;

        self.write_records(&output.records)?;

        let matrix_path = self.path(MATRIX_FILE);
        ndarray_npy::write_npy(&matrix_path, &output.tfidf).map_err(|e| {
            NlpError::Serialization(format!("{}: {e}", matrix_path.display()))
        })?;

        self.write_json(ENCODER_FILE, &output.encoder)?;
        self.write_json(VECTORIZER_FILE, &output.vectorizer)?;

        let manifest = ArtifactManifest {
            created_at: Utc::now(),
            files: [DATA_FILE, MATRIX_FILE, ENCODER_FILE, VECTORIZER_FILE]
                .iter()
                .map(|f| f.to_string())
                .collect(),
            data_shape: output.data_shape(),
            tfidf_shape: output.tfidf_shape(),
            classes: output.encoder.classes().to_vec(),
        };
        self.write_json(MANIFEST_FILE, &manifest)?;

        info!(dir = %self.dir.display(), files = manifest.files.len(), "Saved preprocessing artifacts");
        Ok(manifest)
    }

    pub fn load(&self) -> Result<LoadedArtifacts> {
        let matrix_path = self.path(MATRIX_FILE);
        let tfidf: Array2<f64> = ndarray_npy::read_npy(&matrix_path).map_err(|e| {
            NlpError::Serialization(format!("{}: {e}", matrix_path.display()))
        })?;

        Ok(LoadedArtifacts {
            manifest: self.read_json(MANIFEST_FILE)?,
            records: self.read_records()?,
            tfidf,
            encoder: self.read_json(ENCODER_FILE)?,
            vectorizer: self.read_json(VECTORIZER_FILE)?,
        })
    }

    fn write_records(&self, records: &[ProcessedRecord]) -> Result<()> {
        let path = self.path(DATA_FILE);
        let csv_error = |e: csv::Error| NlpError::Serialization(format!("{}: {e}", path.display()));

        let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;
        for record in records {
            writer.serialize(record).map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<ProcessedRecord>> {
        let path = self.path(DATA_FILE);
        let csv_error = |e: csv::Error| NlpError::Serialization(format!("{}: {e}", path.display()));

        let mut reader = csv::Reader::from_path(&path).map_err(csv_error)?;
        reader
            .deserialize()
            .collect::<std::result::Result<Vec<ProcessedRecord>, _>>()
            .map_err(csv_error)
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path(file), json)?;
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| NlpError::Serialization(format!("{}: {e}", path.display())))
    }
}
