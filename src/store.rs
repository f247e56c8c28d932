//! Student collection store
//!
//! Holds the ordered student collection in memory and mirrors it to a JSON
//! file on disk. The file is read once at startup; afterwards the in-memory
//! copy is the source of truth and every mutation rewrites the file in full.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A single student record.
///
/// Only `id` is server-generated. The remaining fields are copied verbatim
/// from the create request and stay absent when the caller omitted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(rename = "isEmployed", default, skip_serializing_if = "Option::is_none")]
    pub is_employed: Option<Value>,
}

/// Caller-supplied fields of a create request. No type or presence checks.
#[derive(Debug, Default, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
    #[serde(rename = "isEmployed", default)]
    pub is_employed: Option<Value>,
}

pub struct StudentStore {
    db_path: PathBuf,
    students: RwLock<Vec<Student>>,
}

impl StudentStore {
    /// Load the collection from the backing file.
    ///
    /// A missing file starts an empty collection; an existing file that is
    /// not a JSON array of records is a startup error.
    pub async fn load(db_path: impl Into<PathBuf>) -> io::Result<Self> {
        let db_path = db_path.into();
        let students = match fs::read(&db_path).await {
            Ok(content) => serde_json::from_slice(&content).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid backing file {}: {e}", db_path.display()),
                )
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            db_path,
            students: RwLock::new(students),
        })
    }

    /// Snapshot of the full collection in insertion order.
    pub async fn all(&self) -> Vec<Student> {
        self.students.read().await.clone()
    }

    /// First record matching `id`, if any.
    pub async fn find(&self, id: &str) -> Option<Student> {
        self.students
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Append a new record built from the caller-supplied fields.
    ///
    /// The staged collection is persisted before the in-memory copy is
    /// committed, so a failed write leaves no trace of the record.
    pub async fn create(&self, fields: NewStudent) -> io::Result<Student> {
        let student = Student {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            age: fields.age,
            gender: fields.gender,
            is_employed: fields.is_employed,
        };

        let mut students = self.students.write().await;
        let mut staged = students.clone();
        staged.push(student.clone());
        self.persist(&staged).await?;
        *students = staged;

        Ok(student)
    }

    /// Remove the first record matching `id`.
    ///
    /// Returns `Ok(false)` when no record matches; the collection and the
    /// backing file are untouched in that case.
    pub async fn remove(&self, id: &str) -> io::Result<bool> {
        let mut students = self.students.write().await;
        let Some(index) = students.iter().position(|s| s.id == id) else {
            return Ok(false);
        };

        let mut staged = students.clone();
        staged.remove(index);
        self.persist(&staged).await?;
        *students = staged;

        Ok(true)
    }

    /// Rewrite the backing file with the staged collection.
    ///
    /// Serializes the whole collection as pretty-printed JSON, writes it to
    /// a sibling temp file, and renames it over the original so a crash
    /// mid-write cannot leave a truncated file behind.
    async fn persist(&self, students: &[Student]) -> io::Result<()> {
        let json = serde_json::to_string_pretty(students)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.db_path.with_extension("json.tmp");
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &self.db_path).await
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
