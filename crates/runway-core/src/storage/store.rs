//! A directory of snapshot files, one per model.

use std::path::{Path, PathBuf};

use super::json::{parse_snapshot, write_snapshot};
use crate::error::{Result, RunwayError};
use crate::model::ModelSnapshot;
use crate::questionnaire::Questionnaire;

/// Stores each model as `<model id>.json` under one directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<FileStore> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(FileStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, model_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", model_id))
    }

    /// Build and persist the initial model for a questionnaire.
    pub fn create_model(&self, answers: &Questionnaire) -> Result<ModelSnapshot> {
        let snapshot = answers.build_snapshot()?;
        self.save(&snapshot)?;
        tracing::info!(model = %snapshot.model.id, "created model");
        Ok(snapshot)
    }

    /// Load a model with rows ordered by `display_order` and cells by period.
    pub fn get_model(&self, model_id: &str) -> Result<ModelSnapshot> {
        if !is_valid_id(model_id) {
            return Err(RunwayError::ModelNotFound(model_id.to_string()));
        }
        let path = self.path_for(model_id);
        if !path.is_file() {
            return Err(RunwayError::ModelNotFound(model_id.to_string()));
        }
        parse_snapshot(&path)
    }

    pub fn save(&self, snapshot: &ModelSnapshot) -> Result<()> {
        if !is_valid_id(&snapshot.model.id) {
            return Err(RunwayError::Validation(format!(
                "model id `{}` cannot be used as a file name",
                snapshot.model.id
            )));
        }
        write_snapshot(&self.path_for(&snapshot.model.id), snapshot)
    }

    /// Overwrite one cell's value. Input and calculated values are both set;
    /// the stored grid is not recalculated.
    pub fn update_cell_value(&self, model_id: &str, cell_id: &str, value: f64) -> Result<()> {
        let mut snapshot = self.get_model(model_id)?;
        let cell = snapshot
            .find_cell_mut(cell_id)
            .ok_or_else(|| RunwayError::CellIdNotFound(cell_id.to_string()))?;
        cell.input_value = Some(value);
        cell.calculated_value = Some(value);
        snapshot.model.touch();
        self.save(&snapshot)
    }

    /// Ids of every stored model, sorted.
    pub fn list_models(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
