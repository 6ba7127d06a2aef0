//! runway-core - UI-agnostic projection document model + storage.

pub mod document;
pub mod error;
pub mod model;
pub mod questionnaire;
pub mod storage;

pub use document::{Document, RowGroup};
pub use error::{Result, RunwayError};
pub use model::{Model, ModelSnapshot};
pub use questionnaire::Questionnaire;

pub use runway_engine::engine::{RowType, ViewMode};
