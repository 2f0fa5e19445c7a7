//! In-process [`NotebookApi`] used for offline runs and tests.

use crate::api::{ApiError, ApiResult, NotebookApi};
use crate::model::notebook::{Notebook, NotebookId};
use crate::model::{generate_id, now_epoch_ms};
use std::cell::RefCell;

/// Notebook API backed by a local list.
#[derive(Debug, Default)]
pub struct MemoryNotebookApi {
    notebooks: RefCell<Vec<Notebook>>,
}

impl MemoryNotebookApi {
    pub fn new(notebooks: Vec<Notebook>) -> Self {
        Self {
            notebooks: RefCell::new(notebooks),
        }
    }

    /// Snapshot of stored rows.
    pub fn snapshot(&self) -> Vec<Notebook> {
        self.notebooks.borrow().clone()
    }
}

impl NotebookApi for MemoryNotebookApi {
    fn list_notebooks(&self) -> ApiResult<Vec<Notebook>> {
        Ok(self.notebooks.borrow().clone())
    }

    fn create_notebook(&self, name: &str, parent_id: Option<&str>) -> ApiResult<NotebookId> {
        let notebook = Notebook::new(
            generate_id(),
            name,
            parent_id.map(str::to_string),
            now_epoch_ms(),
        );
        let id = notebook.id.clone();
        self.notebooks.borrow_mut().push(notebook);
        Ok(id)
    }

    fn delete_notebook(&self, notebook_id: &str) -> ApiResult<()> {
        let mut notebooks = self.notebooks.borrow_mut();
        let before = notebooks.len();
        notebooks.retain(|notebook| notebook.id != notebook_id);
        if notebooks.len() == before {
            return Err(ApiError::NotFound(notebook_id.to_string()));
        }
        Ok(())
    }
}
