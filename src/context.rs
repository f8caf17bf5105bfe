//! Application context passed explicitly into evaluation

use std::collections::HashMap;
use std::path::Path;

use log::info;

use crate::error::TableError;
use crate::model::{LeastSquaresFitter, ModelFitter, Table};

/// Shared resources for one session: loaded tables and fitting collaborators
pub struct AppContext {
    tables: HashMap<String, Table>,
    fitter: Box<dyn ModelFitter>,
    trainer: Option<Box<dyn ModelFitter>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            fitter: Box::new(LeastSquaresFitter::new()),
            trainer: None,
        }
    }

    pub fn with_fitter(mut self, fitter: Box<dyn ModelFitter>) -> Self {
        self.fitter = fitter;
        self
    }

    pub fn with_trainer(mut self, trainer: Box<dyn ModelFitter>) -> Self {
        self.trainer = Some(trainer);
        self
    }

    /// Register an already parsed table under a source path
    pub fn insert_table(&mut self, path: impl Into<String>, table: Table) {
        self.tables.insert(path.into(), table);
    }

    /// Read a CSV file and register it under its path
    pub fn load_table(&mut self, path: &str) -> Result<&Table, TableError> {
        let table = Table::load(Path::new(path))?;
        info!("Loaded {} ({} rows, {} columns)", path, table.len(), table.columns.len());
        self.tables.insert(path.to_string(), table);
        Ok(&self.tables[path])
    }

    pub fn table(&self, path: &str) -> Option<&Table> {
        self.tables.get(path)
    }

    pub fn fitter(&self) -> &dyn ModelFitter {
        self.fitter.as_ref()
    }

    pub fn trainer(&self) -> Option<&dyn ModelFitter> {
        self.trainer.as_deref()
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
