use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::load_file;
use super::model::Table;
use crate::error::Result;

/// Loaded tables keyed by the path they were read from.
///
/// A path is read once; later loads hand back the same shared table until
/// [`TableCache::clear`] is called. Failed loads are not remembered.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<PathBuf, Arc<Table>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, reading the file only on the first call.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Table>> {
        if let Some(table) = self.tables.get(path) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_file(path)?);
        self.tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.tables.contains_key(path)
    }

    /// Drop one cached table so the next load re-reads it.
    pub fn evict(&mut self, path: &Path) -> bool {
        self.tables.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    fn write_csv(dir: &tempfile::TempDir, rows: &str) -> PathBuf {
        let path = dir.path().join("startups.csv");
        std::fs::write(&path, format!("Company,Sector,Location\n{rows}")).unwrap();
        path
    }

    #[test]
    fn repeated_loads_share_one_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Acme,AI - Vision,Berlin\n");

        let mut cache = TableCache::new();
        let first = cache.load(&path).unwrap();

        // A changed file is not re-read while cached.
        std::fs::write(&path, "Company,Sector,Location\n").unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_forces_a_reread() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Acme,AI - Vision,Berlin\n");

        let mut cache = TableCache::new();
        cache.load(&path).unwrap();
        write_csv(&dir, "Acme,AI - Vision,Berlin\nBeta,AI,Munich\n");

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.load(&path).unwrap().len(), 2);
    }

    #[test]
    fn evict_drops_a_single_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Acme,AI - Vision,Berlin\n");

        let mut cache = TableCache::new();
        cache.load(&path).unwrap();
        assert!(cache.evict(&path));
        assert!(!cache.contains(&path));
        assert!(!cache.evict(&path));
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");

        let mut cache = TableCache::new();
        assert!(matches!(
            cache.load(&path),
            Err(DashboardError::NotFound { .. })
        ));
        assert!(cache.is_empty());

        std::fs::write(&path, "Company,Sector\nAcme,AI\n").unwrap();
        assert_eq!(cache.load(&path).unwrap().len(), 1);
    }
}
