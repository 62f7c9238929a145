use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::dashboard::DashboardView;
use crate::data::cache::TableCache;
use crate::data::columns::{INDUSTRY, LOCATION};
use crate::data::filter::{selection_options, Selection};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Tables read so far, keyed by path.
    pub cache: TableCache,

    /// Path of the table on screen.
    pub source: Option<PathBuf>,

    /// Loaded table (None until a file loads).
    pub table: Option<Arc<Table>>,

    /// Current dropdown choices.
    pub location: Selection,
    pub industry: Selection,

    /// Dropdown contents, `All` first.
    pub location_options: Vec<Selection>,
    pub industry_options: Vec<Selection>,

    /// Colours per city / industry, fixed for the loaded table.
    pub location_colors: Option<ColorMap>,
    pub industry_colors: Option<ColorMap>,

    /// Last successfully computed page.
    pub view: Option<DashboardView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` (through the cache), reset the selections and rebuild the view.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let table = self
            .cache
            .load(path)
            .with_context(|| format!("loading {}", path.display()))?;

        self.location_options = selection_options(&table, LOCATION)?;
        self.industry_options = selection_options(&table, INDUSTRY)?;
        self.location_colors = Some(ColorMap::new(table.column_values(LOCATION)?));
        self.industry_colors = Some(ColorMap::new(table.column_values(INDUSTRY)?));
        self.location = Selection::All;
        self.industry = Selection::All;
        self.source = Some(path.to_path_buf());
        self.table = Some(table);
        self.view = None;
        self.status_message = None;

        self.recompute();
        Ok(())
    }

    /// Like [`AppState::open`], reporting failure in the status line instead of returning it.
    pub fn open_and_report(&mut self, path: &Path) {
        if let Err(e) = self.open(path) {
            log::error!("Failed to load file: {e:#}");
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    /// Drop the cached copy of the current file and read it again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.cache.evict(&path);
            self.open_and_report(&path);
        }
    }

    /// Recompute the page for the current selections.
    /// On failure the previous page stays on screen.
    pub fn recompute(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        match DashboardView::compute(table, &self.location, &self.industry) {
            Ok(view) => {
                self.view = Some(view);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Dashboard recomputation failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_location(&mut self, selection: Selection) {
        if self.location != selection {
            self.location = selection;
            self.recompute();
        }
    }

    pub fn set_industry(&mut self, selection: Selection) {
        if self.industry != selection {
            self.industry = selection;
            self.recompute();
        }
    }

    pub fn reset_filters(&mut self) {
        self.location = Selection::All;
        self.industry = Selection::All;
        self.recompute();
    }

    /// Colour map for a chart row's grouping column.
    pub fn colors_for(&self, group_by: &str) -> Option<&ColorMap> {
        match group_by {
            LOCATION => self.location_colors.as_ref(),
            INDUSTRY => self.industry_colors.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;
    use crate::data::model::Value;

    const CSV: &str = "\
Rank,Company,Sector,Location,Launch Year,Employees,Total Funding (€M),2-yr Revenue CAGR (%)
1,Acme,FinTech - Payments,Berlin,2019,120,45.5,310
2,Beta,AI - Vision,Munich,2020,40,12,150
3,Gamma,AI,Berlin,2018,60,30,90
4,Delta,Climate - Energy,Kiel,2021,15,3,
";

    fn loaded() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("startups.csv");
        std::fs::write(&path, CSV).unwrap();
        let mut state = AppState::default();
        state.open(&path).unwrap();
        (dir, state)
    }

    #[test]
    fn opening_builds_options_and_view() {
        let (_dir, state) = loaded();
        assert_eq!(state.location_options.len(), 4);
        assert_eq!(state.location_options[1], Selection::Only("Berlin".into()));
        assert_eq!(state.industry_options.len(), 4);
        assert_eq!(state.location_colors.as_ref().unwrap().len(), 3);
        assert!(state.status_message.is_none());

        // Kiel has no growth figures: it is counted but gets no median bar.
        let view = state.view.as_ref().unwrap();
        let by_city = &view.rows[0];
        assert_eq!(by_city.charts[0].bars.len(), 3);
        assert!(by_city.charts[3]
            .bars
            .iter()
            .all(|b| b.group != Value::from("Kiel")));
    }

    #[test]
    fn failed_recompute_keeps_the_previous_view() {
        let (_dir, mut state) = loaded();

        state.set_location(Selection::Only("Berlin".into()));
        let berlin = state.view.clone().unwrap();
        assert_eq!(berlin.filtered.len(), 2);
        assert!(state.status_message.is_none());

        state.table = Some(Arc::new(table(
            &[LOCATION, INDUSTRY],
            vec![vec!["Berlin".into(), "AI".into()]],
        )));
        state.recompute();
        assert_eq!(state.view.as_ref(), Some(&berlin));
        assert!(state.status_message.is_some());
    }

    #[test]
    fn industry_filter_uses_the_derived_column() {
        let (_dir, mut state) = loaded();
        state.set_industry(Selection::Only("AI".into()));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.filtered.len(), 2);
        assert_eq!(view.scorecards.total_startups, 4);

        state.reset_filters();
        assert_eq!(state.industry, Selection::All);
    }

    #[test]
    fn missing_file_is_reported_in_the_status_line() {
        let mut state = AppState::default();
        state.open_and_report(Path::new("/definitely/not/here.csv"));
        assert!(state.table.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("file not found"), "{msg}");
    }

    #[test]
    fn reload_rereads_the_source() {
        let (dir, mut state) = loaded();
        let path = dir.path().join("startups.csv");
        std::fs::write(&path, "Company,Sector,Location,Employees,Total Funding (€M),2-yr Revenue CAGR (%)\nAcme,AI,Berlin,1,1,1\n").unwrap();

        state.reload();
        assert_eq!(state.table.as_ref().unwrap().len(), 1);
        assert_eq!(state.view.as_ref().unwrap().scorecards.total_startups, 1);
    }
}
