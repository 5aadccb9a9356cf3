use std::path::PathBuf;

use crate::types::FilterSelection;

/// Run configuration for the console dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Root the catalog's `/dataset/...` paths are resolved under.
    pub data_dir: PathBuf,
    /// Where generated JSON views are written.
    pub output_dir: PathBuf,
    /// Selection the views are computed for.
    pub selection: FilterSelection,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("public"),
            output_dir: PathBuf::from("."),
            selection: FilterSelection::default(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the first positional argument (if any) as `data_dir`.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(dir) = args.into_iter().next() {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }
}
