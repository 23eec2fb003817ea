//! Locates the per-user directories the tools read from.
use std::path::PathBuf;

use crate::data::paths;

#[derive(Debug, Clone, Copy)]
pub enum FsAccess {
    Home,
    Config,
    Current,
}

impl FsAccess {
    /// Retrieves the base directory for this location.
    ///
    /// # Arguments
    /// * `raw` - If `true`, returns the base path without the `waste_sort` subdirectory.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The base path for the directory.
    fn get_path(&self, raw: bool) -> anyhow::Result<PathBuf> {
        let base_path = match self {
            FsAccess::Home => dirs::home_dir(),
            FsAccess::Config => dirs::config_dir(),
            FsAccess::Current => std::env::current_dir().ok(),
        };

        let mut path = base_path.ok_or_else(|| {
            anyhow::anyhow!("Unable to locate the {:?} directory on this system", self)
        })?;

        if !raw {
            if let FsAccess::Home = self {
                path.push(format!(".{}", paths::SETTINGS_DIR));
            } else {
                path.push(paths::SETTINGS_DIR);
            }
        }
        Ok(path)
    }

    /// Returns the `waste_sort` directory under this location without creating it.
    ///
    /// Examples:
    /// `~/.config/waste_sort`, `~/.waste_sort`.
    pub fn path(&self) -> anyhow::Result<PathBuf> {
        self.get_path(false)
    }

    pub fn raw_path(&self) -> anyhow::Result<PathBuf> {
        self.get_path(true)
    }

    /// Path of the optional settings file, e.g. `~/.config/waste_sort/settings.json`.
    pub fn settings_file(&self) -> anyhow::Result<PathBuf> {
        let mut path = self.path()?;
        path.push(paths::SETTINGS_FILE);
        Ok(path)
    }
}
