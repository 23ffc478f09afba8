use crate::config::parser::{ConfigParseError, ConfigParser};
use crate::models::hotkey_binding::HotkeyBinding;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const BINDINGS_FILE_NAME: &str = "bindings.toml";

/// Location of the bindings file on disk
#[derive(Debug, Clone)]
pub struct BindingStore {
    path: PathBuf,
}

impl BindingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/tilesnap/bindings.toml`, or `./bindings.toml` when the
    /// platform has no config directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("tilesnap").join(BINDINGS_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(BINDINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load bindings from the file, falling back to the built-in defaults
    /// when it does not exist. Parser warnings are logged.
    pub fn load(&self) -> Result<Vec<HotkeyBinding>, ConfigParseError> {
        if !self.exists() {
            debug!(path = %self.path.display(), "No bindings file, using defaults");
            return Ok(HotkeyBinding::defaults());
        }

        let mut parser = ConfigParser::new()?;
        let bindings = parser.parse_bindings_file(&self.path)?;
        for warning in parser.warnings() {
            warn!(path = %self.path.display(), "{}", warning);
        }

        info!(
            path = %self.path.display(),
            bindings = bindings.len(),
            "Loaded bindings file"
        );
        Ok(bindings)
    }

    /// Write `bindings` to the file, replacing it atomically
    pub fn save(&self, bindings: &[HotkeyBinding]) -> Result<(), ConfigParseError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = ConfigParser::to_toml(bindings)?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(temp_path, &self.path)?;
        Ok(())
    }

    /// Write the default bindings unless a file already exists. Returns
    /// whether a file was written.
    pub fn initialize(&self, overwrite: bool) -> Result<bool, ConfigParseError> {
        if self.exists() && !overwrite {
            return Ok(false);
        }
        self.save(&HotkeyBinding::defaults())?;
        Ok(true)
    }
}

impl Default for BindingStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
