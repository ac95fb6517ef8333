// Pipeline settings
// The binary always runs with `Settings::default()`; embedders may load overrides from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "images.txt";
pub const DEFAULT_OUTPUT: &str = "images.csv";
pub const DEFAULT_TEMP: &str = "images_temp.csv";

/// File names, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNames {
    /// Source records (removed after a successful run)
    pub input: PathBuf,

    /// Final fully-quoted CSV
    pub output: PathBuf,

    /// Intermediate file, renamed to `output` on success
    pub temp: PathBuf,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            temp: PathBuf::from(DEFAULT_TEMP),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub files: FileNames,

    /// Wait for Enter before exiting (interactive front-end only)
    pub pause_on_exit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            files: FileNames::default(),
            pause_on_exit: true,
        }
    }
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, String> {
        let settings: Settings = toml::from_str(s).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    /// The temp file must not alias the input or output, or a failed write could clobber them.
    pub fn validate(&self) -> Result<(), String> {
        let FileNames { input, output, temp } = &self.files;
        if temp == input || temp == output {
            return Err(format!(
                "temp file '{}' must differ from input and output",
                temp.display()
            ));
        }
        Ok(())
    }

    pub fn input_path(&self, base: &Path) -> PathBuf {
        base.join(&self.files.input)
    }

    pub fn output_path(&self, base: &Path) -> PathBuf {
        base.join(&self.files.output)
    }

    pub fn temp_path(&self, base: &Path) -> PathBuf {
        base.join(&self.files.temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fixed_names() {
        let s = Settings::default();
        assert_eq!(s.files.input, PathBuf::from("images.txt"));
        assert_eq!(s.files.output, PathBuf::from("images.csv"));
        assert_eq!(s.files.temp, PathBuf::from("images_temp.csv"));
        assert!(s.pause_on_exit);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml = "pause_on_exit = false\n[files]\noutput = \"out.csv\"\n";
        let s = Settings::from_toml_str(toml).unwrap();
        assert!(!s.pause_on_exit);
        assert_eq!(s.files.output, PathBuf::from("out.csv"));
        assert_eq!(s.files.input, PathBuf::from("images.txt"));
    }

    #[test]
    fn temp_alias_rejected() {
        let err = Settings::from_toml_str("[files]\ntemp = \"images.csv\"\n").unwrap_err();
        assert!(err.contains("must differ"));
    }

    #[test]
    fn paths_join_base() {
        let s = Settings::default();
        let base = Path::new("/data/art");
        assert_eq!(s.input_path(base), PathBuf::from("/data/art/images.txt"));
        assert_eq!(s.temp_path(base), PathBuf::from("/data/art/images_temp.csv"));
    }
}
