//! User preferences loaded from the profile's JSON preferences file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// User-tunable settings. Every field has a default so a missing or partial
/// preferences file is always usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Preferences {
    /// Editor command used to open note files.
    pub editor: String,
    /// Compiler executable invoked per note document.
    pub compiler_command: String,
    /// Arguments passed to the compiler before the note path.
    pub compiler_args: Vec<String>,
    /// Maximum concurrent compile jobs; 0 means one per available core.
    pub max_jobs: usize,
    /// Per-invocation compile timeout in seconds.
    pub compile_timeout_secs: u64,
    /// Author substituted into document templates.
    pub author: String,
    /// Override for the note boilerplate template.
    pub subfile_template: String,
    /// Override for the per-subject aggregate document template.
    pub main_template: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            editor: defaults::NOTE_EDITOR.to_string(),
            compiler_command: defaults::COMPILER_COMMAND.to_string(),
            compiler_args: defaults::COMPILER_ARGS.iter().map(|s| s.to_string()).collect(),
            max_jobs: 0,
            compile_timeout_secs: defaults::COMPILE_TIMEOUT_SECS,
            author: defaults::DOCUMENT_AUTHOR.to_string(),
            subfile_template: defaults::LATEX_SUBFILE_TEMPLATE.to_string(),
            main_template: defaults::LATEX_MAIN_FILE_TEMPLATE.to_string(),
        }
    }
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// An absent file yields the defaults; a present but unparsable file is
    /// a configuration error rather than a silent fallback.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };

        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid preferences file {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(prefs.compiler_command, "latexmk");
        assert_eq!(prefs.editor, "vim");
        assert_eq!(prefs.max_jobs, 0);
    }

    #[test]
    fn test_load_partial_file_merges_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"editor": "nvim", "max-jobs": 2}"#).unwrap();

        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.editor, "nvim");
        assert_eq!(prefs.max_jobs, 2);
        assert_eq!(prefs.compiler_command, "latexmk");
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();

        match Preferences::load(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("prefs.json")),
            other => panic!("expected Config error, got {:?}", other.map(|_| ())),
        }
    }
}
