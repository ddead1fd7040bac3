//! Configuration loading and parsing.
//!
//! Parses `sift.toml` (or an override path provided by the binary),
//! extracting the default search case sensitivity and the edit-history
//! depth. Unknown fields are ignored (TOML deserialization tolerance) so
//! the file format can grow without breaking older binaries; a missing or
//! unparsable file falls back to defaults rather than failing startup. The
//! history limit is clamped against the cap the host compiles in, and the
//! clamp is logged so a surprising effective value can be traced back.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SearchConfig {
    /// Default state of the case-sensitivity toggle when a search surface
    /// opens. The surface can still flip it per query.
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_limit")]
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: Self::default_limit(),
        }
    }
}

impl HistoryConfig {
    const fn default_limit() -> usize {
        200
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,          // original file string (optional)
    pub file: ConfigFile,             // parsed (or default) data
    pub effective_history_limit: usize, // clamped against the host cap
}

/// Best-effort config path following platform conventions: prefer a local
/// `sift.toml` in the working directory, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("sift.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("sift").join("sift.toml");
    }
    PathBuf::from("sift.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config {
                raw: Some(content),
                file,
                effective_history_limit: 0, // computed by apply_history_cap
            }),
            Err(_e) => {
                // On parse error fall back to defaults rather than refusing
                // to start.
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

impl Config {
    /// Clamp the configured history limit into `[1, max]`, where `max` is
    /// the cap the host compiles in. Returns the effective value.
    pub fn apply_history_cap(&mut self, max: usize) -> usize {
        let raw = self.file.history.limit;
        let clamped = raw.clamp(1, max.max(1));
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                "history_limit_clamped"
            );
        }
        self.effective_history_limit = clamped;
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(!cfg.file.search.case_sensitive);
        assert_eq!(cfg.file.history.limit, 200);
    }

    #[test]
    fn parses_both_sections() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[search]\ncase_sensitive = true\n[history]\nlimit = 50\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.file.search.case_sensitive);
        assert_eq!(cfg.file.history.limit, 50);
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[[[not toml").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.history.limit, 200);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[search]\ncase_sensitive = true\nfuzzy = true\n[colors]\ntheme = \"dark\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.file.search.case_sensitive);
    }

    #[test]
    fn history_limit_clamped_to_cap() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[history]\nlimit = 100000\n").unwrap();
        let mut cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.apply_history_cap(200), 200);
        assert_eq!(cfg.effective_history_limit, 200);
    }

    #[test]
    fn zero_history_limit_is_raised_to_one() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[history]\nlimit = 0\n").unwrap();
        let mut cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.apply_history_cap(200), 1);
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[history]\nlimit = 9999\n").unwrap();
        let mut cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        with_default(subscriber, || {
            cfg.apply_history_cap(200);
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("history_limit_clamped"));
        assert_eq!(cfg.effective_history_limit, 200);
    }
}
