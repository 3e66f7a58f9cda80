use super::{
    types::{DatasetMetadata, RawSequence, SequenceKind},
    validator::SequenceValidator,
};
use crate::config::AnalysisConfig;
use crate::error::{FourTrackError, Result};
use std::path::{Path, PathBuf};

/// File extensions picked up by directory scans
pub const SEQUENCE_EXTENSIONS: &[&str] = &["txt", "dat"];

pub struct TextConnector;

impl TextConnector {
    /// Read a text file and decide its alphabet
    pub fn load<P: AsRef<Path>>(
        path: P,
        kind: SequenceKind,
        config: &AnalysisConfig,
    ) -> Result<RawSequence> {
        let path = path.as_ref();
        let content = Self::read(path)?;
        let name = Self::display_name(path);
        let alphabet = kind.fixed().unwrap_or_else(|| {
            SequenceValidator::detect_alphabet(
                &content,
                config.detect_sample_len,
                config.digits_detect_ratio,
            )
        });

        log::debug!("Loaded {} ({} chars, {})", name, content.len(), alphabet);

        Ok(RawSequence {
            name,
            path: Some(path.to_path_buf()),
            content,
            alphabet,
        })
    }

    /// Load every sequence file directly inside `dir`, sorted by file name
    pub fn load_dir<P: AsRef<Path>>(
        dir: P,
        kind: SequenceKind,
        config: &AnalysisConfig,
    ) -> Result<Vec<RawSequence>> {
        let files = Self::list_sequence_files(dir)?;
        files
            .iter()
            .map(|path| Self::load(path, kind, config))
            .collect()
    }

    pub fn list_sequence_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(FourTrackError::FileNotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(FourTrackError::DataLoading(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let matches_ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| SEQUENCE_EXTENSIONS.contains(&ext))
                .unwrap_or(false);
            if path.is_file() && matches_ext {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            log::warn!("No .txt or .dat files found in {}", dir.display());
        }

        Ok(files)
    }

    pub fn create_metadata(raw: &RawSequence) -> DatasetMetadata {
        DatasetMetadata {
            file_path: raw
                .path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
            name: raw.name.clone(),
            alphabet: raw.alphabet,
            num_chars: raw.content.chars().filter(|c| !c.is_whitespace()).count(),
            num_lines: raw.content.lines().count(),
        }
    }

    fn read(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FourTrackError::FileNotFound(path.to_path_buf()),
            _ => FourTrackError::Io(e),
        })?;

        let content = String::from_utf8(bytes).map_err(|_| {
            FourTrackError::DataLoading(format!("{} is not valid UTF-8 text", path.display()))
        })?;

        // Some editors write a byte-order mark
        Ok(content.trim_start_matches('\u{feff}').to_string())
    }

    fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Alphabet;
    use std::fs;

    #[test]
    fn test_load_detects_alphabet() {
        let dir = tempfile::tempdir().unwrap();
        let dna = dir.path().join("promoter.txt");
        let pi = dir.path().join("pi.txt");
        fs::write(&dna, "ATCGATCG\n").unwrap();
        fs::write(&pi, "3.14159265358979").unwrap();

        let config = AnalysisConfig::default();
        let raw = TextConnector::load(&dna, SequenceKind::Auto, &config).unwrap();
        assert_eq!(raw.alphabet, Alphabet::Dna);
        assert_eq!(raw.name, "promoter.txt");

        let raw = TextConnector::load(&pi, SequenceKind::Auto, &config).unwrap();
        assert_eq!(raw.alphabet, Alphabet::Digits);
    }

    #[test]
    fn test_load_dir_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "ACGT").unwrap();
        fs::write(dir.path().join("a.dat"), "GGCC").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let config = AnalysisConfig::default();
        let loaded = TextConnector::load_dir(dir.path(), SequenceKind::Dna, &config).unwrap();
        let names: Vec<_> = loaded.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a.dat", "b.txt"]);
    }

    #[test]
    fn test_missing_file() {
        let config = AnalysisConfig::default();
        let result = TextConnector::load("/no/such/seq.txt", SequenceKind::Auto, &config);
        assert!(matches!(result, Err(FourTrackError::FileNotFound(_))));
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}ACGT").unwrap();
        let raw = TextConnector::load(&path, SequenceKind::Auto, &AnalysisConfig::default()).unwrap();
        assert_eq!(raw.content, "ACGT");
        assert_eq!(TextConnector::create_metadata(&raw).num_chars, 4);
    }
}
