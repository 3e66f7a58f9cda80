use crate::config::AssociationConfig;
use crate::error::{FourTrackError, Result};
use serde::Serialize;
use std::path::Path;

/// Leading 101 significant digits of the built-in constants
const BUILTIN: &[(&str, &str)] = &[
    (
        "pi",
        "31415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679",
    ),
    (
        "e",
        "27182818284590452353602874713526624977572470936999595749669676277240766303535475945713821785251664274",
    ),
    (
        "phi",
        "16180339887498948482045868343656381177203091798057628621354486227052604628189024497072072041893911374",
    ),
    (
        "sqrt2",
        "14142135623730950488016887242096980785696718753769480731766797379907324784621070388503875343276415727",
    ),
    (
        "ln2",
        "06931471805599453094172321214581765680755001343602552541206800094933936219696947156058633269964186875",
    ),
];

/// File name patterns tried for constants that are not built in
const FILE_PATTERNS: &[&str] = &["{}.txt", "{}_digits.txt", "{}_100k.txt", "{}_high_precision.txt"];

/// Digit expansion of a named constant, as values 0-9
#[derive(Debug, Clone, Serialize)]
pub struct ConstantDigits {
    pub name: String,
    pub digits: Vec<u8>,
    pub source: String,
}

pub struct ConstantLibrary;

impl ConstantLibrary {
    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN.iter().map(|(name, _)| *name).collect()
    }

    pub fn builtin(name: &str) -> Option<ConstantDigits> {
        BUILTIN
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(n, digits)| ConstantDigits {
                name: n.to_string(),
                digits: Self::parse_digits(digits, usize::MAX),
                source: "builtin".to_string(),
            })
    }

    /// Resolve a constant: the configured directory wins over the built-in table.
    pub fn resolve(name: &str, config: &AssociationConfig) -> Result<ConstantDigits> {
        if let Some(dir) = &config.constants_dir {
            if let Some(found) = Self::load_from_dir(name, dir, config.max_constant_digits)? {
                return Ok(found);
            }
        }

        Self::builtin(name)
            .map(|mut c| {
                c.digits.truncate(config.max_constant_digits);
                c
            })
            .ok_or_else(|| {
                FourTrackError::DataLoading(format!(
                    "Unknown constant '{}' (built in: {})",
                    name,
                    Self::builtin_names().join(", ")
                ))
            })
    }

    pub fn resolve_all(config: &AssociationConfig) -> Result<Vec<ConstantDigits>> {
        config
            .constants
            .iter()
            .map(|name| Self::resolve(name, config))
            .collect()
    }

    fn load_from_dir(name: &str, dir: &Path, max_digits: usize) -> Result<Option<ConstantDigits>> {
        for pattern in FILE_PATTERNS {
            let path = dir.join(pattern.replace("{}", name));
            if path.is_file() {
                let content = std::fs::read_to_string(&path)?;
                let digits = Self::parse_digits(&content, max_digits);
                if digits.is_empty() {
                    return Err(FourTrackError::DataLoading(format!(
                        "Constant file {} contains no digits",
                        path.display()
                    )));
                }
                log::debug!("Loaded {} digits of {} from {}", digits.len(), name, path.display());
                return Ok(Some(ConstantDigits {
                    name: name.to_string(),
                    digits,
                    source: path.to_string_lossy().to_string(),
                }));
            }
        }
        Ok(None)
    }

    /// Keep decimal digits only; separators such as `.`, `,` and spaces are skipped
    pub fn parse_digits(content: &str, max_digits: usize) -> Vec<u8> {
        content
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as u8)
            .take(max_digits)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pi() {
        let pi = ConstantLibrary::builtin("PI").unwrap();
        assert_eq!(&pi.digits[..6], &[3, 1, 4, 1, 5, 9]);
        assert_eq!(pi.digits.len(), 101);
    }

    #[test]
    fn test_unknown_constant() {
        let config = AssociationConfig::default();
        let result = ConstantLibrary::resolve("tau_prime", &config);
        assert!(matches!(result, Err(FourTrackError::DataLoading(_))));
    }

    #[test]
    fn test_constant_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("au_digits.txt"), "1.495,978,707").unwrap();
        let config = AssociationConfig {
            constants_dir: Some(dir.path().to_path_buf()),
            max_constant_digits: 5,
            ..AssociationConfig::default()
        };
        let au = ConstantLibrary::resolve("au", &config).unwrap();
        assert_eq!(au.digits, vec![1, 4, 9, 5, 9]);
    }
}
