//! Call-sign corpus loading and prefix-based country resolution
//!
//! The corpus is a MASTER.SCP-style text file: one call sign per line,
//! `#` lines are comments. The prefix table is a `prefix,country` CSV;
//! resolution takes the longest prefix that matches the call sign.

use cwtrainer_core::Result;
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Load call signs, lower-cased, comments and blanks skipped
pub fn load_callsigns(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let callsigns: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect();
    info!("loaded {} callsigns from {}", callsigns.len(), path.display());
    Ok(callsigns)
}

/// Longest-prefix call-sign to country table
pub struct PrefixTable {
    prefixes: HashMap<String, String>,
    max_len: usize,
}

impl PrefixTable {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut prefixes = HashMap::new();
        let mut max_len = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((prefix, country)) = line.split_once(',') {
                let prefix = prefix.trim().to_uppercase();
                max_len = max_len.max(prefix.len());
                prefixes.insert(prefix, country.trim().to_string());
            }
        }
        info!("loaded {} prefixes from {}", prefixes.len(), path.display());
        Ok(Self { prefixes, max_len })
    }

    /// Country for the longest matching prefix, if any
    pub fn resolve(&self, callsign: &str) -> Option<String> {
        let upper = callsign.to_uppercase();
        let longest = self.max_len.min(upper.len());
        for len in (1..=longest).rev() {
            if !upper.is_char_boundary(len) {
                continue;
            }
            if let Some(country) = self.prefixes.get(&upper[..len]) {
                return Some(country.clone());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "cwtrainer-lookup-{}-{}",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_callsigns_skips_comments_and_lowercases() {
        let path = write_temp("scp", "# header\nK1ABC\n\nSM5XYZ\n");
        let callsigns = load_callsigns(&path).unwrap();
        assert_eq!(callsigns, vec!["k1abc", "sm5xyz"]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_longest_prefix_wins() {
        let path = write_temp("prefixes", "K,United States\nKL,Alaska\nSM,Sweden\n");
        let table = PrefixTable::load(&path).unwrap();
        assert_eq!(table.resolve("k1abc").as_deref(), Some("United States"));
        assert_eq!(table.resolve("KL7AA").as_deref(), Some("Alaska"));
        assert_eq!(table.resolve("sm5xyz").as_deref(), Some("Sweden"));
        assert_eq!(table.resolve("ZZ9ZZ"), None);
        fs::remove_file(&path).unwrap();
    }
}
