use crate::error::Result;
use crate::key::Key;
use crate::profile::{CipherAlgorithm, CipherProfile};
use std::path::Path;

/// Display information about a cipher profile
pub fn show_info(path: &Path) -> Result<String> {
    let profile = CipherProfile::load(path)?;
    let alphabet = profile.alphabet()?;

    let mut output = String::new();

    output.push_str("Cipher Profile Information\n");
    output.push_str("==========================\n\n");

    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Version: {}\n", profile.version));
    output.push_str(&format!("Fingerprint: {}\n", profile.fingerprint()?));
    output.push('\n');

    output.push_str(&format!("Cipher: {:?}\n", profile.cipher));
    output.push_str(&format!(
        "Alphabet: {} ({} symbols)\n",
        profile
            .alphabet
            .iter()
            .map(|p| format!("{:?}", p).to_lowercase())
            .collect::<Vec<_>>()
            .join(","),
        alphabet.len()
    ));

    match profile.cipher {
        CipherAlgorithm::Columnar => {
            let key = Key::build(profile.key.as_str(), profile.sanitize, profile.direction)?;
            output.push_str(&format!("Columns: {}\n", key.cols()));
            output.push_str(&format!(
                "Key columns: {}\n",
                key.columns().iter().collect::<String>()
            ));
            output.push_str(&format!(
                "Rank ({:?}): {}\n",
                profile.direction,
                key.rank().iter().collect::<String>()
            ));
            output.push_str(&format!("Read order: {:?}\n", key.order().as_slice()));
            output.push_str(&format!("Sanitized: {}\n", profile.sanitize));
            output.push_str(&format!("Padding: {:?}\n", profile.padding));
            match profile.seed {
                Some(seed) => output.push_str(&format!("Seed: {}\n", seed)),
                None => output.push_str("Seed: system\n"),
            }
        }
        CipherAlgorithm::Caesar => {
            output.push_str(&format!("Shift: {}\n", profile.key.trim()));
        }
        CipherAlgorithm::Scramble => {
            output.push_str(&format!("Passphrase length: {}\n", profile.key.chars().count()));
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_show_info() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.json");
        CipherProfile {
            key: "2123".into(),
            ..Default::default()
        }
        .save(&path)
        .unwrap();

        let info = show_info(&path).unwrap();

        assert!(info.contains("Version: 1"));
        assert!(info.contains("Cipher: Columnar"));
        assert!(info.contains("Alphabet: lower (26 symbols)"));
        assert!(info.contains("Columns: 3"));
        assert!(info.contains("Key columns: 213"));
        assert!(info.contains("Rank (Ascending): 123"));
        assert!(info.contains("Read order: [1, 0, 2]"));
    }

    #[test]
    fn test_show_info_missing_file() {
        let dir = tempdir().unwrap();
        assert!(show_info(&dir.path().join("absent.json")).is_err());
    }
}
