use crate::cipher::Cipher;
use crate::cli::options::CipherOptions;
use crate::error::Result;
use std::path::Path;

/// Encrypt a text file
/// Returns the number of symbols written
pub fn encrypt_file(input_path: &Path, output_path: &Path, options: &CipherOptions) -> Result<usize> {
    let mut cipher = options.resolve()?.build()?;
    let plaintext = std::fs::read_to_string(input_path)?;
    let ciphertext = cipher.encrypt(&plaintext)?;
    std::fs::write(output_path, &ciphertext)?;
    Ok(ciphertext.chars().count())
}

/// Decrypt a text file
/// Returns the number of symbols written
pub fn decrypt_file(input_path: &Path, output_path: &Path, options: &CipherOptions) -> Result<usize> {
    let mut cipher = options.resolve()?.build()?;
    let ciphertext = std::fs::read_to_string(input_path)?;
    let plaintext = cipher.decrypt(&ciphertext)?;
    std::fs::write(output_path, &plaintext)?;
    Ok(plaintext.chars().count())
}

/// Write the resolved profile to `output_path`
pub fn write_profile(output_path: &Path, options: &CipherOptions) -> Result<String> {
    let profile = options.resolve()?;
    profile.save(output_path)?;
    profile.fingerprint()
}
