//! Audio upload validation
//!
//! Checks the browser-declared MIME type and size only. File contents are
//! never inspected, so a renamed or mislabelled file passes if the browser
//! reports an accepted type.

use thiserror::Error;

use crate::config::ValidationConfig;
use crate::content_type::{describe_formats, AudioFormat};
use crate::format::format_file_size;
use crate::upload::SelectedFile;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload a valid audio file ({accepted})")]
    UnsupportedType { mime_type: String, accepted: String },
    #[error("File size must be less than {}", size_limit(.max_bytes))]
    TooLarge { size: u64, max_bytes: u64 },
}

/// "16MB": the page copy writes the limit without a space.
fn size_limit(max_bytes: &u64) -> String {
    format_file_size(*max_bytes).replace(' ', "")
}

/// Validates selected files against a [`ValidationConfig`].
#[derive(Debug, Clone, Default)]
pub struct AudioValidator {
    config: ValidationConfig,
}

impl AudioValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, file: &SelectedFile) -> Result<(), ValidationError> {
        let format = AudioFormat::from_mime(&file.mime_type);
        if !self.config.accepted_types.contains(&format) {
            return Err(ValidationError::UnsupportedType {
                mime_type: file.mime_type.clone(),
                accepted: describe_formats(&self.config.accepted_types),
            });
        }

        if file.size > self.config.max_size_bytes {
            return Err(ValidationError::TooLarge {
                size: file.size,
                max_bytes: self.config.max_size_bytes,
            });
        }

        Ok(())
    }
}

/// Validate against the stock rules: MP3/WAV/OGG up to 16 MB.
pub fn validate_audio_file(file: &SelectedFile) -> Result<(), ValidationError> {
    AudioValidator::default().validate(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn accepts_small_mp3() {
        assert!(validate_audio_file(&SelectedFile::new("a.mp3", "audio/mpeg", 1000)).is_ok());
    }

    #[test]
    fn rejects_non_audio_type_regardless_of_size() {
        for size in [0, 1000, 100 * MB] {
            let err = validate_audio_file(&SelectedFile::new("a.txt", "text/plain", size))
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Please upload a valid audio file (MP3, WAV, or OGG)"
            );
        }
    }

    #[test]
    fn rejects_oversized_wav() {
        let err = validate_audio_file(&SelectedFile::new("a.wav", "audio/wav", 17 * MB))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLarge {
                size: 17 * MB,
                max_bytes: 16 * MB
            }
        );
        assert_eq!(err.to_string(), "File size must be less than 16MB");
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(validate_audio_file(&SelectedFile::new("a.ogg", "audio/ogg", 16 * MB)).is_ok());
        assert!(validate_audio_file(&SelectedFile::new("a.ogg", "audio/ogg", 16 * MB + 1)).is_err());
    }

    #[test]
    fn type_is_checked_before_size() {
        let err = validate_audio_file(&SelectedFile::new("a.pdf", "application/pdf", 50 * MB))
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn trusts_declared_type_over_extension() {
        // Only the declared type is checked, never the name or contents.
        assert!(validate_audio_file(&SelectedFile::new("notes.txt", "audio/wav", 10)).is_ok());
        assert!(validate_audio_file(&SelectedFile::new("song.mp3", "", 10)).is_err());
    }

    #[test]
    fn custom_rules() {
        let validator = AudioValidator::new(ValidationConfig {
            accepted_types: vec![AudioFormat::from_mime("audio/flac")],
            max_size_bytes: MB,
        });
        assert!(validator
            .validate(&SelectedFile::new("a.flac", "audio/flac", 10))
            .is_ok());
        let err = validator
            .validate(&SelectedFile::new("a.mp3", "audio/mpeg", 10))
            .unwrap_err();
        assert_eq!(err.to_string(), "Please upload a valid audio file (flac)");
    }
}
