use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Audio formats the upload page knows how to label.
///
/// Wraps declared MIME types as an enum for type-safe comparisons. Unknown
/// types are kept verbatim in `Other` so configuration can widen the accepted
/// set without code changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioFormat {
    Mpeg,
    Wav,
    Ogg,
    Other(String),
}

impl AudioFormat {
    /// MIME type string (e.g., "audio/mpeg").
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mpeg => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Other(s) => s,
        }
    }

    /// Parse a browser-reported MIME type. Matching is exact, as browsers
    /// report lowercase types without parameters for local files.
    pub fn from_mime(s: &str) -> Self {
        match s {
            "audio/mpeg" => Self::Mpeg,
            "audio/wav" => Self::Wav,
            "audio/ogg" => Self::Ogg,
            other => Self::Other(other.to_string()),
        }
    }

    /// Short label shown to users ("MP3", "WAV", ...).
    pub fn label(&self) -> &str {
        match self {
            Self::Mpeg => "MP3",
            Self::Wav => "WAV",
            Self::Ogg => "OGG",
            Self::Other(s) => s.strip_prefix("audio/").unwrap_or(s),
        }
    }
}

impl Serialize for AudioFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AudioFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_mime(&s))
    }
}

/// Join labels for a sentence: "MP3", "MP3 or WAV", "MP3, WAV, or OGG".
pub fn describe_formats(formats: &[AudioFormat]) -> String {
    let labels: Vec<&str> = formats.iter().map(|f| f.label()).collect();
    match labels.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_round_trip() {
        for mime in ["audio/mpeg", "audio/wav", "audio/ogg", "audio/flac"] {
            assert_eq!(AudioFormat::from_mime(mime).as_str(), mime);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(AudioFormat::Mpeg.label(), "MP3");
        assert_eq!(AudioFormat::from_mime("audio/flac").label(), "flac");
    }

    #[test]
    fn describe_joins_with_oxford_comma() {
        let all = [AudioFormat::Mpeg, AudioFormat::Wav, AudioFormat::Ogg];
        assert_eq!(describe_formats(&all), "MP3, WAV, or OGG");
        assert_eq!(describe_formats(&all[..2]), "MP3 or WAV");
        assert_eq!(describe_formats(&all[..1]), "MP3");
    }

    #[test]
    fn serde_uses_mime_strings() {
        let json = serde_json::to_string(&[AudioFormat::Ogg]).unwrap();
        assert_eq!(json, r#"["audio/ogg"]"#);
        let parsed: Vec<AudioFormat> = serde_json::from_str(r#"["audio/wav","audio/x-aiff"]"#).unwrap();
        assert_eq!(parsed[0], AudioFormat::Wav);
        assert_eq!(parsed[1], AudioFormat::Other("audio/x-aiff".into()));
    }
}
