//! SSML request bodies for the Azure synthesis endpoint.
//!
//! The REST endpoint only accepts SSML, so plain text is wrapped in a
//! `<speak>`/`<voice>` envelope. Prosody adjustments add a `<prosody>` element.
//!
//! ```xml
//! <speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" xml:lang="ja-JP">
//!     <voice name="ja-JP-NanamiNeural">
//!         <prosody rate="1.5" pitch="+50Hz" volume="loud">...</prosody>
//!     </voice>
//! </speak>
//! ```

use serde::{Deserialize, Serialize};

/// Language used when it cannot be derived from the voice name.
pub const DEFAULT_LANGUAGE: &str = "ja-JP";

/// W3C SSML namespace.
pub const SSML_NAMESPACE: &str = "http://www.w3.org/2001/10/synthesis";

/// Prosody adjustments. Values are passed to the service verbatim, e.g.
/// rate `"slow"`/`"1.5"`, pitch `"high"`/`"+50Hz"`, volume `"loud"`/`"50%"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prosody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

impl Prosody {
    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.attributes().next().is_none()
    }

    /// Set attributes in document order, skipping blank values.
    fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("rate", self.rate.as_deref()),
            ("pitch", self.pitch.as_deref()),
            ("volume", self.volume.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
    }
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Locale prefix of an Azure voice short name.
///
/// `ja-JP-NanamiNeural` → `ja-JP`, `zh-CN-shaanxi-XiaoniNeural` → `zh-CN`.
/// Anything without a `lang-REGION-` prefix falls back to [`DEFAULT_LANGUAGE`].
pub fn locale_from_voice(voice: &str) -> String {
    let mut parts = voice.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lang), Some(region), Some(_))
            if (2..=3).contains(&lang.len())
                && lang.chars().all(|c| c.is_ascii_alphabetic())
                && !region.is_empty() =>
        {
            format!("{lang}-{region}")
        }
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

/// Build the SSML document for one synthesis request.
pub fn build_ssml(text: &str, voice: &str, prosody: &Prosody) -> String {
    let escaped_text = escape_xml(text);

    let body = if prosody.is_empty() {
        escaped_text
    } else {
        let attrs: String = prosody
            .attributes()
            .map(|(name, value)| format!(" {name}=\"{}\"", escape_xml(value)))
            .collect();
        format!("<prosody{attrs}>{escaped_text}</prosody>")
    };

    format!(
        "<speak version=\"1.0\" xmlns=\"{SSML_NAMESPACE}\" xml:lang=\"{}\"><voice name=\"{}\">{body}</voice></speak>",
        locale_from_voice(voice),
        escape_xml(voice),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_has_no_prosody() {
        let ssml = build_ssml("こんにちは", "ja-JP-NanamiNeural", &Prosody::default());
        assert!(ssml.starts_with("<speak version=\"1.0\""));
        assert!(ssml.contains("xml:lang=\"ja-JP\""));
        assert!(ssml.contains("<voice name=\"ja-JP-NanamiNeural\">こんにちは</voice>"));
        assert!(!ssml.contains("<prosody"));
    }

    #[test]
    fn test_prosody_attributes_in_order() {
        let prosody = Prosody {
            rate: Some("1.5".to_string()),
            pitch: Some("+50Hz".to_string()),
            volume: Some("loud".to_string()),
        };
        let ssml = build_ssml("hi", "ja-JP-KeitaNeural", &prosody);
        assert!(ssml.contains("<prosody rate=\"1.5\" pitch=\"+50Hz\" volume=\"loud\">hi</prosody>"));
    }

    #[test]
    fn test_only_set_prosody_attributes_appear() {
        let prosody = Prosody {
            pitch: Some("low".to_string()),
            volume: Some("   ".to_string()),
            ..Default::default()
        };
        let ssml = build_ssml("hi", "en-US-JennyNeural", &prosody);
        assert!(ssml.contains("<prosody pitch=\"low\">"));
        assert!(!ssml.contains("rate="));
        assert!(!ssml.contains("volume="));
    }

    #[test]
    fn test_blank_prosody_is_empty() {
        let prosody = Prosody {
            rate: Some(String::new()),
            ..Default::default()
        };
        assert!(prosody.is_empty());
    }

    #[test]
    fn test_text_is_escaped() {
        let ssml = build_ssml(
            "Tom & Jerry <3 \"cats\" 'dogs'",
            "en-US-JennyNeural",
            &Prosody::default(),
        );
        assert!(ssml.contains("Tom &amp; Jerry &lt;3 &quot;cats&quot; &apos;dogs&apos;"));
    }

    #[test]
    fn test_locale_from_voice() {
        assert_eq!(locale_from_voice("ja-JP-NanamiNeural"), "ja-JP");
        assert_eq!(locale_from_voice("en-US-JennyNeural"), "en-US");
        assert_eq!(locale_from_voice("zh-CN-shaanxi-XiaoniNeural"), "zh-CN");
        assert_eq!(locale_from_voice("NanamiNeural"), DEFAULT_LANGUAGE);
        assert_eq!(locale_from_voice("my-custom"), DEFAULT_LANGUAGE);
    }
}
