//! Voice catalogue returned by `GET /cognitiveservices/voices/list`.

use serde::{Deserialize, Serialize};

/// One entry of the Azure voice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voice {
    /// Full name, e.g. "Microsoft Server Speech Text to Speech Voice (ja-JP, NanamiNeural)"
    pub name: String,
    /// Display name, e.g. "Nanami"
    pub display_name: String,
    /// Name in the voice's own language, e.g. "七海"
    #[serde(default)]
    pub local_name: String,
    /// Short name used as the voice id, e.g. "ja-JP-NanamiNeural"
    pub short_name: String,
    /// "Female", "Male" or "Neutral"
    pub gender: String,
    /// Locale code, e.g. "ja-JP"
    pub locale: String,
    /// e.g. "Neural"
    #[serde(default)]
    pub voice_type: String,
    /// Speaking styles usable with `mstts:express-as`
    #[serde(default)]
    pub style_list: Vec<String>,
    /// Native sample rate; the service sends it as a string
    #[serde(default)]
    pub sample_rate_hertz: Option<String>,
}

impl Voice {
    /// Whether this voice belongs to `locale`. Matching ignores case and
    /// accepts either the full locale (`ja-JP`) or just the language (`ja`).
    pub fn matches_locale(&self, locale: &str) -> bool {
        let wanted = locale.trim();
        if wanted.is_empty() {
            return true;
        }
        if self.locale.eq_ignore_ascii_case(wanted) {
            return true;
        }
        !wanted.contains('-')
            && self
                .locale
                .split('-')
                .next()
                .is_some_and(|lang| lang.eq_ignore_ascii_case(wanted))
    }
}

/// Keep only the voices for `locale`.
pub fn voices_for_locale(voices: &[Voice], locale: &str) -> Vec<Voice> {
    voices
        .iter()
        .filter(|voice| voice.matches_locale(locale))
        .cloned()
        .collect()
}
