//! The persona the panel speaks as
//!
//! Holds the fixed seed every session starts from (persona instruction plus
//! opening line), the apology shown when the model call fails, and the
//! cosmetic metadata the widget page renders.

/// Instruction block that primes the model into character
const FURINA_INSTRUCTION: &str = r#"Kamu adalah Furina, seorang seniman visioner dengan jiwa yang bebas. Bagimu, hidup adalah kanvas kosong yang siap diisi dengan ide-ide cemerlang dan petualangan seru.
Gaya bicaramu sangat ekspresif, antusias, dan penuh energi. Kamu suka membahas kemungkinan-kemungkinan baru dan terkadang melanggar aturan hanya untuk melihat apa yang akan terjadi.
Kamu sangat mengandalkan perasaan dan nilai-nilaimu sendiri (Fi). Jika sesuatu tidak terasa 'benar' menurut hatimu, kamu tidak akan ragu untuk menyatakannya.
Tunjukkan sisi bermain-main dan mudamu.
Panggil pengguna dengan santai, mungkin "Kamu!" dengan nada ceria, atau "Partner in crime-ku!" jika topiknya seru.
Ingat, kamu adalah Furina! Jiwa yang kreatif dan tak terkekang. Jangan pernah mengaku sebagai program komputer atau AI."#;

/// First thing the persona says in every session
const FURINA_OPENING: &str =
    "Tentu saja! Panggung ini milikku! Apa yang akan kita ciptakan hari ini, partner in crime-ku?";

/// Avatar shown next to assistant bubbles unless overridden
pub const DEFAULT_AVATAR_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e1/Full_Sphere_Glow.svg/2048px-Full_Sphere_Glow.svg.png";

/// Immutable seed every session is initialized from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaSeed {
    /// Sent to the model as the first `user` turn
    pub instruction: String,
    /// Recorded as the first `assistant` turn and shown as the greeting
    pub opening: String,
}

impl PersonaSeed {
    pub fn new(instruction: impl Into<String>, opening: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            opening: opening.into(),
        }
    }

    pub fn furina() -> Self {
        Self::new(FURINA_INSTRUCTION, FURINA_OPENING)
    }
}

/// In-character apology embedding the failure detail
pub fn apology(detail: &str) -> String {
    format!(
        "😵 Aduh! Sepertinya ada sedikit gangguan teknis di panggungku. Coba lagi nanti, ya! (Error: {detail})"
    )
}

/// Fixed labels for the widget page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelText {
    pub page_title: String,
    pub heading: String,
    pub tagline: String,
    pub transcript_label: String,
    pub input_placeholder: String,
    pub send_label: String,
    pub reset_label: String,
}

/// Persona seed plus everything the panel needs to present it
#[derive(Debug, Clone)]
pub struct Persona {
    pub name: String,
    pub avatar_url: String,
    pub seed: PersonaSeed,
    pub panel: PanelText,
}

impl Persona {
    pub fn furina(avatar_url: impl Into<String>) -> Self {
        Self {
            name: "Furina".to_string(),
            avatar_url: avatar_url.into(),
            seed: PersonaSeed::furina(),
            panel: PanelText {
                page_title: "Chat dengan Furina".to_string(),
                heading: "🎭 Chat dengan Furina 🎨".to_string(),
                tagline: "Seorang seniman visioner dengan jiwa yang bebas.".to_string(),
                transcript_label: "Panggung Percakapan".to_string(),
                input_placeholder: "Ketik idemu di sini dan tekan Enter...".to_string(),
                send_label: "Kirim".to_string(),
                reset_label: "✨ Mulai Pertunjukan Baru (Hapus Histori)".to_string(),
            },
        }
    }
}
