//! Console rendering of translation results and the demo walkthrough

use crate::languages::{capitalize, sorted_indian_languages};
use crate::service::{AnnouncementEntry, DetectionOutcome, TranslationOutcome, TranslationService};

pub const RULE_WIDTH: usize = 70;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn banner(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(rule());
    lines.push(title.to_string());
    lines.push(rule());
}

/// Table of the supported Indian languages, sorted by name
pub fn languages_table() -> Vec<String> {
    let mut lines = Vec::new();
    banner(&mut lines, "SUPPORTED INDIAN LANGUAGES");
    lines.push(String::new());
    lines.push(format!("{:<20} {:<10}", "Language", "Code"));
    lines.push("-".repeat(RULE_WIDTH));
    for (name, code) in sorted_indian_languages() {
        lines.push(format!("{:<20} {:<10}", capitalize(name), code));
    }
    lines.push(rule());
    lines
}

/// Numbered language list shown before choosing a target
pub fn numbered_languages() -> Vec<String> {
    let mut lines = vec![String::new(), "Available languages:".to_string()];
    for (i, (name, code)) in sorted_indian_languages().into_iter().enumerate() {
        lines.push(format!("{}. {} ({code})", i + 1, capitalize(name)));
    }
    lines
}

pub fn render_translation(outcome: &TranslationOutcome, source_label: &str, target_label: &str) -> Vec<String> {
    match outcome {
        TranslationOutcome::Success { original, translation } => vec![
            format!("{source_label}: {original}"),
            format!("{target_label}: {}", translation.text),
        ],
        TranslationOutcome::Failure { error, .. } => {
            vec![format!("Translation failed: {error}")]
        }
    }
}

pub fn render_detection(text: &str, outcome: &DetectionOutcome) -> Vec<String> {
    match outcome {
        DetectionOutcome::Success {
            code,
            name,
            confidence,
        } => vec![
            format!("Text: {text}"),
            format!("Detected Language: {name} ({code})"),
            format!("Confidence: {confidence:.2}"),
        ],
        DetectionOutcome::Failure { error } => vec![format!("Detection failed: {error}")],
    }
}

pub fn render_announcement(announcement: &str, entries: &[AnnouncementEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    banner(&mut lines, "PUBLIC ANNOUNCEMENT TRANSLATION");
    lines.push(String::new());
    lines.push("Original Announcement (English):".to_string());
    lines.push(announcement.to_string());
    lines.push(String::new());
    lines.push(rule());

    for entry in entries {
        lines.push(String::new());
        match &entry.outcome {
            TranslationOutcome::Success { translation, .. } => {
                lines.push(format!("{} ({}):", entry.name, entry.code));
                lines.push(translation.text.clone());
            }
            TranslationOutcome::Failure { error, .. } => lines.push(format!(
                "{} ({}): Translation failed - {error}",
                entry.name, entry.code
            )),
        }
    }
    lines
}

pub fn render_document(source: &str, target: &str, outcomes: &[TranslationOutcome]) -> Vec<String> {
    let mut lines = Vec::new();
    banner(
        &mut lines,
        &format!(
            "DOCUMENT TRANSLATION: {} -> {}",
            source.to_uppercase(),
            target.to_uppercase()
        ),
    );

    for (i, outcome) in outcomes.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("--- Paragraph {} ---", i + 1));
        lines.push(format!("Original: {}", outcome.original()));
        match outcome {
            TranslationOutcome::Success { translation, .. } => {
                lines.push(format!("Translated: {}", translation.text))
            }
            TranslationOutcome::Failure { error, .. } => lines.push(format!("Error: {error}")),
        }
    }
    lines
}

// ============================================================================
// Demo
// ============================================================================

const DEMO_NOTICE: [&str; 3] = [
    "Government of India - Public Health Advisory",
    "Please maintain social distancing and wear masks in public places.",
    "For more information, visit our website or call the helpline.",
];

const DEMO_DETECTION: [&str; 4] = [
    "This is an English sentence.",
    "यह एक हिंदी वाक्य है।",
    "இது ஒரு தமிழ் வாக்கியம்.",
    "এটি একটি বাংলা বাক্য।",
];

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

/// Seven worked examples: single translations both ways, announcements,
/// a document, and detection
pub async fn run_demo(service: &TranslationService) -> Vec<String> {
    let mut lines = Vec::new();
    banner(&mut lines, "DEMO EXAMPLES - MACHINE TRANSLATION SYSTEM");

    lines.push(String::new());
    lines.push("--- Example 1: English to Hindi ---".to_string());
    let outcome = service
        .translate_text("Hello, welcome to our public information system.", "en", "hi")
        .await;
    lines.extend(render_translation(&outcome, "English", "Hindi"));

    lines.push(String::new());
    lines.push("--- Example 2: Hindi to English ---".to_string());
    let outcome = service.translate_text("नमस्ते, आपका स्वागत है।", "hi", "en").await;
    lines.extend(render_translation(&outcome, "Hindi", "English"));

    lines.push(String::new());
    lines.push("--- Example 3: Public Announcement ---".to_string());
    let announcement = "Important Notice: All citizens are requested to follow safety guidelines.";
    let entries = service
        .translate_announcement(announcement, &codes(&["hi", "ta", "te", "bn"]))
        .await;
    lines.extend(render_announcement(announcement, &entries));

    lines.push(String::new());
    lines.push("--- Example 4: Government Notice Translation ---".to_string());
    let notice = codes(&DEMO_NOTICE);
    let outcomes = service.translate_document(&notice, "en", "mr").await;
    lines.extend(render_document("en", "mr", &outcomes));

    lines.push(String::new());
    lines.push("--- Example 5: Language Detection ---".to_string());
    for text in DEMO_DETECTION {
        let outcome = service.detect_language(text).await;
        if matches!(outcome, DetectionOutcome::Success { .. }) {
            lines.push(String::new());
            lines.extend(render_detection(text, &outcome));
        }
    }

    lines.push(String::new());
    lines.push("--- Example 6: Educational Content (English to Gujarati) ---".to_string());
    let outcome = service
        .translate_text(
            "Education is the most powerful weapon which you can use to change the world.",
            "en",
            "gu",
        )
        .await;
    lines.extend(render_translation(&outcome, "English", "Gujarati"));

    lines.push(String::new());
    lines.push("--- Example 7: Emergency Alert (Multiple Languages) ---".to_string());
    let emergency = "Emergency Alert: Heavy rainfall expected. Stay indoors and stay safe.";
    let entries = service
        .translate_announcement(emergency, &codes(&["hi", "te", "kn"]))
        .await;
    lines.extend(render_announcement(emergency, &entries));

    lines
}
