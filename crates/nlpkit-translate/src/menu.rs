//! Interactive translation menu
//!
//! `MenuSession` is a state machine fed one input line at a time. Each step
//! returns the lines to print, the prompt for the next line, and at most one
//! `MenuCommand` to execute. The console loop lives in the binary; the
//! session itself never reads or writes a terminal.
//!
//! Invalid input in a sub-step prints a message and returns to the main menu.
//!
//! Author: hephaex@gmail.com

use serde::{Deserialize, Serialize};

use crate::languages::{is_indian, is_supported, SourceLanguage, ENGLISH};
use crate::report::{
    languages_table, numbered_languages, render_announcement, render_detection, render_document,
    render_translation, rule, run_demo,
};
use crate::service::{TranslationOutcome, TranslationService};

pub const MAIN_PROMPT: &str = "Enter your choice (1-8): ";
pub const DOCUMENT_END: &str = "END";

/// Work requested by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCommand {
    EnglishToIndian {
        text: String,
        target: String,
    },
    IndianToEnglish {
        text: String,
        source: SourceLanguage,
    },
    Announcement {
        text: String,
        targets: Vec<String>,
    },
    Document {
        paragraphs: Vec<String>,
        source: SourceLanguage,
        target: String,
    },
    Detect {
        text: String,
    },
    ListLanguages,
    Demo,
}

/// What to show after one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOutput {
    pub lines: Vec<String>,
    pub command: Option<MenuCommand>,
    pub prompt: String,
    pub exit: bool,
}

/// Where the session waits for input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Main,
    EnglishText,
    EnglishTarget { text: String },
    IndianText,
    AutoDetect { text: String },
    IndianSource { text: String },
    AnnouncementText,
    AnnouncementTargets { text: String },
    DocumentLines { paragraphs: Vec<String> },
    DocumentSource { paragraphs: Vec<String> },
    DocumentTarget { paragraphs: Vec<String>, source: SourceLanguage },
    DetectText,
    Finished,
}

impl MenuState {
    fn prompt(&self) -> &'static str {
        match self {
            Self::Main => MAIN_PROMPT,
            Self::EnglishText => "Enter English text: ",
            Self::EnglishTarget { .. } => "Enter language code (e.g., 'hi' for Hindi): ",
            Self::IndianText => "Enter text in Indian language: ",
            Self::AutoDetect { .. } => "Auto-detect language? (y/n): ",
            Self::IndianSource { .. } => "Enter source language code: ",
            Self::AnnouncementText => "Enter public announcement (English): ",
            Self::AnnouncementTargets { .. } => "Enter language codes: ",
            Self::DocumentLines { .. } => "",
            Self::DocumentSource { .. } => "Source language code (or 'auto'): ",
            Self::DocumentTarget { .. } => "Target language code: ",
            Self::DetectText => "Enter text: ",
            Self::Finished => "",
        }
    }
}

/// Line-driven menu session
#[derive(Debug, Clone)]
pub struct MenuSession {
    state: MenuState,
}

impl Default for MenuSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuSession {
    pub fn new() -> Self {
        Self {
            state: MenuState::Main,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == MenuState::Finished
    }

    pub fn prompt(&self) -> &'static str {
        self.state.prompt()
    }

    /// The main menu, shown whenever the session is back at `Main`
    pub fn menu_lines() -> Vec<String> {
        vec![
            String::new(),
            rule(),
            "MACHINE TRANSLATION SYSTEM - ENGLISH <-> INDIAN LANGUAGES".to_string(),
            rule(),
            String::new(),
            "Options:".to_string(),
            "1. Translate English to Indian Language".to_string(),
            "2. Translate Indian Language to English".to_string(),
            "3. Translate Public Announcement (Multiple Languages)".to_string(),
            "4. Translate Document/Multiple Paragraphs".to_string(),
            "5. Detect Language".to_string(),
            "6. View Supported Indian Languages".to_string(),
            "7. Run Demo Examples".to_string(),
            "8. Exit".to_string(),
            rule(),
        ]
    }

    fn emit(&mut self, next: MenuState, lines: Vec<String>, command: Option<MenuCommand>) -> MenuOutput {
        self.state = next;
        MenuOutput {
            lines,
            command,
            prompt: self.state.prompt().to_string(),
            exit: self.state == MenuState::Finished,
        }
    }

    fn reject(&mut self, message: &str) -> MenuOutput {
        self.emit(MenuState::Main, vec![message.to_string()], None)
    }

    /// Consume one input line
    pub fn handle(&mut self, input: &str) -> MenuOutput {
        let line = input.trim();
        let state = std::mem::replace(&mut self.state, MenuState::Main);

        match state {
            MenuState::Main => match line {
                "1" => self.emit(MenuState::EnglishText, vec![], None),
                "2" => self.emit(MenuState::IndianText, vec![], None),
                "3" => self.emit(MenuState::AnnouncementText, vec![], None),
                "4" => self.emit(
                    MenuState::DocumentLines { paragraphs: vec![] },
                    vec![format!(
                        "Enter document content (enter '{DOCUMENT_END}' on a new line to finish):"
                    )],
                    None,
                ),
                "5" => self.emit(MenuState::DetectText, vec![], None),
                "6" => self.emit(MenuState::Main, vec![], Some(MenuCommand::ListLanguages)),
                "7" => self.emit(MenuState::Main, vec![], Some(MenuCommand::Demo)),
                "8" => self.emit(
                    MenuState::Finished,
                    vec!["Thank you for using the Machine Translation System!".to_string()],
                    None,
                ),
                _ => self.reject("Invalid choice! Please select 1-8."),
            },

            MenuState::EnglishText => {
                if line.is_empty() {
                    return self.reject("Please enter valid text.");
                }
                self.emit(
                    MenuState::EnglishTarget {
                        text: line.to_string(),
                    },
                    numbered_languages(),
                    None,
                )
            }
            MenuState::EnglishTarget { text } => {
                let target = line.to_lowercase();
                if !is_indian(&target) {
                    return self.reject("Invalid language code!");
                }
                self.emit(
                    MenuState::Main,
                    vec![],
                    Some(MenuCommand::EnglishToIndian { text, target }),
                )
            }

            MenuState::IndianText => {
                if line.is_empty() {
                    return self.reject("Please enter valid text.");
                }
                self.emit(
                    MenuState::AutoDetect {
                        text: line.to_string(),
                    },
                    vec![],
                    None,
                )
            }
            MenuState::AutoDetect { text } => {
                if line.eq_ignore_ascii_case("y") {
                    self.emit(
                        MenuState::Main,
                        vec![],
                        Some(MenuCommand::IndianToEnglish {
                            text,
                            source: SourceLanguage::Auto,
                        }),
                    )
                } else {
                    self.emit(MenuState::IndianSource { text }, vec![], None)
                }
            }
            MenuState::IndianSource { text } => match SourceLanguage::parse(line) {
                Ok(source) => self.emit(
                    MenuState::Main,
                    vec![],
                    Some(MenuCommand::IndianToEnglish { text, source }),
                ),
                Err(_) => self.reject("Invalid language code!"),
            },

            MenuState::AnnouncementText => {
                if line.is_empty() {
                    return self.reject("Please enter valid text.");
                }
                let mut lines = vec![
                    String::new(),
                    "Select target languages (comma-separated codes, e.g., 'hi,ta,te'):"
                        .to_string(),
                ];
                lines.extend(languages_table());
                self.emit(
                    MenuState::AnnouncementTargets {
                        text: line.to_string(),
                    },
                    lines,
                    None,
                )
            }
            MenuState::AnnouncementTargets { text } => {
                let lowered = line.to_lowercase();
                let targets: Vec<String> = lowered
                    .split(',')
                    .map(str::trim)
                    .filter(|code| is_indian(code))
                    .map(str::to_string)
                    .collect();
                if targets.is_empty() {
                    return self.reject("No valid language codes provided!");
                }
                self.emit(
                    MenuState::Main,
                    vec![],
                    Some(MenuCommand::Announcement { text, targets }),
                )
            }

            MenuState::DocumentLines { mut paragraphs } => {
                if line.eq_ignore_ascii_case(DOCUMENT_END) {
                    if paragraphs.is_empty() {
                        return self.reject("No content provided!");
                    }
                    return self.emit(MenuState::DocumentSource { paragraphs }, vec![], None);
                }
                if !line.is_empty() {
                    paragraphs.push(line.to_string());
                }
                self.emit(MenuState::DocumentLines { paragraphs }, vec![], None)
            }
            MenuState::DocumentSource { paragraphs } => match SourceLanguage::parse_supported(line) {
                Ok(source) => self.emit(MenuState::DocumentTarget { paragraphs, source }, vec![], None),
                Err(_) => self.reject("Invalid source language!"),
            },
            MenuState::DocumentTarget { paragraphs, source } => {
                let target = line.to_lowercase();
                if !is_supported(&target) {
                    return self.reject("Invalid target language!");
                }
                self.emit(
                    MenuState::Main,
                    vec![],
                    Some(MenuCommand::Document {
                        paragraphs,
                        source,
                        target,
                    }),
                )
            }

            MenuState::DetectText => {
                if line.is_empty() {
                    return self.reject("Please enter valid text.");
                }
                self.emit(
                    MenuState::Main,
                    vec![],
                    Some(MenuCommand::Detect {
                        text: line.to_string(),
                    }),
                )
            }

            MenuState::Finished => self.emit(MenuState::Finished, vec![], None),
        }
    }
}

/// Execute a command and render its result
pub async fn run_command(service: &TranslationService, command: &MenuCommand) -> Vec<String> {
    match command {
        MenuCommand::EnglishToIndian { text, target } => {
            let outcome = service.translate_text(text, ENGLISH, target).await;
            let mut lines = vec![String::new()];
            lines.extend(render_translation(&outcome, "Original (English)", "Translated"));
            lines
        }
        MenuCommand::IndianToEnglish { text, source } => {
            let outcome = service.translate_text(text, source.as_str(), ENGLISH).await;
            let mut lines = vec![String::new()];
            match &outcome {
                TranslationOutcome::Success {
                    original,
                    translation,
                } => {
                    lines.push(format!("Original: {original}"));
                    lines.push(format!("Detected/Source Language: {}", translation.source));
                    lines.push(format!("Translated (English): {}", translation.text));
                }
                TranslationOutcome::Failure { error, .. } => {
                    lines.push(format!("Translation failed: {error}"));
                }
            }
            lines
        }
        MenuCommand::Announcement { text, targets } => {
            let entries = service.translate_announcement(text, targets).await;
            render_announcement(text, &entries)
        }
        MenuCommand::Document {
            paragraphs,
            source,
            target,
        } => {
            let outcomes = service
                .translate_document(paragraphs, source.as_str(), target)
                .await;
            render_document(source.as_str(), target, &outcomes)
        }
        MenuCommand::Detect { text } => {
            let outcome = service.detect_language(text).await;
            let mut lines = vec![String::new()];
            lines.extend(render_detection(text, &outcome));
            lines
        }
        MenuCommand::ListLanguages => languages_table(),
        MenuCommand::Demo => run_demo(service).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(session: &mut MenuSession, inputs: &[&str]) -> MenuOutput {
        let mut last = None;
        for input in inputs {
            last = Some(session.handle(input));
        }
        last.unwrap()
    }

    #[test]
    fn test_english_to_indian_flow() {
        let mut session = MenuSession::new();
        let output = session.handle("1");
        assert_eq!(output.prompt, "Enter English text: ");

        let output = session.handle("Good morning");
        assert!(output.lines.iter().any(|l| l == "4. Hindi (hi)"));

        let output = session.handle("TA");
        assert_eq!(
            output.command,
            Some(MenuCommand::EnglishToIndian {
                text: "Good morning".to_string(),
                target: "ta".to_string(),
            })
        );
        assert_eq!(session.state(), &MenuState::Main);
        assert_eq!(output.prompt, MAIN_PROMPT);
    }

    #[test]
    fn test_invalid_inputs_return_to_main() {
        let mut session = MenuSession::new();
        let output = session.handle("9");
        assert_eq!(output.lines, vec!["Invalid choice! Please select 1-8."]);
        assert_eq!(output.prompt, MAIN_PROMPT);

        let output = feed(&mut session, &["1", "   "]);
        assert_eq!(output.lines, vec!["Please enter valid text."]);

        let output = feed(&mut session, &["1", "hello", "fr"]);
        assert_eq!(output.lines, vec!["Invalid language code!"]);
        assert!(output.command.is_none());
        assert_eq!(session.state(), &MenuState::Main);
    }

    #[test]
    fn test_indian_to_english_sources() {
        let mut session = MenuSession::new();
        let output = feed(&mut session, &["2", "नमस्ते", "y"]);
        assert_eq!(
            output.command,
            Some(MenuCommand::IndianToEnglish {
                text: "नमस्ते".to_string(),
                source: SourceLanguage::Auto,
            })
        );

        let output = feed(&mut session, &["2", "नमस्ते", "n", "HI"]);
        assert_eq!(
            output.command,
            Some(MenuCommand::IndianToEnglish {
                text: "नमस्ते".to_string(),
                source: SourceLanguage::Code("hi".to_string()),
            })
        );
    }

    #[test]
    fn test_announcement_keeps_valid_codes() {
        let mut session = MenuSession::new();
        let output = feed(&mut session, &["3", "Stay safe", "hi, xx ,TA"]);
        assert_eq!(
            output.command,
            Some(MenuCommand::Announcement {
                text: "Stay safe".to_string(),
                targets: vec!["hi".to_string(), "ta".to_string()],
            })
        );

        let output = feed(&mut session, &["3", "Stay safe", "xx"]);
        assert_eq!(output.lines, vec!["No valid language codes provided!"]);
    }

    #[test]
    fn test_document_collects_lines_until_end() {
        let mut session = MenuSession::new();
        let output = feed(
            &mut session,
            &["4", "First paragraph.", "", "Second paragraph.", "end", "auto", "mr"],
        );
        assert_eq!(
            output.command,
            Some(MenuCommand::Document {
                paragraphs: vec!["First paragraph.".to_string(), "Second paragraph.".to_string()],
                source: SourceLanguage::Auto,
                target: "mr".to_string(),
            })
        );

        let output = feed(&mut session, &["4", "END"]);
        assert_eq!(output.lines, vec!["No content provided!"]);

        let output = feed(&mut session, &["4", "text", "END", "de"]);
        assert_eq!(output.lines, vec!["Invalid source language!"]);

        let output = feed(&mut session, &["4", "text", "END", "en", "fr"]);
        assert_eq!(output.lines, vec!["Invalid target language!"]);
    }

    #[test]
    fn test_simple_options_and_exit() {
        let mut session = MenuSession::new();
        assert_eq!(
            feed(&mut session, &["5", "hello"]).command,
            Some(MenuCommand::Detect {
                text: "hello".to_string()
            })
        );
        assert_eq!(session.handle("6").command, Some(MenuCommand::ListLanguages));
        assert_eq!(session.handle("7").command, Some(MenuCommand::Demo));

        let output = session.handle("8");
        assert!(output.exit);
        assert!(session.is_finished());
        assert!(session.handle("1").exit);
    }

    #[test]
    fn test_menu_lists_eight_options() {
        let lines = MenuSession::menu_lines();
        for option in 1..=8 {
            assert!(lines.iter().any(|l| l.starts_with(&format!("{option}. "))));
        }
    }
}
