//! nlpkit Translate - English <-> Indian language translation
//!
//! Provides:
//! - `GoogleTranslateClient`: `Translator` over the public translate endpoint
//! - `TranslationService`: paced single, batch, document and announcement
//!   translation with structured outcomes
//! - `MenuSession`: the interactive menu as a line-driven state machine
//!
//! Author: hephaex@gmail.com

pub mod google;
pub mod languages;
pub mod menu;
pub mod report;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use google::GoogleTranslateClient;
pub use languages::{
    detected_language_name, is_indian, is_supported, language_name, LanguagePair,
    SourceLanguage, ENGLISH, INDIAN_LANGUAGES, PROVIDER_LANGUAGES,
};
pub use menu::{run_command, MenuCommand, MenuOutput, MenuSession, MenuState};
pub use report::run_demo;
pub use service::{
    AnnouncementEntry, BidirectionalResult, DetectionOutcome, Direction, TranslationOutcome,
    TranslationService,
};

#[cfg(any(test, feature = "test-utils"))]
pub use testing::{ScriptedCall, ScriptedTranslator};

use std::sync::Arc;

use nlpkit_core::{TranslationConfig, Translator};

/// Create the network translation provider from config
pub fn create_translator(config: &TranslationConfig) -> Arc<dyn Translator> {
    Arc::new(GoogleTranslateClient::from_config(config))
}
