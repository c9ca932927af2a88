//! `nlpkit translate`: the translation menu and one-shot translation commands

use std::sync::Arc;

use clap::{Args, Subcommand};
use nlpkit_core::{AppConfig, Translator};
use nlpkit_translate::report::{languages_table, render_detection, rule};
use nlpkit_translate::{
    create_translator, run_command, run_demo, LanguagePair, MenuSession, MenuState,
    ScriptedTranslator, SourceLanguage, TranslationOutcome, TranslationService, INDIAN_LANGUAGES,
};

use super::prompt_line;

#[derive(Args)]
pub struct TranslateArgs {
    /// Use the offline scripted provider instead of the network
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    action: Option<TranslateAction>,
}

#[derive(Subcommand)]
enum TranslateAction {
    /// Interactive menu (default)
    Menu,
    /// Run the worked examples
    Demo,
    /// Translate one text
    Text {
        text: String,
        /// Source language code or `auto`
        #[arg(long, default_value = "auto")]
        from: String,
        /// Target language code
        #[arg(long, default_value = "hi")]
        to: String,
    },
    /// Detect the language of a text
    Detect { text: String },
    /// English goes to the Indian language, anything else to English
    Bidirectional {
        text: String,
        #[arg(long, default_value = "hi")]
        language: String,
    },
    /// List the supported Indian languages
    Languages,
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn print_outcome(outcome: &TranslationOutcome) {
    match outcome {
        TranslationOutcome::Success {
            original,
            translation,
        } => {
            println!("Original ({}): {original}", translation.source);
            println!("Translated ({}): {}", translation.target, translation.text);
            if let Some(pronunciation) = &translation.pronunciation {
                println!("Pronunciation: {pronunciation}");
            }
        }
        TranslationOutcome::Failure { error, .. } => println!("Translation failed: {error}"),
    }
}

async fn interactive(service: &TranslationService) -> anyhow::Result<()> {
    println!("\n{}", rule());
    println!("MACHINE TRANSLATION SYSTEM");
    println!("English <-> Indian Languages");
    println!("{}", rule());
    let names: Vec<String> = INDIAN_LANGUAGES
        .iter()
        .map(|(_, code)| nlpkit_translate::language_name(code).unwrap_or_default())
        .collect();
    println!("\nSupported Indian Languages:");
    println!("{}", names.join(", "));

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut session = MenuSession::new();
    loop {
        if session.state() == &MenuState::Main {
            print_lines(&MenuSession::menu_lines());
        }
        let Some(line) = prompt_line(&mut input, session.prompt())? else {
            break;
        };
        let output = session.handle(&line);
        print_lines(&output.lines);
        if let Some(command) = &output.command {
            print_lines(&run_command(service, command).await);
        }
        if output.exit {
            break;
        }
    }
    Ok(())
}

pub async fn run(config: &AppConfig, args: TranslateArgs) -> anyhow::Result<()> {
    let translator: Arc<dyn Translator> = if args.offline {
        Arc::new(ScriptedTranslator::new())
    } else {
        create_translator(&config.translation)
    };
    let service = TranslationService::from_config(translator, &config.translation);
    tracing::debug!(provider = service.provider(), "Translation service ready");

    match args.action.unwrap_or(TranslateAction::Menu) {
        TranslateAction::Menu => interactive(&service).await?,
        TranslateAction::Demo => print_lines(&run_demo(&service).await),
        TranslateAction::Text { text, from, to } => {
            let pair = LanguagePair::new(SourceLanguage::parse(&from)?, &to)?;
            let outcome = service
                .translate_text(&text, pair.source.as_str(), &pair.target)
                .await;
            print_outcome(&outcome);
        }
        TranslateAction::Detect { text } => {
            print_lines(&render_detection(&text, &service.detect_language(&text).await));
        }
        TranslateAction::Bidirectional { text, language } => {
            let pair = LanguagePair::english_to(&language)?;
            let result = service.bidirectional(&text, &pair.target).await?;
            println!("Direction: {}", result.direction);
            print_outcome(&result.outcome);
        }
        TranslateAction::Languages => print_lines(&languages_table()),
    }
    Ok(())
}
