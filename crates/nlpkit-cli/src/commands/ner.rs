//! `nlpkit ner`: train the recognizer on the built-in samples, evaluate, predict

use clap::Args;
use nlpkit_core::AppConfig;
use nlpkit_extractor::samples::{test_examples, training_examples, PREDICTION_SENTENCES};
use nlpkit_extractor::{predict_entities, Evaluator, ScoringMode, Trainer, TrainingConfig};

#[derive(Args)]
pub struct NerArgs {
    /// Training passes (default: from configuration)
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for reproducible training
    #[arg(long)]
    seed: Option<u64>,

    /// Scoring mode: span-label or exact
    #[arg(long, default_value = "span-label")]
    mode: ScoringMode,

    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,

    /// Sentences to tag (default: three sample sentences)
    texts: Vec<String>,
}

pub fn run(config: &AppConfig, args: NerArgs) -> anyhow::Result<()> {
    let mut training = TrainingConfig::from(&config.ner);
    if let Some(iterations) = args.iterations {
        training = training.with_iterations(iterations);
    }
    if let Some(seed) = args.seed {
        training = training.with_seed(seed);
    }

    println!("Training NER model...");
    let (model, report) = Trainer::new(training).train(&training_examples()?)?;
    if let Some(loss) = report.final_loss() {
        println!(
            "Trained for {} iterations, final loss {loss:.4}",
            report.iterations()
        );
    }

    println!("\nEvaluating model...");
    let result = Evaluator::new(args.mode).evaluate(&model, &test_examples()?)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.summary());
        println!("\nDetailed Classification Report:");
        println!("{}", result.report.render());
    }

    println!("Predictions on new text:");
    let texts: Vec<String> = if args.texts.is_empty() {
        PREDICTION_SENTENCES.iter().map(|s| s.to_string()).collect()
    } else {
        args.texts
    };
    for text in &texts {
        println!("\nText: {text}");
        println!("Entities: {:?}", predict_entities(&model, text)?);
    }
    Ok(())
}
