//! Built-in demonstration data
//!
//! Offsets are derived from the entity surface text when the examples are
//! built, so every span lines up with its text.

use nlpkit_core::Result;

use crate::AnnotatedText;

type Sample = (&'static str, &'static [(&'static str, &'static str)]);

const TRAINING: &[Sample] = &[
    (
        "Apple Inc. is looking at buying U.K. startup for $1 billion",
        &[("Apple Inc.", "ORG"), ("U.K.", "GPE"), ("$1 billion", "MONEY")],
    ),
    (
        "Elon Musk founded SpaceX in California in 2002",
        &[
            ("Elon Musk", "PERSON"),
            ("SpaceX", "ORG"),
            ("California", "GPE"),
            ("2002", "DATE"),
        ],
    ),
    (
        "Google announced new AI products in San Francisco yesterday",
        &[("Google", "ORG"), ("San Francisco", "GPE"), ("yesterday", "DATE")],
    ),
    (
        "Microsoft CEO Satya Nadella spoke at the conference",
        &[("Microsoft", "ORG"), ("Satya Nadella", "PERSON")],
    ),
    (
        "The meeting is scheduled for Monday at 3 PM in New York",
        &[("Monday", "DATE"), ("3 PM", "TIME"), ("New York", "GPE")],
    ),
];

const TEST: &[Sample] = &[
    (
        "Amazon acquired Whole Foods for $13.7 billion in 2017",
        &[
            ("Amazon", "ORG"),
            ("Whole Foods", "ORG"),
            ("$13.7 billion", "MONEY"),
            ("2017", "DATE"),
        ],
    ),
    (
        "Jeff Bezos visited Seattle last week",
        &[("Jeff Bezos", "PERSON"), ("Seattle", "GPE"), ("last week", "DATE")],
    ),
];

/// Unannotated sentences for the prediction demo
pub const PREDICTION_SENTENCES: [&str; 3] = [
    "Tesla CEO Elon Musk announced new products in Texas",
    "The conference in London starts on Friday at 10 AM",
    "Facebook changed its name to Meta in October 2021",
];

fn build(samples: &[Sample]) -> Result<Vec<AnnotatedText>> {
    samples
        .iter()
        .map(|(text, entities)| AnnotatedText::from_surfaces(*text, entities))
        .collect()
}

pub fn training_examples() -> Result<Vec<AnnotatedText>> {
    build(TRAINING)
}

pub fn test_examples() -> Result<Vec<AnnotatedText>> {
    build(TEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntitySpan;

    #[test]
    fn test_samples_are_valid() {
        let training = training_examples().unwrap();
        assert_eq!(training.len(), 5);
        assert_eq!(test_examples().unwrap().len(), 2);
        assert_eq!(
            training[4].entities,
            vec![
                EntitySpan::new(29, 35, "DATE"),
                EntitySpan::new(39, 43, "TIME"),
                EntitySpan::new(47, 55, "GPE"),
            ]
        );
    }
}
