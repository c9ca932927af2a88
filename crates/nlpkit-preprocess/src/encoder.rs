//! Label encoding

use nlpkit_core::{NlpError, Result};
use serde::{Deserialize, Serialize};

/// Maps class labels to integer codes
///
/// Classes are the distinct labels in sorted order; a label's code is its
/// position in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    pub fn fit<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        if labels.is_empty() {
            return Err(NlpError::InvalidInput(
                "cannot fit a label encoder on no labels".to_string(),
            ));
        }
        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        self.classes = classes;
        Ok(())
    }

    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        if !self.is_fitted() {
            return Err(NlpError::Model("label encoder is not fitted".to_string()));
        }
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.classes
                    .binary_search_by(|class| class.as_str().cmp(label))
                    .map_err(|_| NlpError::InvalidInput(format!("unseen label: {label}")))
            })
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<Vec<usize>> {
        self.fit(labels)?;
        self.transform(labels)
    }

    pub fn inverse_transform(&self, codes: &[usize]) -> Result<Vec<String>> {
        codes
            .iter()
            .map(|&code| {
                self.classes
                    .get(code)
                    .cloned()
                    .ok_or_else(|| NlpError::InvalidInput(format!("unknown label code: {code}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_codes() {
        let mut encoder = LabelEncoder::new();
        let codes = encoder
            .fit_transform(&["positive", "negative", "positive"])
            .unwrap();
        assert_eq!(codes, vec![1, 0, 1]);
        assert_eq!(encoder.classes(), &["negative", "positive"]);
        assert_ne!(codes[0], codes[1]);
        assert_eq!(codes[0], codes[2]);
    }

    #[test]
    fn test_inverse_transform() {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&["spam", "ham", "eggs"]).unwrap();
        let codes = encoder.transform(&["ham", "eggs"]).unwrap();
        assert_eq!(encoder.inverse_transform(&codes).unwrap(), vec!["ham", "eggs"]);
        assert!(encoder.inverse_transform(&[7]).is_err());
    }

    #[test]
    fn test_unseen_and_unfitted() {
        let mut encoder = LabelEncoder::new();
        assert!(matches!(
            encoder.transform(&["a"]),
            Err(NlpError::Model(_))
        ));
        encoder.fit(&["a", "b"]).unwrap();
        assert!(matches!(
            encoder.transform(&["c"]),
            Err(NlpError::InvalidInput(_))
        ));
        let empty: [&str; 0] = [];
        assert!(encoder.fit(&empty).is_err());
    }
}
