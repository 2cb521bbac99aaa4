//! Predictions and the closed label set they are drawn from

use std::fmt;

use crate::{HandsignError, HandsignResult};

/// Number of labels the classifier distinguishes
pub const LABEL_COUNT: usize = 26;

/// A label paired with a confidence in [0, 1]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// The "no prediction" value: empty label, zero confidence
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.label.is_empty()
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "<none>")
        } else {
            write!(f, "{} ({:.2})", self.label, self.confidence)
        }
    }
}

/// Ordered label set; index `i` names classifier output `i`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Build a label set, checking size and uniqueness
    pub fn new<I, S>(labels: I) -> HandsignResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = LabelSet {
            labels: labels.into_iter().map(Into::into).collect(),
        };
        set.validate()?;
        Ok(set)
    }

    /// The ASL fingerspelling alphabet, A through Z
    pub fn asl_alphabet() -> Self {
        LabelSet {
            labels: ('A'..='Z').map(|c| c.to_string()).collect(),
        }
    }

    pub fn validate(&self) -> HandsignResult<()> {
        if self.labels.len() != LABEL_COUNT {
            return Err(HandsignError::Configuration(format!(
                "label set must have {} labels, got {}",
                LABEL_COUNT,
                self.labels.len()
            )));
        }
        for (i, label) in self.labels.iter().enumerate() {
            if label.is_empty() {
                return Err(HandsignError::Configuration(format!(
                    "label {} is empty",
                    i
                )));
            }
            if self.labels[..i].contains(label) {
                return Err(HandsignError::Configuration(format!(
                    "duplicate label {:?}",
                    label
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for a classifier output index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Classifier output index for a label
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::asl_alphabet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asl_alphabet() {
        let labels = LabelSet::asl_alphabet();
        assert_eq!(labels.len(), LABEL_COUNT);
        assert_eq!(labels.get(0), Some("A"));
        assert_eq!(labels.get(25), Some("Z"));
        assert_eq!(labels.get(26), None);
        assert_eq!(labels.index_of("C"), Some(2));
        assert!(!labels.contains("a"));
        assert!(labels.validate().is_ok());
    }

    #[test]
    fn test_label_set_validation() {
        assert!(LabelSet::new(["A", "B"]).is_err());

        let mut labels: Vec<String> = ('A'..='Z').map(|c| c.to_string()).collect();
        labels[5] = "A".to_string();
        let err = LabelSet::new(labels.clone()).unwrap_err();
        assert!(err.is_configuration_error());

        labels[5] = String::new();
        assert!(LabelSet::new(labels).is_err());
    }

    #[test]
    fn test_prediction_none() {
        let none = Prediction::none();
        assert!(none.is_none());
        assert_eq!(none.confidence, 0.0);
        assert_eq!(none.to_string(), "<none>");

        let p = Prediction::new("B", 0.9);
        assert!(!p.is_none());
        assert_eq!(p.to_string(), "B (0.90)");
    }
}
