//! Labeled URL dataset loading
//!
//! Training data arrives as CSV with a header naming a `url` and a `label`
//! column (any order, extra columns ignored). Labels are the 0/1 encoding:
//! 0 = legitimate, 1 = malicious.

use std::path::Path;

use crate::classifier::Label;
use crate::features::{FeatureExtractor, FeatureVector};
use urlgate_common::{GateError, GateResult};

/// Ordered pairs of URL strings and their labels
#[derive(Debug, Clone, Default)]
pub struct LabeledDataset {
    /// URL strings, one per sample
    pub urls: Vec<String>,
    /// Labels, parallel to `urls`
    pub labels: Vec<Label>,
}

impl LabeledDataset {
    /// Load a dataset from a CSV file.
    ///
    /// The header row must name `url` and `label` columns
    /// (case-insensitive). Malformed rows fail with `InvalidInput` naming
    /// the offending line.
    pub fn load_csv(path: &Path) -> GateResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_csv(&content)
    }

    /// Parse CSV content (see `load_csv` for the expected shape)
    pub fn parse_csv(content: &str) -> GateResult<Self> {
        let mut lines = content.lines().enumerate();

        let (_, header) = lines
            .find(|(_, l)| !l.trim().is_empty())
            .ok_or_else(|| GateError::InvalidInput("empty dataset".to_string()))?;

        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        let url_col = find_column(&columns, "url")?;
        let label_col = find_column(&columns, "label")?;

        let mut urls = Vec::new();
        let mut labels = Vec::new();
        for (line_no, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();

            let url = fields.get(url_col).copied().unwrap_or("");
            if url.is_empty() {
                return Err(GateError::InvalidInput(format!(
                    "line {}: missing url field",
                    line_no + 1
                )));
            }

            let raw_label = fields.get(label_col).copied().unwrap_or("");
            let label = raw_label
                .parse::<u8>()
                .ok()
                .and_then(Label::from_bit)
                .ok_or_else(|| {
                    GateError::InvalidInput(format!(
                        "line {}: label must be 0 or 1, got {raw_label:?}",
                        line_no + 1
                    ))
                })?;

            urls.push(url.to_string());
            labels.push(label);
        }

        Ok(Self { urls, labels })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Extract feature vectors for every URL, in order
    pub fn feature_matrix(&self, extractor: &FeatureExtractor) -> Vec<FeatureVector> {
        self.urls.iter().map(|u| extractor.extract(u)).collect()
    }
}

fn find_column(columns: &[&str], name: &str) -> GateResult<usize> {
    columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            GateError::InvalidInput(format!("CSV header is missing a {name:?} column"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_csv() {
        let csv = "url,label\n\
                   https://good.example/home,0\n\
                   http://bad.example/free-prize,1\n";
        let dataset = LabeledDataset::parse_csv(csv).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.urls[0], "https://good.example/home");
        assert_eq!(dataset.labels[0], Label::Benign);
        assert_eq!(dataset.labels[1], Label::Malicious);
    }

    #[test]
    fn test_columns_may_be_reordered() {
        let csv = "label,source,url\n1,feed,http://bad.example\n";
        let dataset = LabeledDataset::parse_csv(csv).unwrap();
        assert_eq!(dataset.urls[0], "http://bad.example");
        assert_eq!(dataset.labels[0], Label::Malicious);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "url,label\n\nhttps://a.example,0\n\n";
        let dataset = LabeledDataset::parse_csv(csv).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_missing_column_fails() {
        let err = LabeledDataset::parse_csv("url,verdict\nhttps://a.example,0\n").unwrap_err();
        assert!(matches!(err, GateError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_label_names_line() {
        let err =
            LabeledDataset::parse_csv("url,label\nhttps://a.example,maybe\n").unwrap_err();
        match err {
            GateError::InvalidInput(msg) => assert!(msg.contains("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_content_fails() {
        assert!(matches!(
            LabeledDataset::parse_csv("\n\n"),
            Err(GateError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_feature_matrix_order() {
        let csv = "url,label\nhttps://a.example/x,0\nhttp://b.example,1\n";
        let dataset = LabeledDataset::parse_csv(csv).unwrap();
        let extractor = FeatureExtractor::new();
        let matrix = dataset.feature_matrix(&extractor);

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].get(1), 1.0); // first row is https
        assert_eq!(matrix[1].get(1), 0.0);
    }
}
