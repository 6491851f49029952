//! Explicit optional-field schema for a paper record.
//!
//! Every leaf is optional and goes through the [`lenient`](crate::lenient)
//! helpers, so a record with any subset of fields (or malformed ones) still
//! deserializes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::lenient;

/// One paper as loaded from the dataset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Paper {
    /// Unique key. Empty until the loader assigns a fallback.
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub paper_id: String,
    #[serde(default, deserialize_with = "lenient::object")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "lenient::object")]
    pub problem: Problem,
    #[serde(default, deserialize_with = "lenient::object")]
    pub methodology: Methodology,
    #[serde(default, deserialize_with = "lenient::object")]
    pub data: DataInfo,
    #[serde(default, deserialize_with = "lenient::object")]
    pub experiments: Experiments,
    #[serde(default, deserialize_with = "lenient::object")]
    pub reproducibility: Reproducibility,
    #[serde(default, deserialize_with = "lenient::object")]
    pub complexity: Complexity,
    #[serde(default, rename = "your_analysis", deserialize_with = "lenient::object")]
    pub analysis: Analysis,
    #[serde(default, deserialize_with = "lenient::object")]
    pub outputs: Outputs,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub contributions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub limitations: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub future_work: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pdf_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub added_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date_added: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub authors: Option<Vec<Author>>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub doi: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub citations_count: Option<String>,
}

/// An author entry: either `{name, affiliation}` or a bare name string.
#[derive(Debug, Clone, PartialEq)]
pub enum Author {
    Named {
        name: String,
        affiliation: Option<String>,
    },
    Bare(String),
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Self::Named { name, .. } => name,
            Self::Bare(name) => name,
        }
    }

    pub fn affiliation(&self) -> Option<&str> {
        match self {
            Self::Named { affiliation, .. } => affiliation.as_deref(),
            Self::Bare(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for Author {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Object(map) => {
                let name = map
                    .get("name")
                    .and_then(lenient::value_to_text)
                    .ok_or_else(|| serde::de::Error::custom("author without a name"))?;
                let affiliation = map.get("affiliation").and_then(lenient::value_to_text);
                Ok(Self::Named { name, affiliation })
            }
            other => lenient::value_to_text(other)
                .map(Self::Bare)
                .ok_or_else(|| serde::de::Error::custom("author is not a name")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Problem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub problem_statement: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub motivation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub research_gap: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Methodology {
    #[serde(default, deserialize_with = "lenient::text")]
    pub model_name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub architecture: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub algorithms: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub workflow_summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DataInfo {
    #[serde(default, deserialize_with = "lenient::list")]
    pub datasets_used: Option<Vec<Dataset>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub preprocessing: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Experiments {
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub evaluation_metrics: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub baselines_compared: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub best_results: Option<Vec<ResultRow>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub results_summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub metric: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub comparison_note: Option<String>,
}

/// A reproducibility marker that is either a yes/no or a free-text note.
#[derive(Debug, Clone, PartialEq)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Flag>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    Ok(match value {
        Value::Bool(b) => Some(Flag::Bool(b)),
        other => lenient::value_to_text(&other).map(Flag::Text),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Reproducibility {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub clear_methodology: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub public_dataset: Option<Flag>,
    #[serde(default, deserialize_with = "flag")]
    pub hyperparameters_listed: Option<Flag>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Complexity {
    #[serde(default, deserialize_with = "lenient::text")]
    pub training_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub inference_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub computational_cost: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Analysis {
    /// 0–10 relevance rating. `Some(0.0)` is a real score.
    #[serde(default, deserialize_with = "lenient::number")]
    pub relevance_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub strengths: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub weaknesses: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub implementation_difficulty: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub can_we_extend_it: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Outputs {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub code_available: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub model_available: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub demo_available: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub code_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub model_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub demo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_a_paper() {
        let paper: Paper = serde_json::from_value(json!({})).unwrap();
        assert_eq!(paper, Paper::default());
    }

    #[test]
    fn test_mixed_author_shapes() {
        let paper: Paper = serde_json::from_value(json!({
            "metadata": {"authors": [
                {"name": "Ada Lovelace", "affiliation": "Analytical Engines"},
                "Alan Turing",
                {"affiliation": "nowhere"},
                ""
            ]}
        }))
        .unwrap();
        let authors = paper.metadata.authors.unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].affiliation(), Some("Analytical Engines"));
        assert_eq!(authors[1], Author::Bare("Alan Turing".into()));
    }

    #[test]
    fn test_malformed_nested_objects_degrade() {
        let paper: Paper = serde_json::from_value(json!({
            "paper_id": "p1",
            "metadata": "not an object",
            "your_analysis": {"relevance_score": 0},
            "outputs": [1, 2],
            "reproducibility": {"public_dataset": true, "hyperparameters_listed": "partially"}
        }))
        .unwrap();
        assert_eq!(paper.paper_id, "p1");
        assert_eq!(paper.metadata, Metadata::default());
        assert_eq!(paper.analysis.relevance_score, Some(0.0));
        assert_eq!(paper.outputs, Outputs::default());
        assert_eq!(paper.reproducibility.public_dataset, Some(Flag::Bool(true)));
        assert_eq!(
            paper.reproducibility.hyperparameters_listed,
            Some(Flag::Text("partially".into()))
        );
    }

    #[test]
    fn test_result_value_keeps_numbers() {
        let paper: Paper = serde_json::from_value(json!({
            "experiments": {"best_results": [{"metric": "F1", "value": 0.91}]}
        }))
        .unwrap();
        let rows = paper.experiments.best_results.unwrap();
        assert_eq!(rows[0].value.as_deref(), Some("0.91"));
        assert!(rows[0].comparison_note.is_none());
    }
}
