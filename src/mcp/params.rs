//! MCP tool parameter types.
//!
//! Defines the input schemas for MCP tools using `schemars` for automatic
//! JSON Schema generation required by the MCP protocol.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// Reads an optional count from any JSON number.
///
/// Integers beyond `i64` saturate and fractional values are truncated, so the
/// gateway can clamp them instead of rejecting the call.
#[allow(clippy::cast_possible_truncation)]
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Number>::deserialize(deserializer)?.map(|n| {
        n.as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .unwrap_or_else(|| n.as_f64().map_or(0, |f| f as i64))
    }))
}

/// Parameters for the `search` MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The search query to execute.
    pub query: String,

    /// Number of results to return (1-50, default 10). Out-of-range values
    /// are clamped.
    #[serde(
        default,
        alias = "numResults",
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<i64>")]
    pub num_results: Option<i64>,
}

/// Parameters for the `find_similar` MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindSimilarParams {
    /// The URL to find similar content for.
    pub url: String,

    /// Number of results to return (1-50, default 10). Out-of-range values
    /// are clamped.
    #[serde(
        default,
        alias = "numResults",
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<i64>")]
    pub num_results: Option<i64>,
}

/// Parameters for the `get_contents` MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetContentsParams {
    /// Exa document IDs to retrieve content for.
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;
    use crate::gateway::clamp_num_results;

    #[test]
    fn test_num_results_accepts_both_spellings() {
        let snake: SearchParams = serde_json::from_value(json!({"query": "q", "num_results": 5}))
            .unwrap_or_else(|_| unreachable!());
        let camel: SearchParams = serde_json::from_value(json!({"query": "q", "numResults": 7}))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(snake.num_results, Some(5));
        assert_eq!(camel.num_results, Some(7));
    }

    #[test]
    fn test_num_results_optional() {
        let params: FindSimilarParams =
            serde_json::from_value(json!({"url": "https://example.com"}))
                .unwrap_or_else(|_| unreachable!());
        assert_eq!(params.num_results, None);
    }

    #[test_case(json!(10.0) => Some(10) ; "integral float")]
    #[test_case(json!(7.9) => Some(7) ; "fraction truncated")]
    #[test_case(json!(u64::MAX) => Some(i64::MAX) ; "above i64 saturates")]
    #[test_case(json!(-1e30) => Some(i64::MIN) ; "huge negative saturates")]
    #[test_case(json!(null) => None ; "null is absent")]
    fn test_num_results_lenient(raw: serde_json::Value) -> Option<i64> {
        serde_json::from_value::<SearchParams>(json!({"query": "q", "numResults": raw}))
            .map(|p| p.num_results)
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_lenient_counts_clamp_into_range() {
        let clamped: Vec<_> = [json!(10.0), json!(u64::MAX), json!(-1e30)]
            .into_iter()
            .map(|raw| {
                serde_json::from_value::<FindSimilarParams>(
                    json!({"url": "https://example.com", "num_results": raw}),
                )
                .map(|p| clamp_num_results(p.num_results))
                .unwrap_or_else(|_| unreachable!())
            })
            .collect();
        assert_eq!(clamped, [10, 50, 1]);
    }

    #[test]
    fn test_non_numeric_count_rejected() {
        assert!(
            serde_json::from_value::<SearchParams>(json!({"query": "q", "numResults": "ten"}))
                .is_err()
        );
    }

    #[test]
    fn test_ids_required() {
        assert!(serde_json::from_value::<GetContentsParams>(json!({})).is_err());
    }
}
