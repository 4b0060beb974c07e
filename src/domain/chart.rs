// Placeholder chart data served until real employee data is wired in
use serde::Serialize;

pub const DEFAULT_CHART_TYPE: &str = "bar";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u32>,
}

impl ChartData {
    /// Mock data for the requested chart type: a category breakdown for
    /// circular charts, a quarterly series for everything else.
    pub fn mock(chart_type: Option<&str>) -> Self {
        match chart_type.unwrap_or(DEFAULT_CHART_TYPE) {
            "pie" | "donut" => Self::category_breakdown(),
            _ => Self::quarterly_series(),
        }
    }

    fn category_breakdown() -> Self {
        Self {
            labels: labels(&["Category A", "Category B", "Category C"]),
            datasets: vec![Dataset {
                label: None,
                data: vec![35, 28, 22],
            }],
        }
    }

    fn quarterly_series() -> Self {
        Self {
            labels: labels(&["Q1", "Q2", "Q3", "Q4"]),
            datasets: vec![Dataset {
                label: Some("Metric".to_string()),
                data: vec![65, 72, 68, 81],
            }],
        }
    }
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_charts_get_three_categories() {
        for kind in ["pie", "donut"] {
            let data = ChartData::mock(Some(kind));
            assert_eq!(data.labels.len(), 3);
            assert_eq!(data.datasets[0].data, vec![35, 28, 22]);
            assert_eq!(data, ChartData::mock(Some(kind)));
        }
    }

    #[test]
    fn test_other_charts_get_four_quarters() {
        for kind in [Some("bar"), Some("line"), Some("radar"), Some(""), None] {
            let data = ChartData::mock(kind);
            assert_eq!(data.labels, vec!["Q1", "Q2", "Q3", "Q4"]);
            assert_eq!(data.datasets[0].label.as_deref(), Some("Metric"));
        }
    }

    #[test]
    fn test_unlabelled_dataset_omits_label_key() {
        let json = serde_json::to_value(ChartData::mock(Some("pie"))).unwrap();
        assert!(json["datasets"][0].get("label").is_none());
        assert_eq!(json["datasets"][0]["data"], serde_json::json!([35, 28, 22]));
    }
}
