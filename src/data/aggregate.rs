//! Grouped averages for the chart.
//!
//! The chart shows one bar per distinct value of the grouping column, with
//! the bar height being the mean of the selected numeric column over that
//! group. Anything that makes the chart impossible (absent columns, text in
//! the value column, no rows) yields a placeholder figure with an
//! explanatory title instead of an error.

use serde::{Deserialize, Serialize};

use crate::types::{Dataset, Scalar};

/// One bar of the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub category: String,
    pub value: f64,
    /// Number of numeric cells averaged
    pub count: usize,
}

/// Chart data plus labelling
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<ChartBar>,
    /// True when there is nothing to plot and `title` explains why
    pub placeholder: bool,
}

impl ChartFigure {
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            placeholder: true,
            ..Default::default()
        }
    }

    /// Bar value for a category, if present
    pub fn value_of(&self, category: &str) -> Option<f64> {
        self.bars
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.value)
    }
}

/// Average `value_column` per distinct `group_column` value.
///
/// Groups appear in first-seen order. Missing cells are skipped, rows with
/// a missing group key are skipped, and groups without a single numeric
/// value are dropped.
pub fn group_average(dataset: &Dataset, group_column: &str, value_column: &str) -> ChartFigure {
    let Some(values) = dataset.column(value_column) else {
        return ChartFigure::placeholder(format!(
            "Column '{}' is not in the current dataset",
            value_column
        ));
    };
    let Some(groups) = dataset.column(group_column) else {
        return ChartFigure::placeholder(format!(
            "Grouping column '{}' is not in the current dataset",
            group_column
        ));
    };
    if dataset.num_rows() == 0 {
        return ChartFigure::placeholder("The current dataset has no rows");
    }
    if values.values.iter().any(|v| matches!(v, Scalar::Text(_))) {
        return ChartFigure::placeholder(format!(
            "Column '{}' is not numeric and cannot be averaged",
            value_column
        ));
    }

    // (category, sum, count) in first-seen order
    let mut sums: Vec<(String, f64, usize)> = Vec::new();
    for (key, value) in groups.values.iter().zip(values.values.iter()) {
        if key.is_missing() {
            continue;
        }
        let category = key.to_string();
        let slot = match sums.iter().position(|(c, _, _)| *c == category) {
            Some(idx) => idx,
            None => {
                sums.push((category, 0.0, 0));
                sums.len() - 1
            }
        };
        if let Some(v) = value.as_f64() {
            sums[slot].1 += v;
            sums[slot].2 += 1;
        }
    }

    let bars: Vec<ChartBar> = sums
        .into_iter()
        .filter(|(_, _, count)| *count > 0)
        .map(|(category, sum, count)| ChartBar {
            category,
            value: sum / count as f64,
            count,
        })
        .collect();

    if bars.is_empty() {
        return ChartFigure::placeholder(format!(
            "Column '{}' has no numeric values to average",
            value_column
        ));
    }

    ChartFigure {
        title: format!("Average {} by {}", value_column, group_column),
        x_label: group_column.to_string(),
        y_label: format!("avg of {}", value_column),
        bars,
        placeholder: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv_codec::parse_csv;

    #[test]
    fn test_average_per_region() {
        let ds = parse_csv(b"region,value\nA,1\nB,2\n").unwrap();
        let fig = group_average(&ds, "region", "value");
        assert!(!fig.placeholder);
        assert_eq!(fig.bars.len(), 2);
        assert_eq!(fig.value_of("A"), Some(1.0));
        assert_eq!(fig.value_of("B"), Some(2.0));
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let ds = parse_csv(b"continent,lifeExp\nAsia,60\nEurope,80\nAsia,70\nAfrica,50\n")
            .unwrap();
        let fig = group_average(&ds, "continent", "lifeExp");
        let order: Vec<_> = fig.bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(order, vec!["Asia", "Europe", "Africa"]);
        assert_eq!(fig.value_of("Asia"), Some(65.0));
        assert_eq!(fig.bars[0].count, 2);
    }

    #[test]
    fn test_missing_cells_are_skipped() {
        let ds = parse_csv(b"g,v\nx,1\nx,\n,5\ny,\n").unwrap();
        let fig = group_average(&ds, "g", "v");
        assert_eq!(fig.value_of("x"), Some(1.0));
        // "y" has no numeric value, the blank key row is ignored
        assert_eq!(fig.bars.len(), 1);
    }

    #[test]
    fn test_absent_value_column_is_placeholder() {
        let ds = parse_csv(b"region,value\nA,1\n").unwrap();
        let fig = group_average(&ds, "region", "nonexistent");
        assert!(fig.placeholder);
        assert!(fig.bars.is_empty());
        assert!(fig.title.contains("nonexistent"));
    }

    #[test]
    fn test_absent_group_column_is_placeholder() {
        let ds = parse_csv(b"region,value\nA,1\n").unwrap();
        let fig = group_average(&ds, "continent", "value");
        assert!(fig.placeholder);
        assert!(fig.title.contains("continent"));
    }

    #[test]
    fn test_text_column_is_placeholder() {
        let ds = parse_csv(b"region,name\nA,foo\n").unwrap();
        let fig = group_average(&ds, "region", "name");
        assert!(fig.placeholder);
        assert!(fig.title.contains("not numeric"));
    }

    #[test]
    fn test_empty_dataset_is_placeholder() {
        let fig = group_average(&Dataset::empty(), "region", "value");
        assert!(fig.placeholder);
    }

    #[test]
    fn test_numeric_group_keys_are_labelled() {
        let ds = parse_csv(b"year,pop\n2007,10\n2007,20\n2002,5\n").unwrap();
        let fig = group_average(&ds, "year", "pop");
        assert_eq!(fig.value_of("2007"), Some(15.0));
        assert_eq!(fig.value_of("2002"), Some(5.0));
    }
}
