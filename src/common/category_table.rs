use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::common::WasteCategory;
use crate::data::LabelMap;

/// An inclusive span of class indices that all land in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRange {
    pub first: i64,
    pub last: i64,
    pub category: WasteCategory,
}

impl CategoryRange {
    pub fn new(first: i64, last: i64, category: WasteCategory) -> Self {
        Self { first, last, category }
    }

    pub fn contains(&self, index: i64) -> bool {
        (self.first..=self.last).contains(&index)
    }

    fn overlaps(&self, other: &CategoryRange) -> bool {
        self.first <= other.last && other.first <= self.last
    }
}

/// Partition of class indices into waste categories.
///
/// Indices not covered by any range map to [`WasteCategory::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CategoryRange>", into = "Vec<CategoryRange>")]
pub struct CategoryTable {
    ranges: Vec<CategoryRange>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        // Ordinal layout of the stock ten-class sorting model.
        Self {
            ranges: vec![
                CategoryRange::new(0, 0, WasteCategory::RecognitionFailed),
                CategoryRange::new(1, 3, WasteCategory::Hazardous),
                CategoryRange::new(4, 6, WasteCategory::Recyclable),
                CategoryRange::new(7, 9, WasteCategory::Kitchen),
            ],
        }
    }
}

impl CategoryTable {
    pub fn new(ranges: Vec<CategoryRange>) -> Result<Self> {
        for (i, range) in ranges.iter().enumerate() {
            if range.first > range.last {
                anyhow::bail!("Category range {}..={} is empty", range.first, range.last);
            }
            if let Some(other) = ranges[..i].iter().find(|r| r.overlaps(range)) {
                anyhow::bail!(
                    "Category ranges {}..={} ({:?}) and {}..={} ({:?}) overlap",
                    other.first, other.last, other.category,
                    range.first, range.last, range.category,
                );
            }
        }
        Ok(Self { ranges })
    }

    pub fn category_for(&self, index: i64) -> WasteCategory {
        self.ranges
            .iter()
            .find(|range| range.contains(index))
            .map(|range| range.category)
            .unwrap_or(WasteCategory::Other)
    }

    pub fn ranges(&self) -> &[CategoryRange] {
        &self.ranges
    }

    /// Indices the table routes explicitly but the label file never names.
    pub fn unlabelled_indices(&self, labels: &LabelMap) -> Vec<i64> {
        self.ranges
            .iter()
            .flat_map(|range| range.first..=range.last)
            .filter(|&index| index < 0 || !labels.contains(index as usize))
            .collect()
    }
}

impl TryFrom<Vec<CategoryRange>> for CategoryTable {
    type Error = anyhow::Error;

    fn try_from(ranges: Vec<CategoryRange>) -> Result<Self> {
        Self::new(ranges)
    }
}

impl From<CategoryTable> for Vec<CategoryRange> {
    fn from(table: CategoryTable) -> Self {
        table.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_partition() {
        let table = CategoryTable::default();
        assert_eq!(table.category_for(0), WasteCategory::RecognitionFailed);
        for i in 1..=3 {
            assert_eq!(table.category_for(i), WasteCategory::Hazardous);
        }
        for i in 4..=6 {
            assert_eq!(table.category_for(i), WasteCategory::Recyclable);
        }
        for i in 7..=9 {
            assert_eq!(table.category_for(i), WasteCategory::Kitchen);
        }
        assert_eq!(table.category_for(10), WasteCategory::Other);
        assert_eq!(table.category_for(1000), WasteCategory::Other);
    }

    #[test]
    fn negative_index_is_other() {
        let table = CategoryTable::default();
        assert_eq!(table.category_for(-1), WasteCategory::Other);
        assert_eq!(table.category_for(i64::MIN), WasteCategory::Other);
    }

    #[test]
    fn rejects_overlap() {
        let ranges = vec![
            CategoryRange::new(0, 4, WasteCategory::Hazardous),
            CategoryRange::new(4, 6, WasteCategory::Recyclable),
        ];
        assert!(CategoryTable::new(ranges).is_err());
    }

    #[test]
    fn rejects_inverted_range() {
        let ranges = vec![CategoryRange::new(5, 2, WasteCategory::Kitchen)];
        assert!(CategoryTable::new(ranges).is_err());
    }

    #[test]
    fn deserializes_from_list() {
        let json = r#"[{"first": 0, "last": 1, "category": "kitchen"}]"#;
        let table: CategoryTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.category_for(1), WasteCategory::Kitchen);
        assert_eq!(table.category_for(2), WasteCategory::Other);

        let bad = r#"[{"first": 0, "last": 3, "category": "kitchen"},
                      {"first": 2, "last": 5, "category": "hazardous"}]"#;
        assert!(serde_json::from_str::<CategoryTable>(bad).is_err());
    }

    #[test]
    fn reports_indices_missing_from_labels() {
        let labels = LabelMap::parse("0 nothing\n1 battery\n2 paint\n");
        let missing = CategoryTable::default().unlabelled_indices(&labels);
        assert_eq!(missing, vec![3, 4, 5, 6, 7, 8, 9]);
    }
}
