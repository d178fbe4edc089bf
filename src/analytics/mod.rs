//! Shape summary of the current definition, for the insights view.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{ControlType, FormDefinition};

/// Aggregate statistics over a whole definition tree.
///
/// Counts recurse through every nesting level. LOINC coverage is computed
/// over leaf fields only, since containers never carry codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormInsights {
    pub total_items: usize,
    pub counts_by_type: BTreeMap<ControlType, usize>,
    pub container_count: usize,
    pub leaf_count: usize,
    pub required_count: usize,
    pub loinc_count: usize,
    /// Share of leaf fields carrying a LOINC code, rounded to whole percent.
    pub loinc_coverage_percent: u32,
    pub max_depth: usize,
}

impl FormInsights {
    pub fn for_definition(definition: &FormDefinition) -> Self {
        let mut container_count = 0;
        let mut leaf_count = 0;
        let mut required_count = 0;
        let mut loinc_count = 0;

        definition.walk(&mut |item, _| {
            if item.is_container() {
                container_count += 1;
            } else {
                leaf_count += 1;
                if item.is_required() {
                    required_count += 1;
                }
                if item.loinc_code().is_some() {
                    loinc_count += 1;
                }
            }
        });

        let loinc_coverage_percent = if leaf_count == 0 {
            0
        } else {
            ((loinc_count as f64 / leaf_count as f64) * 100.0).round() as u32
        };

        Self {
            total_items: container_count + leaf_count,
            counts_by_type: definition.counts_by_type(),
            container_count,
            leaf_count,
            required_count,
            loinc_count,
            loinc_coverage_percent,
            max_depth: definition.max_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChoiceItem, ContainerItem, FieldItem, FormItem};

    #[test]
    fn insights_recurse_through_nesting() {
        let def = FormDefinition::new("T", "1", "P").with_item(FormItem::Section(
            ContainerItem::new("s", "S").with_item(FormItem::Group(
                ContainerItem::new("g", "G")
                    .with_item(FormItem::Number(
                        FieldItem::new("bmi", "BMI").required().with_loinc("39156-5"),
                    ))
                    .with_item(FormItem::Radio(ChoiceItem::new("mood", "Mood", ["Up", "Down"]))),
            )),
        ));

        let insights = FormInsights::for_definition(&def);
        assert_eq!(insights.total_items, 4);
        assert_eq!(insights.container_count, 2);
        assert_eq!(insights.leaf_count, 2);
        assert_eq!(insights.required_count, 1);
        assert_eq!(insights.loinc_count, 1);
        assert_eq!(insights.loinc_coverage_percent, 50);
        assert_eq!(insights.max_depth, 3);
        assert_eq!(insights.counts_by_type[&ControlType::Radio], 1);
    }

    #[test]
    fn empty_definition_has_zero_coverage() {
        let def = FormDefinition::new("T", "1", "P");
        let insights = FormInsights::for_definition(&def);
        assert_eq!(insights.total_items, 0);
        assert_eq!(insights.loinc_coverage_percent, 0);
        assert_eq!(insights.max_depth, 0);
    }
}
