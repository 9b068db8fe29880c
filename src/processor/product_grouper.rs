use crate::models::NormalizedRecord;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductGroup {
    pub product_name: String,
    pub records: Vec<NormalizedRecord>,
}

pub struct ProductGrouper;

impl ProductGrouper {
    /// Partitions records by exact product name.
    ///
    /// Names are compared byte for byte: "Pixel 8" and "Pixel 8 " land in
    /// different groups. Groups come back in the order their names first
    /// appear, and each group keeps its records in input order.
    pub fn group(&self, records: Vec<NormalizedRecord>) -> Vec<ProductGroup> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<ProductGroup> = Vec::new();

        for record in records {
            match index.get(&record.product_name) {
                Some(&position) => groups[position].records.push(record),
                None => {
                    index.insert(record.product_name.clone(), groups.len());
                    groups.push(ProductGroup {
                        product_name: record.product_name.clone(),
                        records: vec![record],
                    });
                }
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewRecord;
    use crate::processor::FieldNormalizer;

    fn normalized(names: &[&str]) -> Vec<NormalizedRecord> {
        let records: Vec<ReviewRecord> = names
            .iter()
            .enumerate()
            .map(|(i, name)| ReviewRecord::new(name).with_comment(&i.to_string()))
            .collect();
        FieldNormalizer.normalize(&records)
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let records = normalized(&["A", "B", "A", "C", "B", "A"]);
        let groups = ProductGrouper.group(records.clone());

        let names: Vec<&str> = groups.iter().map(|g| g.product_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let total: usize = groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(total, records.len());

        for group in &groups {
            assert!(group.records.iter().all(|r| r.product_name == group.product_name));
        }
    }

    #[test]
    fn test_group_preserves_record_order() {
        let groups = ProductGrouper.group(normalized(&["A", "B", "A", "A"]));

        let comments: Vec<&str> = groups[0]
            .records
            .iter()
            .filter_map(|r| r.comment.as_deref())
            .collect();
        assert_eq!(comments, vec!["0", "2", "3"]);
    }

    #[test]
    fn test_whitespace_variants_stay_separate() {
        let groups = ProductGrouper.group(normalized(&["Pixel 8", "Pixel 8 ", "pixel 8"]));
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(ProductGrouper.group(Vec::new()).is_empty());
    }
}
