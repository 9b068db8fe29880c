use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Object key layout for the bucket-backed document store.
pub struct StorageManager;

impl StorageManager {
    pub fn collection_prefix(collection: &str) -> String {
        format!("collections/{}/", collection)
    }

    /// Keys sort by insertion time so `find_all` can read batches in order.
    pub fn batch_key(collection: &str, at: DateTime<Utc>) -> String {
        format!(
            "{}{}-{}.json",
            Self::collection_prefix(collection),
            at.format("%Y%m%dT%H%M%S%.6f"),
            Uuid::new_v4()
        )
    }

    pub fn report_key(collection: &str, at: DateTime<Utc>, file_name: &str) -> String {
        format!(
            "reports/{}/{}/{}",
            collection,
            at.format("%Y/%m/%d/%H%M%S"),
            file_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_batch_keys_live_under_collection_prefix() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let key = StorageManager::batch_key("reviews", at);

        assert!(key.starts_with("collections/reviews/20240309T140507.000000-"));
        assert!(key.ends_with(".json"));
    }

    #[test]
    fn test_batch_keys_sort_by_time() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();

        assert!(StorageManager::batch_key("r", earlier) < StorageManager::batch_key("r", later));
    }

    #[test]
    fn test_report_key() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            StorageManager::report_key("reviews", at, "report.json"),
            "reports/reviews/2024/03/09/140507/report.json"
        );
    }
}
