use review_report::models::{Numeric, RatingCount, ReviewExcerpt};
use review_report::storage::{DocumentStore, MemoryStore, insert_reviews, load_reviews};
use review_report::{ReviewRecord, assemble};
use serde_json::json;

fn scenario() -> Vec<ReviewRecord> {
    vec![
        ReviewRecord::new("X").with_rating("4.5").with_price("₹100").with_comment("great"),
        ReviewRecord::new("X").with_rating("1.0").with_price("₹200").with_comment("bad"),
    ]
}

#[test]
fn test_scenario_report() {
    let report = assemble(&scenario()).unwrap();

    assert!(report.summary.is_none());
    let product = report.product("X").unwrap();
    assert_eq!(product.statistics.mean_price, Numeric::Value(150.0));
    assert_eq!(
        product.statistics.rating_histogram,
        vec![
            RatingCount { rating: 4.5, count: 1 },
            RatingCount { rating: 1.0, count: 1 },
        ]
    );
    assert_eq!(
        product.positive_reviews,
        vec![ReviewExcerpt { rating: 4.5, comment: "great".to_string() }]
    );
    assert_eq!(
        product.negative_reviews,
        vec![ReviewExcerpt { rating: 1.0, comment: "bad".to_string() }]
    );
}

#[test]
fn test_assemble_is_idempotent() {
    let mut records = scenario();
    records.push(ReviewRecord::new("Y").with_overall_rating("3.9").with_price("oops"));

    let first = assemble(&records).unwrap();
    let second = assemble(&records).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    assert_eq!(first.summary.unwrap().entries.len(), 2);
}

#[test]
fn test_report_json_uses_null_for_unparseable_means() {
    let report = assemble(&[ReviewRecord::new("X").with_price("n/a")]).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["summary"], json!(null));
    assert_eq!(value["products"][0]["statistics"]["mean_price"], json!(null));
}

#[tokio::test]
async fn test_store_to_report() {
    let store = MemoryStore::new();
    store
        .bulk_insert(
            &[
                json!({"Product Name": "A", "Over_All_Rating": "4.2", "Price": "₹1,000", "Rating": 5, "Comment": "top"}),
                json!({"Product Name": "B", "Over_All_Rating": 3, "Price": 500, "Rating": "2", "Comment": "meh"}),
                json!({"Product Name": "A", "Price": null, "Rating": "abc", "Comment": null}),
            ],
            "reviews",
        )
        .await
        .unwrap();
    insert_reviews(&store, &[], "reviews").await.unwrap();

    let reviews = load_reviews(&store, "reviews").await.unwrap();
    assert_eq!(reviews.len(), 3);

    let report = assemble(&reviews).unwrap();
    let a = report.product("A").unwrap();
    assert_eq!(a.statistics.review_count, 2);
    assert_eq!(a.statistics.mean_price, Numeric::Value(1000.0));
    assert_eq!(a.description, "top");

    let b = report.product("B").unwrap();
    assert_eq!(b.negative_reviews.len(), 1);

    let summary = report.summary.unwrap();
    assert_eq!(summary.entries.len(), 2);
    let shares: f64 = summary.entries.iter().map(|e| e.rating_share).sum();
    assert!((shares - 1.0).abs() < 1e-9);
}
