use gpui_stream_dashboard::data_types::Category;
use gpui_stream_dashboard::stream::{generate_initial_dataset, SampleGenerator, SAMPLE_INTERVAL_MS};

fn noise(value: f64, phase: f64) -> f64 {
    value - (phase.sin() * 50.0 + 50.0)
}

#[test]
fn test_initial_batch_spacing() {
    let mut generator = SampleGenerator::from_seed(7);
    let points = generator.generate_initial(5, 10_000);
    let stamps: Vec<i64> = points.iter().map(|p| p.timestamp).collect();
    assert_eq!(stamps, vec![9_500, 9_600, 9_700, 9_800, 9_900]);
}

#[test]
fn test_initial_batch_phases_on_index() {
    let mut generator = SampleGenerator::from_seed(11);
    let points = generator.generate_initial(300, 1_000_000);
    for (i, p) in points.iter().enumerate() {
        let n = noise(p.value, i as f64 / 100.0);
        assert!((-1e-9..20.0 + 1e-9).contains(&n), "point {i}: noise {n}");
    }
}

#[test]
fn test_next_point_phases_on_timestamp() {
    let mut generator = SampleGenerator::from_seed(3);
    let last = 1_700_000_000_000;
    for _ in 0..100 {
        let p = generator.generate_next(last);
        assert_eq!(p.timestamp, last + SAMPLE_INTERVAL_MS);
        let n = noise(p.value, last as f64 / 10_000.0);
        assert!((-1e-9..20.0 + 1e-9).contains(&n));
    }
}

#[test]
fn test_seeded_generators_agree() {
    let mut a = SampleGenerator::from_seed(99);
    let mut b = SampleGenerator::from_seed(99);
    assert_eq!(a.generate_initial(50, 5_000), b.generate_initial(50, 5_000));
    assert_eq!(a.generate_next(5_000), b.generate_next(5_000));
}

#[test]
fn test_batch_is_consecutive() {
    let mut generator = SampleGenerator::from_seed(5);
    let batch = generator.generate_batch(1_000, 4);
    let stamps: Vec<i64> = batch.iter().map(|p| p.timestamp).collect();
    assert_eq!(stamps, vec![1_100, 1_200, 1_300, 1_400]);
}

#[test]
fn test_categories_cover_label_set() {
    let mut generator = SampleGenerator::from_seed(21);
    let points = generator.generate_initial(2_000, 0);
    for category in Category::ALL {
        assert!(
            points.iter().any(|p| p.category == category),
            "category {category} never drawn"
        );
    }
}

#[test]
fn test_dataset_helper_ends_before_now() {
    let before = chrono::Utc::now().timestamp_millis();
    let points = generate_initial_dataset(20);
    let after = chrono::Utc::now().timestamp_millis();
    assert_eq!(points.len(), 20);
    let newest = points.last().map(|p| p.timestamp).unwrap_or_default();
    assert!(newest + SAMPLE_INTERVAL_MS >= before);
    assert!(newest + SAMPLE_INTERVAL_MS <= after);
    assert!(generate_initial_dataset(0).is_empty());
}
