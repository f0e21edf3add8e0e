use super::*;

#[test]
fn test_empty_window_reports_zero() {
    let tracker = HistoryTracker::default();
    assert!(tracker.is_empty());
    assert_eq!(tracker.good_percent(), 0);
}

#[test]
fn test_window_is_bounded() {
    let mut tracker = HistoryTracker::default();
    for _ in 0..100 {
        tracker.record(PostureLabel::Good);
        assert!(tracker.len() <= 60);
    }
    assert_eq!(tracker.len(), 60);
    assert!(tracker.labels().all(|l| l == PostureLabel::Good));
    assert_eq!(tracker.good_percent(), 100);
}

#[test]
fn test_unknown_is_not_recorded() {
    let mut tracker = HistoryTracker::default();
    for i in 0..10 {
        if i % 2 == 0 {
            tracker.record(PostureLabel::Good);
        } else {
            tracker.record(PostureLabel::Unknown);
        }
    }
    assert_eq!(tracker.len(), 5);
    assert!(tracker.labels().all(|l| l == PostureLabel::Good));
}

#[test]
fn test_oldest_labels_are_evicted_first() {
    let mut tracker = HistoryTracker::default();
    for _ in 0..60 {
        tracker.record(PostureLabel::Bad);
    }
    assert_eq!(tracker.good_percent(), 0);
    for _ in 0..30 {
        tracker.record(PostureLabel::Good);
    }
    assert_eq!(tracker.len(), 60);
    assert_eq!(tracker.good_percent(), 50);
    assert_eq!(tracker.labels().next(), Some(PostureLabel::Bad));
    assert_eq!(tracker.labels().last(), Some(PostureLabel::Good));
}

#[test]
fn test_good_percent_rounds_to_nearest() {
    let mut tracker = HistoryTracker::default();
    tracker.record(PostureLabel::Good);
    tracker.record(PostureLabel::Average);
    tracker.record(PostureLabel::Bad);
    // 1/3 -> 33
    assert_eq!(tracker.good_percent(), 33);
    tracker.record(PostureLabel::Good);
    tracker.record(PostureLabel::Good);
    tracker.record(PostureLabel::Average);
    // 3/6 -> 50
    assert_eq!(tracker.good_percent(), 50);
    tracker.record(PostureLabel::Bad);
    tracker.record(PostureLabel::Good);
    tracker.record(PostureLabel::Good);
    // 5/9 -> 56
    assert_eq!(tracker.good_percent(), 56);
    assert_eq!(
        tracker.counts(),
        LabelCounts {
            good: 5,
            average: 2,
            bad: 2
        }
    );
}

#[test]
fn test_custom_capacity() {
    let mut tracker = HistoryTracker::new(3);
    for label in [
        PostureLabel::Good,
        PostureLabel::Good,
        PostureLabel::Bad,
        PostureLabel::Bad,
    ] {
        tracker.record(label);
    }
    assert_eq!(tracker.capacity(), 3);
    assert_eq!(tracker.len(), 3);
    assert_eq!(tracker.good_percent(), 33);
}
