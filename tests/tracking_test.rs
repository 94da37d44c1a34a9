use std::collections::HashSet;

use objtrack_rs::{Detection, ObjectTracker, TrackedObject, TrackerConfig, TrackerError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ids(objects: &[TrackedObject]) -> Vec<u64> {
    objects.iter().map(|o| o.id).collect()
}

#[test]
fn test_basic_tracking() {
    init_logging();
    let config = TrackerConfig::default().with_grace_period(1);
    let mut tracker = ObjectTracker::with_config(640, 480, config).unwrap();

    // Frame 1: One detection starts track 1
    let tracks1 = tracker
        .analyse(&[Detection::new(10.0, 10.0, 50.0, 50.0, 0.9)])
        .unwrap();
    assert_eq!(ids(&tracks1), vec![1]);

    // Frame 2: Same object moved slightly
    let tracks2 = tracker
        .analyse(&[Detection::new(12.0, 11.0, 50.0, 50.0, 0.85)])
        .unwrap();
    assert_eq!(ids(&tracks2), vec![1]);
    assert_eq!(tracks2[0].confidence, 0.85);

    // Frame 3: Object missing, the track ages but is not emitted
    let tracks3 = tracker.analyse(&[]).unwrap();
    assert!(tracks3.is_empty());
    assert_eq!(tracker.track_count(), 1);

    // Frame 4: Object reappears within the grace period
    let tracks4 = tracker
        .analyse(&[Detection::new(14.0, 13.0, 50.0, 50.0, 0.9)])
        .unwrap();
    assert_eq!(ids(&tracks4), vec![1]);
}

#[test]
fn test_default_grace_period_is_strict() {
    init_logging();
    let mut tracker = ObjectTracker::new(640, 480).unwrap();

    tracker
        .analyse(&[Detection::new(10.0, 10.0, 50.0, 50.0, 0.9)])
        .unwrap();
    assert!(tracker.analyse(&[]).unwrap().is_empty());
    assert_eq!(tracker.track_count(), 0);

    let tracks = tracker
        .analyse(&[Detection::new(10.0, 10.0, 50.0, 50.0, 0.9)])
        .unwrap();
    assert_eq!(ids(&tracks), vec![2]);
}

#[test]
fn test_identity_stable_while_moving() {
    init_logging();
    let mut tracker = ObjectTracker::new(640, 480).unwrap();

    for step in 0..20 {
        let x = 100.0 + step as f32 * 4.0;
        let y = 50.0 + step as f32 * 2.0;
        let tracks = tracker
            .analyse(&[Detection::new(x, y, 60.0, 40.0, 0.8).with_label("car")])
            .unwrap();
        assert_eq!(ids(&tracks), vec![1]);
        assert_eq!(tracks[0].label.as_deref(), Some("car"));
    }
}

#[test]
fn test_conservation_and_distinct_identities() {
    init_logging();
    let mut tracker = ObjectTracker::with_config(
        1920,
        1080,
        TrackerConfig::default().with_grace_period(2),
    )
    .unwrap();

    let frames: Vec<Vec<Detection>> = vec![
        vec![
            Detection::new(0.0, 0.0, 40.0, 40.0, 0.9),
            Detection::new(10.0, 10.0, 40.0, 40.0, 0.7),
            Detection::new(500.0, 500.0, 80.0, 80.0, 0.6),
        ],
        vec![
            Detection::new(12.0, 12.0, 40.0, 40.0, 0.7),
            Detection::new(2.0, 1.0, 40.0, 40.0, 0.9),
        ],
        vec![],
        vec![
            Detection::new(505.0, 498.0, 80.0, 80.0, 0.6),
            Detection::new(900.0, 100.0, 30.0, 60.0, 0.5),
            Detection::new(3.0, 2.0, 40.0, 40.0, 0.95),
            Detection::new(3.0, 2.0, 40.0, 40.0, 0.95),
        ],
    ];

    let mut seen: HashSet<u64> = HashSet::new();
    let mut highest_id = 0;
    for dets in &frames {
        let tracks = tracker.analyse(dets).unwrap();
        assert_eq!(tracks.len(), dets.len());

        let unique: HashSet<u64> = tracks.iter().map(|t| t.id).collect();
        assert_eq!(unique.len(), tracks.len());

        for (track, det) in tracks.iter().zip(dets) {
            assert_eq!(track.bbox, det.bbox);
            assert_eq!(track.confidence, det.confidence);
        }

        // Identities not seen before are above everything allocated so far.
        let mut fresh: Vec<u64> = unique.difference(&seen).copied().collect();
        fresh.sort_unstable();
        for &id in &fresh {
            assert!(id > highest_id);
            highest_id = id;
        }
        seen.extend(fresh);
    }
}

#[test]
fn test_expired_identity_never_returns() {
    init_logging();
    let config = TrackerConfig::default().with_grace_period(2);
    let mut tracker = ObjectTracker::with_config(640, 480, config).unwrap();
    let det = Detection::new(200.0, 200.0, 30.0, 30.0, 0.9);

    assert_eq!(ids(&tracker.analyse(std::slice::from_ref(&det)).unwrap()), vec![1]);
    for _ in 0..3 {
        assert!(tracker.analyse(&[]).unwrap().is_empty());
    }
    assert_eq!(tracker.track_count(), 0);

    // Same place, but the old track has been retired.
    let tracks = tracker.analyse(std::slice::from_ref(&det)).unwrap();
    assert_eq!(ids(&tracks), vec![2]);
}

#[test]
fn test_two_objects_keep_their_identities() {
    init_logging();
    let mut tracker = ObjectTracker::new(640, 480).unwrap();

    let first = tracker
        .analyse(&[
            Detection::new(10.0, 10.0, 50.0, 50.0, 0.9).with_label("person"),
            Detection::new(300.0, 200.0, 50.0, 80.0, 0.8).with_label("bicycle"),
        ])
        .unwrap();
    assert_eq!(ids(&first), vec![1, 2]);

    // Reported in the opposite order; identities follow the boxes.
    let second = tracker
        .analyse(&[
            Detection::new(304.0, 202.0, 50.0, 80.0, 0.8).with_label("bicycle"),
            Detection::new(13.0, 12.0, 50.0, 50.0, 0.9).with_label("person"),
        ])
        .unwrap();
    assert_eq!(ids(&second), vec![2, 1]);
}

#[test]
fn test_empty_frames_are_valid() {
    init_logging();
    let mut tracker = ObjectTracker::new(640, 480).unwrap();
    assert!(tracker.analyse(&[]).unwrap().is_empty());
    assert_eq!(tracker.frame_count(), 1);
    assert_eq!(tracker.frame_size(), (640, 480));
}

#[test]
fn test_malformed_batch_is_rejected_atomically() {
    init_logging();
    let mut tracker = ObjectTracker::new(640, 480).unwrap();
    tracker
        .analyse(&[Detection::new(10.0, 10.0, 50.0, 50.0, 0.9)])
        .unwrap();

    let result = tracker.analyse(&[
        Detection::new(500.0, 400.0, 20.0, 20.0, 0.9),
        Detection::new(12.0, 11.0, 50.0, 50.0, f32::NAN),
    ]);
    assert!(matches!(
        result,
        Err(TrackerError::InvalidDetection { index: 1, .. })
    ));
    assert_eq!(tracker.frame_count(), 1);
    assert_eq!(tracker.track_count(), 1);

    // Track 1 was neither aged out nor did the rejected batch allocate ids.
    let tracks = tracker
        .analyse(&[
            Detection::new(12.0, 11.0, 50.0, 50.0, 0.85),
            Detection::new(500.0, 400.0, 20.0, 20.0, 0.9),
        ])
        .unwrap();
    assert_eq!(ids(&tracks), vec![1, 2]);
}
