//! Track/frame lifecycle through schemas, views, and config

use std::io::Write;
use tempfile::NamedTempFile;
use track_oracle::{
    BoundingBox, DoubleDeletePolicy, ErrorCategory, Kw18Schema, OracleConfig, OracleCore,
    OracleError, Schema,
};

fn populated(oracle: &mut OracleCore, kw18: &Kw18Schema, frames: u64) -> track_oracle::RowHandle {
    let track = kw18.create_track(oracle);
    kw18.external_id.set(oracle, 42).unwrap();
    for n in 0..frames {
        kw18.create_frame(oracle, track).unwrap();
        kw18.frame_number.set(oracle, n).unwrap();
        kw18.timestamp_usecs.set(oracle, n * 33_333).unwrap();
        kw18.bounding_box
            .set(oracle, BoundingBox::new(0.0, 0.0, n as f64, n as f64))
            .unwrap();
        kw18.world_x.set(oracle, 1.0).unwrap();
        kw18.world_y.set(oracle, 2.0).unwrap();
    }
    track
}

#[test]
fn test_clone_track_copies_declared_fields_only() {
    let mut oracle = OracleCore::new();
    let kw18 = Kw18Schema::new(&mut oracle).unwrap();
    let src = populated(&mut oracle, &kw18, 3);
    let note = track_oracle::TrackField::<String>::register(&mut oracle, "note").unwrap();
    note.set_at(&mut oracle, src, "not kw18".to_string()).unwrap();

    let dst = kw18.clone_track(&mut oracle, src).unwrap();

    assert_eq!(kw18.external_id.get_at(&oracle, dst).unwrap(), Some(42));
    assert_eq!(note.get_at(&oracle, dst).unwrap(), None);
    let src_frames = oracle.frames(src).unwrap().to_vec();
    let dst_frames = oracle.frames(dst).unwrap().to_vec();
    assert_eq!(dst_frames.len(), 3);
    for (a, b) in src_frames.iter().zip(&dst_frames) {
        assert_ne!(a, b);
        assert_eq!(
            kw18.bounding_box.get_at(&oracle, *a).unwrap(),
            kw18.bounding_box.get_at(&oracle, *b).unwrap()
        );
        assert_eq!(oracle.owning_track(*b).unwrap(), Some(dst));
    }
    assert!(kw18.is_complete(&oracle, dst).unwrap());
}

#[test]
fn test_track_with_frames_cannot_be_deleted_directly() {
    let mut oracle = OracleCore::new();
    let kw18 = Kw18Schema::new(&mut oracle).unwrap();
    let track = populated(&mut oracle, &kw18, 2);

    let err = oracle.delete_row(track).unwrap_err();
    assert!(matches!(err, OracleError::OwnedFramesRemain { count: 2, .. }));
    assert_eq!(err.category(), ErrorCategory::Membership);

    let live_before = oracle.stats().live_rows;
    kw18.remove_track(&mut oracle, track).unwrap();
    assert_eq!(oracle.stats().live_rows, live_before - 3);
    assert_eq!(oracle.stats().slots, 0);
    assert!(!oracle.is_live(track));
}

#[test]
fn test_stale_cursor_after_remove() {
    let mut oracle = OracleCore::new();
    let kw18 = Kw18Schema::new(&mut oracle).unwrap();
    let track = populated(&mut oracle, &kw18, 1);
    let frame = kw18.get_cursor().unwrap();
    kw18.remove_track(&mut oracle, track).unwrap();

    let err = kw18.world_x.get(&oracle).unwrap_err();
    assert!(matches!(err, OracleError::StaleCursor(r) if r == frame));
    assert!(matches!(
        kw18.world_x.get_at(&oracle, frame),
        Err(OracleError::StaleRow(_))
    ));
}

#[test]
fn test_missing_fields_name_the_row() {
    let mut oracle = OracleCore::new();
    let kw18 = Kw18Schema::new(&mut oracle).unwrap();
    let track = populated(&mut oracle, &kw18, 2);
    let second = oracle.frames(track).unwrap()[1];
    kw18.world_y.remove_at_row(&mut oracle, second).unwrap();

    let missing = kw18.missing_fields(&oracle, track).unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "world_y");
    assert_eq!(missing[0].row, second);
}

#[test]
fn test_strip_track_keeps_rows() {
    let mut oracle = OracleCore::new();
    let kw18 = Kw18Schema::new(&mut oracle).unwrap();
    let track = populated(&mut oracle, &kw18, 2);
    let removed = kw18.strip_track(&mut oracle, track).unwrap();
    assert_eq!(removed, 1 + 2 * 5);
    assert!(oracle.is_live(track));
    assert_eq!(oracle.frames(track).unwrap().len(), 2);
}

#[test]
fn test_row_views() {
    let mut oracle = OracleCore::new();
    let kw18 = Kw18Schema::new(&mut oracle).unwrap();
    let track = populated(&mut oracle, &kw18, 2);

    {
        let mut view = oracle.view_mut(track).unwrap();
        view.set(&kw18.external_id, 7)
            .unwrap()
            .set(&kw18.external_id, 8)
            .unwrap();
    }
    let view = oracle.view(track).unwrap();
    assert_eq!(view.get(&kw18.external_id).unwrap(), Some(8));
    assert_eq!(view.fields().unwrap(), vec![kw18.external_id.handle()]);
    for &frame in view.frames().unwrap() {
        let bound = kw18.frame_number.at(frame);
        assert!(bound.exists(&oracle).unwrap());
    }
}

#[test]
fn test_double_delete_policy_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "double_delete = \"error\"").unwrap();
    writeln!(file, "initial_row_capacity = 16").unwrap();

    let config = OracleConfig::from_file(file.path()).unwrap();
    assert_eq!(config.double_delete, DoubleDeletePolicy::Error);
    assert!(config.validate_coordinates);

    let mut oracle = OracleCore::with_config(config);
    let rows: Vec<_> = (0..40).map(|_| oracle.create_row()).collect();
    oracle.delete_row(rows[39]).unwrap();
    assert!(matches!(
        oracle.delete_row(rows[39]),
        Err(OracleError::DoubleDelete(_))
    ));
    assert_eq!(oracle.stats().live_rows, 39);
    assert_eq!(oracle.stats().deleted_rows, 1);
}
