use super::*;
use crate::timeline::model::{CompositionSettings, ItemKind};

#[test]
fn parses_minimal_document_with_fps_alias() {
    let doc = TimelineDocument::from_json_str(
        r#"{"trackItemsMap": {}, "trackItemIds": [], "fps": 25, "duration": 10000}"#,
    )
    .unwrap();
    doc.validate().unwrap();
    assert_eq!(doc.fps_or(|| Ok(Fps::default())).unwrap().get(), 25);
    assert_eq!(doc.duration_ms_or(3000.0), 10000.0);
}

#[test]
fn missing_map_and_ids_is_a_hard_failure() {
    let doc = TimelineDocument::from_json_str(r#"{"duration": 1000}"#).unwrap();
    let err = doc.validate().unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn one_of_map_or_ids_is_enough() {
    let only_ids = TimelineDocument::from_json_str(r#"{"trackItemIds": ["a"]}"#).unwrap();
    only_ids.validate().unwrap();
    assert_eq!(only_ids.item_ids(), ["a".to_owned()]);
    assert!(only_ids.item("a").is_none());
    assert!(only_ids.item("b").is_none());

    let only_map = TimelineDocument::from_json_str(r#"{"trackItemsMap": {}}"#).unwrap();
    only_map.validate().unwrap();
    assert!(only_map.item_ids().is_empty());
}

#[test]
fn zero_frame_rate_is_rejected() {
    let doc =
        TimelineDocument::from_json_str(r#"{"trackItemIds": [], "frameRate": 0}"#).unwrap();
    assert!(doc.validate().is_err());
    assert!(doc.fps_or(|| Ok(Fps::default())).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = TimelineDocument::from_json_str("{").unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn composition_settings_override_size_and_default_fps() {
    let mut doc = TimelineDocument {
        track_item_ids: Some(vec![]),
        size: Some(Canvas {
            width: 720,
            height: 1280,
        }),
        ..TimelineDocument::default()
    };
    assert_eq!(doc.canvas_or(Canvas::default()).width, 720);

    doc.composition_settings = Some(CompositionSettings {
        width: Some(1920),
        height: None,
        fps: Some(24),
    });
    let canvas = doc.canvas_or(Canvas::default());
    assert_eq!((canvas.width, canvas.height), (1920, 1280));
    assert_eq!(doc.fps_or(|| Ok(Fps::default())).unwrap().get(), 24);

    doc.frame_rate = Some(60);
    assert_eq!(doc.fps_or(|| Ok(Fps::default())).unwrap().get(), 60);
}

#[test]
fn missing_file_reports_path() {
    let err = TimelineDocument::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn default_frame_rate_is_only_consulted_when_undeclared() {
    let doc = TimelineDocument::from_json_str(r#"{"trackItemIds": [], "frameRate": 30}"#).unwrap();
    let fps = doc
        .fps_or(|| Err(ReelError::validation("unused default")))
        .unwrap();
    assert_eq!(fps.get(), 30);

    let doc = TimelineDocument::from_json_str(r#"{"trackItemIds": []}"#).unwrap();
    assert!(doc.fps_or(|| Err(ReelError::validation("no default"))).is_err());
}

#[test]
fn null_sections_and_bad_items_stay_local() {
    let doc = TimelineDocument::from_json_str(
        r#"{
            "trackItemsMap": {
                "a": {"type": "video", "display": null, "trim": null, "details": null, "metadata": null},
                "b": {"type": "text", "details": {"fontSize": "48"}},
                "c": {"id": null, "type": null}
            },
            "trackItemIds": ["a", "b", "c"]
        }"#,
    )
    .unwrap();
    doc.validate().unwrap();

    let a = doc.item("a").unwrap().unwrap();
    assert_eq!(a.kind, ItemKind::Video);
    assert_eq!(a.trim.from, None);
    assert!(a.details.src.is_none());
    assert!(a.metadata.is_empty());

    let err = doc.item("b").unwrap().unwrap_err();
    assert!(err.to_string().contains("expected f64"));

    let c = doc.item("c").unwrap().unwrap();
    assert!(c.id.is_empty());
    assert_eq!(c.kind, ItemKind::Other(String::new()));
}
