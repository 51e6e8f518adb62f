use super::*;
use serde_json::json;

#[test]
fn warnings_serialize_with_kind_tag() {
    let w = CompileWarning::InvalidFrameWindow {
        item_id: "a".to_owned(),
        start_frame: 15,
        end_frame: 15,
    };
    assert_eq!(
        serde_json::to_value(&w).unwrap(),
        json!({"kind": "invalidFrameWindow", "itemId": "a", "startFrame": 15, "endFrame": 15})
    );
}

#[test]
fn display_names_the_item() {
    let w = CompileWarning::UnknownItemType {
        item_id: "x".to_owned(),
        item_type: "lottie".to_owned(),
    };
    assert_eq!(w.to_string(), "item 'x' has unknown type 'lottie'");
    assert_eq!(w.item_id(), "x");
}

#[test]
fn collecting_and_closure_observers_receive_in_order() {
    let a = CompileWarning::MissingItem {
        item_id: "a".to_owned(),
    };
    let b = CompileWarning::MissingItem {
        item_id: "b".to_owned(),
    };

    let mut collector = CollectingObserver::new();
    collector.on_warning(&a);
    collector.on_warning(&b);
    assert_eq!(collector.warnings(), [a.clone(), b.clone()]);

    let mut seen = Vec::new();
    let mut closure = |w: &CompileWarning| seen.push(w.item_id().to_owned());
    closure.on_warning(&a);
    closure.on_warning(&b);
    assert_eq!(seen, ["a", "b"]);
}

#[test]
fn invalid_item_names_the_item_and_decoder_message() {
    let w = CompileWarning::InvalidItem {
        item_id: "b".to_owned(),
        message: "invalid type: null".to_owned(),
    };
    assert_eq!(w.item_id(), "b");
    assert_eq!(w.to_string(), "item 'b' is malformed: invalid type: null");
    assert_eq!(
        serde_json::to_value(&w).unwrap(),
        json!({"kind": "invalidItem", "itemId": "b", "message": "invalid type: null"})
    );

    let mut collector = CollectingObserver::new();
    collector.on_warning(&w);
    assert_eq!(collector.into_warnings(), [w]);
}
