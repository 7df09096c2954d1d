use super::*;

#[test]
fn generic_error_is_destructive() {
    let toast = Toast::generic_error();
    assert_eq!(toast.title, GENERIC_ERROR_TITLE);
    assert_eq!(toast.description, GENERIC_ERROR_DESCRIPTION);
    assert_eq!(toast.variant, ToastVariant::Destructive);
}

#[test]
fn success_uses_default_variant() {
    let toast = Toast::success("Done", "saved");
    assert_eq!(toast.variant, ToastVariant::Default);
    assert_eq!(toast.variant.as_str(), "default");
}

#[test]
fn buffer_keeps_arrival_order() {
    let buffer = ToastBuffer::new();
    buffer.notify(Toast::success("one", ""));
    buffer.notify(Toast::error("two", ""));
    let titles: Vec<String> = buffer.snapshot().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["one", "two"]);
}

#[test]
fn buffer_clones_share_storage() {
    let buffer = ToastBuffer::new();
    let sink = buffer.clone();
    sink.notify(Toast::generic_error());
    assert_eq!(buffer.snapshot().len(), 1);
}

#[test]
fn drain_empties_buffer() {
    let buffer = ToastBuffer::new();
    buffer.notify(Toast::generic_error());
    assert_eq!(buffer.drain().len(), 1);
    assert!(buffer.drain().is_empty());
}

#[test]
fn toast_serializes_variant_lowercase() {
    let json = serde_json::to_value(Toast::generic_error()).unwrap();
    assert_eq!(json["variant"], "destructive");
}

#[test]
fn teach_offered_names_the_skill() {
    let toast = Toast::teach_offered("Pottery");
    assert_eq!(toast.title, TEACH_TITLE);
    assert!(toast.description.contains("Pottery"));
    assert_eq!(toast.variant, ToastVariant::Default);
}
