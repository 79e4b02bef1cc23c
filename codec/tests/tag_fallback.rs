//! Tests for run-time tag resolution and its warnings.

use binwire_codec::{record, FieldDescriptor, Tag};
use bytes::BytesMut;
use std::{
    io,
    sync::{Arc, Mutex},
};

/// Collects formatted log output.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn with_captured<R>(f: impl FnOnce() -> R) -> (R, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured.contents())
}

#[test]
fn test_malformed_tag_warns_and_falls_back() {
    let (field, logs) = with_captured(|| FieldDescriptor::parse("name", "len:abc"));
    assert_eq!(field.tag(), Tag::None);
    assert!(logs.contains("WARN"));
    assert!(logs.contains("malformed length tag"));
    assert!(logs.contains("len:abc"));

    // The field uses default, length-prefixed framing.
    let mut buf = BytesMut::new();
    record::write_field("hi", &mut buf, &field).unwrap();
    assert_eq!(&buf[..], &[2, 0, 0, 0, b'h', b'i']);
    let decoded: String = record::read_field(&mut &buf[..], &field).unwrap();
    assert_eq!(decoded, "hi");
}

#[test]
fn test_valid_tags_do_not_warn() {
    let (fields, logs) = with_captured(|| {
        [
            FieldDescriptor::parse("a", ""),
            FieldDescriptor::parse("b", "-"),
            FieldDescriptor::parse("c", "len:3"),
        ]
    });
    assert_eq!(fields[0].tag(), Tag::None);
    assert_eq!(fields[1].tag(), Tag::Excluded);
    assert_eq!(fields[2].tag(), Tag::Fixed(3));
    assert!(logs.is_empty());
}
