#![no_main]

use arbitrary::Arbitrary;
use binwire_codec::{marshal, unmarshal, unmarshal_partial, Error, Read, Write};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone, Default, PartialEq, Read, Write)]
struct Inner {
    flag: bool,
    #[codec(tag = "len:4")]
    label: Vec<u8>,
    values: Vec<i32>,
}

#[derive(Arbitrary, Debug, Clone, PartialEq, Read, Write)]
struct Record {
    id: u64,
    delta: i16,
    name: String,
    #[codec(tag = "8")]
    code: String,
    #[codec(tag = "-")]
    ignored: u32,
    children: Vec<Inner>,
    digest: [u8; 3],
    pair: (u8, u16),
}

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Record(Record, Vec<u8>),
    Sequence(Vec<u32>),
    Raw(Vec<u8>),
}

/// Truncates and pads the fixed-length fields the way the encoder does.
fn normalize(mut record: Record) -> Record {
    let mut end = record.code.len().min(8);
    while !record.code.is_char_boundary(end) {
        end -= 1;
    }
    record.code.truncate(end);
    let kept = record.code.trim_end_matches('\0').len();
    record.code.truncate(kept);
    record.ignored = 0;
    for child in &mut record.children {
        child.label.resize(4, 0);
    }
    record
}

fn fuzz_record(record: Record, suffix: Vec<u8>) {
    let encoded = marshal(&record).expect("failed to encode record");

    let mut data = encoded.to_vec();
    data.extend_from_slice(&suffix);
    let (remaining, result) = unmarshal_partial::<Record>(&data[..]);
    let decoded = result.expect("failed to decode encoded record");
    assert_eq!(remaining, suffix.len());

    // Encoding is deterministic.
    let reencoded = marshal(&decoded).expect("failed to re-encode record");
    assert_eq!(marshal(&decoded).unwrap(), reencoded);

    assert_eq!(decoded, normalize(record));
    assert_eq!(reencoded, encoded);

    if !suffix.is_empty() {
        assert!(matches!(
            unmarshal::<Record>(&data[..]),
            Err(Error::TrailingData(n)) if n == suffix.len()
        ));
    }
}

fn fuzz_sequence(values: Vec<u32>) {
    let encoded = marshal(&values).expect("failed to encode sequence");
    assert_eq!(encoded.len(), 4 + values.len() * 4);
    let decoded: Vec<u32> = unmarshal(encoded).expect("failed to decode sequence");
    assert_eq!(decoded, values);
}

fn fuzz_raw(data: Vec<u8>) {
    let (remaining, result) = unmarshal_partial::<Record>(Bytes::from(data.clone()));
    assert!(remaining <= data.len());
    if let Ok(decoded) = result {
        // Whatever was accepted re-encodes to a stable canonical form.
        let encoded = marshal(&decoded).expect("failed to re-encode record");
        let again: Record = unmarshal(encoded.clone()).expect("failed to decode canonical form");
        assert_eq!(marshal(&again).unwrap(), encoded);
    }
}

fuzz_target!(|input: FuzzInput| {
    match input {
        FuzzInput::Record(record, suffix) => fuzz_record(record, suffix),
        FuzzInput::Sequence(values) => fuzz_sequence(values),
        FuzzInput::Raw(data) => fuzz_raw(data),
    }
});
