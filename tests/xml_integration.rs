mod common;

use std::{
    fs::{self, read_to_string},
    io::{self, Cursor, Seek, SeekFrom, Write},
    path::PathBuf,
};

use ::serde::{Deserialize, Serialize};
use common::mocks::MockSink;
use quick_xml::{Reader, Writer, events::Event};
use tempfile::NamedTempFile;
use xml_list_bind::{
    core::name::NS_URI,
    error::BindError,
    marshal, marshal_with, unmarshal,
    xml::{BindingContext, MarshalTarget, UnmarshalSource},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Marker {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Product {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@available")]
    available: bool,
    name: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

fn products() -> Vec<Product> {
    vec![
        Product {
            id: "P001".to_string(),
            available: true,
            name: "Wireless Headphones".to_string(),
            price: 79.99,
            description: Some("Noise-cancelling, 20hr battery life".to_string()),
        },
        Product {
            id: "P002".to_string(),
            available: false,
            name: "USB-C Cable".to_string(),
            price: 12.99,
            description: None,
        },
        Product {
            id: "P003".to_string(),
            available: true,
            name: "Smart Watch".to_string(),
            price: 149.99,
            description: Some("Heart rate <monitor> & GPS".to_string()),
        },
    ]
}

/// Counts start and empty elements named `name`, failing on malformed XML.
fn count_elements(xml: &str, name: &str) -> usize {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == name.as_bytes() => {
                count += 1
            }
            Event::Eof => return count,
            _ => {}
        }
    }
}

#[test]
fn marshal_two_markers_to_a_temporary_file() {
    let markers = vec![Marker {}, Marker {}];
    let file = NamedTempFile::new().unwrap();

    marshal_with(&markers, file.path(), |marshaller| {
        Ok(marshaller.formatted_output(true))
    })
    .unwrap();

    let content = read_to_string(file.path()).unwrap();
    println!("Generated XML:\n{}", content);

    assert_eq!(count_elements(&content, "wrapper"), 1);
    assert_eq!(count_elements(&content, "marker"), 2);
    assert!(content.contains(&format!(r#"<wrapper xmlns="{}">"#, NS_URI)));

    let read: Vec<Marker> = unmarshal(file.path()).unwrap();
    assert_eq!(read, markers);
}

#[test]
fn round_trip_through_a_path() {
    let file = NamedTempFile::new().unwrap();
    marshal(&products(), file.path()).unwrap();

    let read: Vec<Product> = unmarshal(file.path()).unwrap();
    assert_eq!(read, products());
}

#[test]
fn round_trip_through_an_open_file() {
    let mut file = tempfile::tempfile().unwrap();
    marshal(&products(), &mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let read: Vec<Product> = unmarshal(UnmarshalSource::reader(file)).unwrap();
    assert_eq!(read, products());
}

#[test]
fn round_trip_through_a_stream() {
    let mut cursor = Cursor::new(Vec::new());
    let stream: &mut dyn Write = &mut cursor;
    marshal(&products(), stream).unwrap();

    let read: Vec<Product> = unmarshal(cursor.get_ref().as_slice()).unwrap();
    assert_eq!(read, products());
}

#[test]
fn empty_list_round_trips_through_a_file() {
    let file = NamedTempFile::new().unwrap();
    marshal(&Vec::<Product>::new(), file.path()).unwrap();

    let content = read_to_string(file.path()).unwrap();
    assert_eq!(count_elements(&content, "wrapper"), 1);
    assert_eq!(count_elements(&content, "product"), 0);

    let read: Vec<Product> = unmarshal(file.path()).unwrap();
    assert!(read.is_empty());
}

#[test]
fn pretty_printing_only_changes_whitespace() {
    let mut plain = String::new();
    marshal(&products(), &mut plain).unwrap();

    let mut formatted = String::new();
    marshal_with(&products(), &mut formatted, |marshaller| {
        Ok(marshaller.formatted_output(true))
    })
    .unwrap();

    assert!(!plain.contains('\n'));
    assert!(formatted.contains("\n    <product id=\"P001\" available=\"true\">"));
    assert_eq!(
        plain,
        formatted
            .lines()
            .map(str::trim_start)
            .collect::<Vec<_>>()
            .concat()
    );
}

#[test]
fn structured_writer_receives_the_document() {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    marshal_with(&products(), &mut writer, |marshaller| {
        Ok(marshaller.fragment(true))
    })
    .unwrap();

    let xml = String::from_utf8(writer.into_inner()).unwrap();
    assert!(xml.starts_with("<wrapper"));
    assert!(xml.contains("\n  <product"));

    let read: Vec<Product> = unmarshal(xml.as_str()).unwrap();
    assert_eq!(read, products());
}

#[test]
fn runtime_resolved_targets_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut path = dir.path().join("products.xml");

    marshal(&products(), MarshalTarget::from_any(&mut path).unwrap()).unwrap();
    let read: Vec<Product> = unmarshal(&path).unwrap();
    assert_eq!(read, products());

    let mut text = String::new();
    marshal(&products(), MarshalTarget::from_any(&mut text).unwrap()).unwrap();
    assert_eq!(text, fs::read_to_string(&path).unwrap());
}

#[test]
fn unsupported_runtime_targets_are_rejected() {
    let mut count = 42_u64;
    let result = MarshalTarget::from_any(&mut count);
    match result {
        Err(error @ BindError::NoMatchingTarget { .. }) => {
            assert!(error.is_invalid_argument());
            assert!(error.to_string().contains("u64"));
        }
        other => panic!("expected no matching target, got {:?}", other),
    }
}

#[test]
fn unwritable_path_is_a_dispatch_failure() {
    let path = PathBuf::from("/nonexistent/directory/products.xml");
    let result = marshal(&products(), &path);

    match result {
        Err(error @ BindError::Dispatch { .. }) => {
            assert!(!error.is_binding_failure());
            assert!(error.to_string().contains("products.xml"));
        }
        other => panic!("expected a dispatch failure, got {:?}", other),
    }
}

#[test]
fn stream_failures_surface_as_binding_failures() {
    let mut sink = MockSink::new();
    sink.expect_write()
        .returning(|_| Err(io::Error::other("disk full")));
    sink.expect_flush().returning(|| Ok(()));

    let result = marshal(&products(), MarshalTarget::Stream(&mut sink));

    match result {
        Err(BindError::Marshal(message)) => assert!(message.contains("disk full")),
        other => panic!("expected a marshal failure, got {:?}", other),
    }
}

#[test]
fn flush_failures_surface_as_binding_failures() {
    let mut sink = MockSink::new();
    sink.expect_write().returning(|buf| Ok(buf.len()));
    sink.expect_flush()
        .times(1)
        .returning(|| Err(io::Error::other("connection reset")));

    let error = marshal(&products(), MarshalTarget::Stream(&mut sink)).unwrap_err();
    assert!(error.is_binding_failure());
    assert!(error.to_string().contains("connection reset"));
}

#[test]
fn custom_element_names_round_trip() {
    let context = BindingContext::<Product>::new()
        .unwrap()
        .with_element_name("item")
        .unwrap();

    let mut xml = String::new();
    context
        .create_marshaller()
        .marshal(&context.wrap(&products()), MarshalTarget::Text(&mut xml))
        .unwrap();
    assert_eq!(count_elements(&xml, "item"), 3);
    assert_eq!(count_elements(&xml, "product"), 0);

    // The default binding looks for <product> and finds none.
    let unbound: Vec<Product> = unmarshal(xml.as_str()).unwrap();
    assert!(unbound.is_empty());

    let read = context
        .create_unmarshaller()
        .unmarshal(UnmarshalSource::Text(&xml))
        .unwrap();
    assert_eq!(read.name().local_part(), "wrapper");
    assert_eq!(read.name().namespace_uri(), NS_URI);
    assert_eq!(read.into_value().into_elements(), products());
}

#[test]
fn malformed_files_are_binding_failures() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"<wrapper><product id=\"P001\" available=\"true\"><name>Cable</name>")
        .unwrap();

    let error = unmarshal::<Product>(file.path()).unwrap_err();
    assert!(error.is_binding_failure());
}
