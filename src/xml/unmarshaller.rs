use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::{debug, error};
use quick_xml::{
    NsReader, Writer,
    events::{BytesStart, Event},
    name::{Namespace, ResolveResult},
};
use serde::de::DeserializeOwned;

use crate::core::name::QualifiedName;
use crate::core::wrapper::{RootElement, Wrapper};
use crate::error::BindError;

/// Where an [`Unmarshaller`] reads a document from.
pub enum UnmarshalSource<'a> {
    Path(&'a Path),
    Text(&'a str),
    Bytes(&'a [u8]),
    Reader(Box<dyn BufRead + 'a>),
}

impl<'a> UnmarshalSource<'a> {
    /// Reads from any `Read` implementation, buffering it.
    pub fn reader<R: Read + 'a>(rdr: R) -> Self {
        UnmarshalSource::Reader(Box::new(BufReader::new(rdr)))
    }
}

impl<'a> From<&'a Path> for UnmarshalSource<'a> {
    fn from(path: &'a Path) -> Self {
        UnmarshalSource::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for UnmarshalSource<'a> {
    fn from(path: &'a PathBuf) -> Self {
        UnmarshalSource::Path(path.as_path())
    }
}

impl<'a> From<&'a str> for UnmarshalSource<'a> {
    fn from(text: &'a str) -> Self {
        UnmarshalSource::Text(text)
    }
}

impl<'a> From<&'a [u8]> for UnmarshalSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        UnmarshalSource::Bytes(bytes)
    }
}

/// Reads a wrapped list of `T` from an XML document.
///
/// The first element of the document is taken as the wrapper root, whatever its name.
/// Each direct child named after the bound element is deserialized into a `T`; other
/// children are skipped.
pub struct Unmarshaller<T> {
    element_name: String,
    capacity: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Unmarshaller<T> {
    pub(crate) fn new(element_name: String) -> Self {
        Self {
            element_name,
            capacity: 1024,
            _marker: PhantomData,
        }
    }

    /// Sets the read buffer capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Reads the document from `source`.
    pub fn unmarshal(
        &self,
        source: UnmarshalSource<'_>,
    ) -> Result<RootElement<Wrapper<T>>, BindError> {
        match source {
            UnmarshalSource::Path(path) => {
                let file = File::open(path).map_err(|e| {
                    error!("Failed to open XML file {}: {}", path.display(), e);
                    BindError::Unmarshal(format!(
                        "Failed to open XML file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                self.read_from(BufReader::with_capacity(self.capacity, file))
            }
            UnmarshalSource::Text(text) => self.read_from(text.as_bytes()),
            UnmarshalSource::Bytes(bytes) => self.read_from(bytes),
            UnmarshalSource::Reader(rdr) => self.read_from(rdr),
        }
    }

    fn read_from<R: BufRead>(&self, rdr: R) -> Result<RootElement<Wrapper<T>>, BindError> {
        let mut reader = NsReader::from_reader(rdr);
        let mut buffer = Vec::with_capacity(self.capacity);

        // Anything before the first element is prolog.
        let (root_name, has_children) = loop {
            buffer.clear();
            match reader.read_event_into(&mut buffer).map_err(parse_error)? {
                Event::Start(start) => break (resolve_name(&reader, &start), true),
                Event::Empty(start) => break (resolve_name(&reader, &start), false),
                Event::Eof => {
                    return Err(BindError::Unmarshal("premature end of file".to_string()));
                }
                _ => continue,
            }
        };
        debug!("Found root element {}", root_name);

        let mut wrapper = Wrapper::of(Vec::new());
        if has_children {
            let element_name = self.element_name.as_bytes();
            loop {
                buffer.clear();
                match reader.read_event_into(&mut buffer).map_err(parse_error)? {
                    Event::Start(start) if start.local_name().as_ref() == element_name => {
                        let xml = capture_element(&mut reader, start)?;
                        wrapper.push(self.bind(&xml)?);
                    }
                    Event::Empty(start) if start.local_name().as_ref() == element_name => {
                        let mut writer = Writer::new(Vec::new());
                        writer
                            .write_event(Event::Empty(start))
                            .map_err(parse_error)?;
                        let xml = String::from_utf8(writer.into_inner()).map_err(parse_error)?;
                        wrapper.push(self.bind(&xml)?);
                    }
                    Event::Start(start) => {
                        let end = start.to_end().into_owned();
                        debug!(
                            "Skipping unbound element <{}>",
                            String::from_utf8_lossy(end.name().as_ref())
                        );
                        let mut skipped = Vec::new();
                        reader
                            .read_to_end_into(end.name(), &mut skipped)
                            .map_err(parse_error)?;
                    }
                    Event::Empty(start) => {
                        debug!(
                            "Skipping unbound element <{}>",
                            String::from_utf8_lossy(start.name().as_ref())
                        );
                    }
                    Event::End(_) => break,
                    Event::Eof => {
                        return Err(BindError::Unmarshal(format!(
                            "unexpected end of file inside {}",
                            root_name
                        )));
                    }
                    _ => continue,
                }
            }
        }
        check_epilog(&mut reader, &mut buffer)?;

        debug!(
            "Unmarshalled {} <{}> element(s)",
            wrapper.len(),
            self.element_name
        );
        Ok(RootElement::new(root_name, wrapper))
    }

    fn bind(&self, xml: &str) -> Result<T, BindError> {
        quick_xml::de::from_str(xml).map_err(|e| {
            debug!("Failed to deserialize XML element: {} from: {}", e, xml);
            BindError::Unmarshal(format!(
                "Failed to deserialize <{}>: {}",
                self.element_name, e
            ))
        })
    }
}

/// Only comments, processing instructions and whitespace may follow the root element.
fn check_epilog<R: BufRead>(
    reader: &mut NsReader<R>,
    buffer: &mut Vec<u8>,
) -> Result<(), BindError> {
    loop {
        buffer.clear();
        match reader.read_event_into(buffer).map_err(parse_error)? {
            Event::Eof => return Ok(()),
            Event::Comment(_) | Event::PI(_) => continue,
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => continue,
            event => {
                return Err(BindError::Unmarshal(format!(
                    "content is not allowed after the root element: {:?}",
                    event
                )));
            }
        }
    }
}

fn resolve_name<R>(reader: &NsReader<R>, start: &BytesStart<'_>) -> QualifiedName {
    let (namespace, local_name) = reader.resolver().resolve_element(start.name());
    let namespace_uri = match namespace {
        ResolveResult::Bound(Namespace(uri)) => String::from_utf8_lossy(uri).into_owned(),
        _ => String::new(),
    };
    QualifiedName::new(
        namespace_uri,
        String::from_utf8_lossy(local_name.as_ref()).into_owned(),
    )
}

/// Copies the events of the element opened by `start` into a standalone document.
fn capture_element<R: BufRead>(
    reader: &mut NsReader<R>,
    start: BytesStart<'_>,
) -> Result<String, BindError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Start(start))
        .map_err(parse_error)?;

    let mut buffer = Vec::new();
    let mut depth = 1_usize;
    while depth > 0 {
        buffer.clear();
        let event = reader.read_event_into(&mut buffer).map_err(parse_error)?;
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(BindError::Unmarshal("unexpected end of file".to_string()));
            }
            _ => {}
        }
        writer.write_event(event).map_err(parse_error)?;
    }

    String::from_utf8(writer.into_inner()).map_err(parse_error)
}

fn parse_error<E: Display>(error: E) -> BindError {
    BindError::Unmarshal(format!("XML parsing error: {}", error))
}
