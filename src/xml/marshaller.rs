use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};

use log::{debug, error};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesStart, Event},
};
use serde::Serialize;

use crate::core::wrapper::{RootElement, Wrapper};
use crate::error::BindError;
use crate::xml::target::MarshalTarget;

/// Property key: indent nested elements (`true`/`false`).
pub const FORMATTED_OUTPUT: &str = "xml.formatted.output";
/// Property key: omit the XML declaration (`true`/`false`).
pub const FRAGMENT: &str = "xml.fragment";
/// Property key: value of `xsi:schemaLocation` on the root element.
pub const SCHEMA_LOCATION: &str = "xml.schema.location";
/// Property key: value of `xsi:noNamespaceSchemaLocation` on the root element.
pub const NO_NAMESPACE_SCHEMA_LOCATION: &str = "xml.no.namespace.schema.location";
/// Property key: number of indent characters per level.
pub const INDENT_SIZE: &str = "xml.indent.size";

const XSI_NS_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Writes a wrapped list as an XML document.
///
/// A marshaller is created by a [`BindingContext`](crate::xml::BindingContext) and
/// configured with builder-style setters or string-keyed properties:
///
/// ```
/// use xml_list_bind::xml::BindingContext;
/// use xml_list_bind::xml::marshaller::FORMATTED_OUTPUT;
///
/// struct Item;
///
/// let context = BindingContext::<Item>::new().unwrap();
/// let mut marshaller = context.create_marshaller().fragment(true);
/// marshaller.set_property(FORMATTED_OUTPUT, "true").unwrap();
///
/// assert!(marshaller.is_formatted_output());
/// assert!(marshaller.set_property("xml.unknown", "1").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Marshaller {
    element_name: String,
    formatted_output: bool,
    indent_char: u8,
    indent_size: usize,
    fragment: bool,
    schema_location: Option<String>,
    no_namespace_schema_location: Option<String>,
}

impl Marshaller {
    pub(crate) fn new(element_name: String) -> Self {
        Self {
            element_name,
            formatted_output: false,
            indent_char: b' ',
            indent_size: 4,
            fragment: false,
            schema_location: None,
            no_namespace_schema_location: None,
        }
    }

    /// Indents nested elements when `true`.
    pub fn formatted_output(mut self, formatted_output: bool) -> Self {
        self.formatted_output = formatted_output;
        self
    }

    /// Sets the indentation used for formatted output.
    pub fn indent(mut self, indent_char: u8, indent_size: usize) -> Self {
        self.indent_char = indent_char;
        self.indent_size = indent_size;
        self
    }

    /// Omits the XML declaration when `true`.
    pub fn fragment(mut self, fragment: bool) -> Self {
        self.fragment = fragment;
        self
    }

    pub fn schema_location<S: Into<String>>(mut self, schema_location: S) -> Self {
        self.schema_location = Some(schema_location.into());
        self
    }

    pub fn no_namespace_schema_location<S: Into<String>>(mut self, location: S) -> Self {
        self.no_namespace_schema_location = Some(location.into());
        self
    }

    /// Sets a property by key. Unknown keys and unparsable values are rejected.
    pub fn set_property(&mut self, key: &str, value: &str) -> Result<(), BindError> {
        match key {
            FORMATTED_OUTPUT => self.formatted_output = parse_bool(key, value)?,
            FRAGMENT => self.fragment = parse_bool(key, value)?,
            SCHEMA_LOCATION => self.schema_location = Some(value.to_string()),
            NO_NAMESPACE_SCHEMA_LOCATION => {
                self.no_namespace_schema_location = Some(value.to_string())
            }
            INDENT_SIZE => {
                self.indent_size = value.trim().parse().map_err(|_| {
                    BindError::Property(format!("{} expects a number, got {:?}", key, value))
                })?
            }
            _ => return Err(BindError::Property(format!("unknown property {:?}", key))),
        }
        Ok(())
    }

    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    pub fn is_formatted_output(&self) -> bool {
        self.formatted_output
    }

    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    /// Writes `root` to `target`.
    ///
    /// Failures of the XML writer are reported as [`BindError::Marshal`]; a target that
    /// cannot be opened is reported as [`BindError::Dispatch`].
    pub fn marshal<E: Serialize>(
        &self,
        root: &RootElement<Wrapper<E>>,
        target: MarshalTarget<'_>,
    ) -> Result<(), BindError> {
        debug!(
            "Marshalling {} element(s) as <{}> to {}",
            root.value().len(),
            self.element_name,
            target
        );
        match target {
            MarshalTarget::XmlWriter(writer) => self.write_root(root, writer),
            MarshalTarget::File(file) => self.write_to(root, file),
            MarshalTarget::Path(path) => {
                let file = File::create(path).map_err(|source| {
                    error!("Failed to create XML file {}: {}", path.display(), source);
                    BindError::Dispatch {
                        target: path.display().to_string(),
                        source,
                    }
                })?;
                self.write_to(root, BufWriter::new(file))
            }
            MarshalTarget::Bytes(bytes) => self.write_to(root, bytes),
            MarshalTarget::Text(text) => {
                let mut buffer = Vec::new();
                self.write_to(root, &mut buffer)?;
                let xml = String::from_utf8(buffer).map_err(marshal_error)?;
                text.push_str(&xml);
                Ok(())
            }
            MarshalTarget::Stream(stream) => self.write_to(root, stream),
        }
    }

    fn write_to<W: Write, E: Serialize>(
        &self,
        root: &RootElement<Wrapper<E>>,
        sink: W,
    ) -> Result<(), BindError> {
        let mut writer = if self.formatted_output {
            Writer::new_with_indent(sink, self.indent_char, self.indent_size)
        } else {
            Writer::new(sink)
        };
        self.write_root(root, &mut writer)?;
        writer.into_inner().flush().map_err(marshal_error)
    }

    fn write_root<W: Write, E: Serialize>(
        &self,
        root: &RootElement<Wrapper<E>>,
        writer: &mut Writer<W>,
    ) -> Result<(), BindError> {
        if !self.fragment {
            let decl = BytesDecl::new("1.0", Some("UTF-8"), Some("yes"));
            writer
                .write_event(Event::Decl(decl))
                .map_err(marshal_error)?;
        }

        let name = root.name();
        let mut start = BytesStart::new(name.local_part());
        if !name.namespace_uri().is_empty() {
            start.push_attribute(("xmlns", name.namespace_uri()));
        }
        if self.schema_location.is_some() || self.no_namespace_schema_location.is_some() {
            start.push_attribute(("xmlns:xsi", XSI_NS_URI));
        }
        if let Some(location) = &self.schema_location {
            start.push_attribute(("xsi:schemaLocation", location.as_str()));
        }
        if let Some(location) = &self.no_namespace_schema_location {
            start.push_attribute(("xsi:noNamespaceSchemaLocation", location.as_str()));
        }

        let elements = root.value().elements();
        if elements.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(marshal_error);
        }

        let end = start.to_end().into_owned();
        writer
            .write_event(Event::Start(start))
            .map_err(marshal_error)?;
        for element in elements {
            writer
                .write_serializable(&self.element_name, element)
                .map_err(marshal_error)?;
        }
        writer.write_event(Event::End(end)).map_err(marshal_error)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, BindError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(BindError::Property(format!(
            "{} expects true or false, got {:?}",
            key, value
        ))),
    }
}

fn marshal_error<E: Display>(error: E) -> BindError {
    BindError::Marshal(error.to_string())
}
