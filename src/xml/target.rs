use std::any::{Any, type_name};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use quick_xml::Writer;

use crate::error::BindError;

/// A destination a [`Marshaller`](crate::xml::Marshaller) can write to.
///
/// Targets are usually picked at compile time through the `From` conversions. When
/// the destination's type is only known at run time, [`MarshalTarget::from_any`]
/// resolves it against the supported kinds in declaration order.
pub enum MarshalTarget<'a> {
    /// A structured writer. Its own indentation settings apply.
    XmlWriter(&'a mut Writer<Vec<u8>>),
    File(&'a mut File),
    /// A file created, or truncated, at the given path.
    Path(&'a Path),
    /// A byte buffer the document is appended to.
    Bytes(&'a mut Vec<u8>),
    /// A string the document is appended to.
    Text(&'a mut String),
    Stream(&'a mut dyn Write),
}

impl<'a> MarshalTarget<'a> {
    /// Resolves `target` by its concrete type.
    ///
    /// Accepted types, in order: `quick_xml::Writer<Vec<u8>>`, `File`, `PathBuf`,
    /// `Vec<u8>`, `String` and `Box<dyn Write>`. Any other type fails with
    /// [`BindError::NoMatchingTarget`].
    ///
    /// ```
    /// use xml_list_bind::xml::MarshalTarget;
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// assert!(matches!(
    ///     MarshalTarget::from_any(&mut buffer),
    ///     Ok(MarshalTarget::Bytes(_))
    /// ));
    ///
    /// let mut count = 0_u32;
    /// assert!(MarshalTarget::from_any(&mut count).is_err());
    /// ```
    pub fn from_any<A: Any>(target: &'a mut A) -> Result<Self, BindError> {
        let target: &'a mut dyn Any = target;
        let resolved = if target.is::<Writer<Vec<u8>>>() {
            target.downcast_mut().map(MarshalTarget::XmlWriter)
        } else if target.is::<File>() {
            target.downcast_mut().map(MarshalTarget::File)
        } else if target.is::<PathBuf>() {
            target
                .downcast_mut::<PathBuf>()
                .map(|path| MarshalTarget::Path(path.as_path()))
        } else if target.is::<Vec<u8>>() {
            target.downcast_mut().map(MarshalTarget::Bytes)
        } else if target.is::<String>() {
            target.downcast_mut().map(MarshalTarget::Text)
        } else if target.is::<Box<dyn Write>>() {
            target
                .downcast_mut::<Box<dyn Write>>()
                .map(|stream| MarshalTarget::Stream(&mut **stream))
        } else {
            None
        };

        match resolved {
            Some(resolved) => {
                debug!("Resolved {} to {}", type_name::<A>(), resolved);
                Ok(resolved)
            }
            None => Err(BindError::NoMatchingTarget {
                target: type_name::<A>().to_string(),
            }),
        }
    }
}

impl fmt::Display for MarshalTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarshalTarget::XmlWriter(_) => f.write_str("xml writer"),
            MarshalTarget::File(_) => f.write_str("file"),
            MarshalTarget::Path(path) => write!(f, "file {}", path.display()),
            MarshalTarget::Bytes(_) => f.write_str("byte buffer"),
            MarshalTarget::Text(_) => f.write_str("string"),
            MarshalTarget::Stream(_) => f.write_str("stream"),
        }
    }
}

impl fmt::Debug for MarshalTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarshalTarget({})", self)
    }
}

impl<'a> From<&'a mut Writer<Vec<u8>>> for MarshalTarget<'a> {
    fn from(writer: &'a mut Writer<Vec<u8>>) -> Self {
        MarshalTarget::XmlWriter(writer)
    }
}

impl<'a> From<&'a mut File> for MarshalTarget<'a> {
    fn from(file: &'a mut File) -> Self {
        MarshalTarget::File(file)
    }
}

impl<'a> From<&'a Path> for MarshalTarget<'a> {
    fn from(path: &'a Path) -> Self {
        MarshalTarget::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for MarshalTarget<'a> {
    fn from(path: &'a PathBuf) -> Self {
        MarshalTarget::Path(path.as_path())
    }
}

impl<'a> From<&'a mut Vec<u8>> for MarshalTarget<'a> {
    fn from(bytes: &'a mut Vec<u8>) -> Self {
        MarshalTarget::Bytes(bytes)
    }
}

impl<'a> From<&'a mut String> for MarshalTarget<'a> {
    fn from(text: &'a mut String) -> Self {
        MarshalTarget::Text(text)
    }
}

impl<'a> From<&'a mut dyn Write> for MarshalTarget<'a> {
    fn from(stream: &'a mut dyn Write) -> Self {
        MarshalTarget::Stream(stream)
    }
}
