use std::any::type_name;
use std::fmt;

use crate::error::BindError;

/// Namespace URI shared by every wrapper root element written by this crate.
pub const NS_URI: &str = "urn:xml-list-bind:wrapper";

/// An XML name paired with its namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    namespace_uri: String,
    local_part: String,
}

impl QualifiedName {
    /// Creates a qualified name from its parts. An empty namespace URI means "no namespace".
    pub fn new<N: Into<String>, L: Into<String>>(namespace_uri: N, local_part: L) -> Self {
        Self {
            namespace_uri: namespace_uri.into(),
            local_part: local_part.into(),
        }
    }

    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_uri.is_empty() {
            f.write_str(&self.local_part)
        } else {
            write!(f, "{{{}}}{}", self.namespace_uri, self.local_part)
        }
    }
}

/// Qualifies `local_part` with [`NS_URI`].
///
/// The local part is trimmed; a blank local part is rejected.
///
/// # Examples
///
/// ```
/// use xml_list_bind::core::name::{qualified_name, NS_URI};
///
/// let name = qualified_name(" wrapper ").unwrap();
/// assert_eq!(name.local_part(), "wrapper");
/// assert_eq!(name.namespace_uri(), NS_URI);
///
/// assert!(qualified_name("   ").is_err());
/// ```
pub fn qualified_name(local_part: &str) -> Result<QualifiedName, BindError> {
    let local_part = local_part.trim();
    if local_part.is_empty() {
        return Err(BindError::InvalidArgument("localPart is blank".to_string()));
    }
    Ok(QualifiedName::new(NS_URI, local_part))
}

/// Lower-cases the first character of `name`, unless the first two characters are
/// both upper-case (`FooBar` becomes `fooBar`, `URL` stays `URL`).
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if first.is_uppercase() && chars.next().is_some_and(char::is_uppercase) {
        return name.to_string();
    }
    first.to_lowercase().chain(name.chars().skip(1)).collect()
}

/// The simple name of `T`: references dereferenced, last path segment with generic
/// arguments removed.
pub(crate) fn simple_type_name<T: ?Sized>() -> &'static str {
    let mut full = type_name::<T>();
    while let Some(referent) = full.strip_prefix('&') {
        full = referent.trim_start();
        if full.starts_with('\'') {
            full = full.split_once(' ').map_or(full, |(_, rest)| rest);
        }
        full = full.strip_prefix("mut ").unwrap_or(full);
    }
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
