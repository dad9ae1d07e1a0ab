use log::debug;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::BindError;
use crate::xml::{BindingContext, MarshalTarget, Marshaller, UnmarshalSource};

/// Unmarshals a list of `T` from `source`.
///
/// ```
/// use serde::Deserialize;
/// use xml_list_bind::unmarshal;
///
/// #[derive(Debug, Deserialize)]
/// struct Category {
///     name: String,
/// }
///
/// let xml = r#"<wrapper xmlns="urn:xml-list-bind:wrapper">
///   <category><name>Books</name></category>
///   <category><name>Music</name></category>
/// </wrapper>"#;
///
/// let categories: Vec<Category> = unmarshal(xml).unwrap();
/// assert_eq!(categories.len(), 2);
/// assert_eq!(categories[1].name, "Music");
/// ```
pub fn unmarshal<'s, T: DeserializeOwned>(
    source: impl Into<UnmarshalSource<'s>>,
) -> Result<Vec<T>, BindError> {
    let context = BindingContext::<T>::new()?;
    let root = context.create_unmarshaller().unmarshal(source.into())?;
    Ok(root.into_value().into_elements())
}

/// Marshals `elements` to `target` with default marshaller settings.
///
/// ```
/// use serde::Serialize;
/// use xml_list_bind::marshal;
///
/// #[derive(Serialize)]
/// struct Category {
///     name: String,
/// }
///
/// let categories = vec![Category { name: "Books".to_string() }];
/// let mut xml = String::new();
/// marshal(&categories, &mut xml).unwrap();
///
/// assert!(xml.contains("<category><name>Books</name></category>"));
/// ```
pub fn marshal<'t, T: Serialize>(
    elements: &[T],
    target: impl Into<MarshalTarget<'t>>,
) -> Result<(), BindError> {
    marshal_with(elements, target, |marshaller| Ok(marshaller))
}

/// Marshals `elements` to `target`, letting `configure` adjust the marshaller first.
///
/// ```
/// use serde::Serialize;
/// use xml_list_bind::marshal_with;
///
/// #[derive(Serialize)]
/// struct Category {
///     name: String,
/// }
///
/// let categories = vec![Category { name: "Books".to_string() }];
/// let mut xml = String::new();
/// marshal_with(&categories, &mut xml, |m| Ok(m.formatted_output(true))).unwrap();
///
/// assert!(xml.contains("\n    <category>"));
/// ```
pub fn marshal_with<'t, T, F>(
    elements: &[T],
    target: impl Into<MarshalTarget<'t>>,
    configure: F,
) -> Result<(), BindError>
where
    T: Serialize,
    F: FnOnce(Marshaller) -> Result<Marshaller, BindError>,
{
    let context = BindingContext::<T>::new()?;
    let wrapped = context.wrap(elements);
    let marshaller = configure(context.create_marshaller())?;
    debug!("Marshalling list as {}", wrapped.name());
    marshaller.marshal(&wrapped, target.into())
}
