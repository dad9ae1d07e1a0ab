use std::marker::PhantomData;

use log::debug;
use serde::de::DeserializeOwned;

use crate::core::name::{decapitalize, qualified_name, simple_type_name, QualifiedName};
use crate::core::wrapper::{RootElement, Wrapper};
use crate::error::BindError;
use crate::xml::marshaller::Marshaller;
use crate::xml::unmarshaller::Unmarshaller;

/// Binding context scoped to the wrapper type and one element type `T`.
///
/// The context names the wrapper root element and the child element every `T` is bound
/// to. By default the child element is named after `T` itself:
///
/// ```
/// use xml_list_bind::xml::BindingContext;
///
/// struct Category;
///
/// let context = BindingContext::<Category>::new().unwrap();
/// assert_eq!(context.root_name().local_part(), "wrapper");
/// assert_eq!(context.element_name(), "category");
///
/// let context = context.with_element_name("cat").unwrap();
/// assert_eq!(context.element_name(), "cat");
/// ```
#[derive(Debug, Clone)]
pub struct BindingContext<T> {
    root_name: QualifiedName,
    element_name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BindingContext<T> {
    /// Creates a context for `T`, inferring its element name from the type name.
    pub fn new() -> Result<Self, BindError> {
        let root_name = qualified_name(&decapitalize(simple_type_name::<Wrapper<T>>()))?;
        let element_name = decapitalize(simple_type_name::<T>());
        check_element_name(&element_name).map_err(|e| {
            BindError::Context(format!(
                "cannot bind {}: {}",
                std::any::type_name::<T>(),
                e
            ))
        })?;
        debug!(
            "Created binding context {} with element <{}>",
            root_name, element_name
        );

        Ok(Self {
            root_name,
            element_name,
            _marker: PhantomData,
        })
    }

    /// Binds `T` to `element_name` instead of the inferred name.
    pub fn with_element_name(mut self, element_name: &str) -> Result<Self, BindError> {
        let element_name = element_name.trim();
        check_element_name(element_name).map_err(BindError::Context)?;
        self.element_name = element_name.to_string();
        Ok(self)
    }

    pub fn root_name(&self) -> &QualifiedName {
        &self.root_name
    }

    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Wraps borrowed `elements` under this context's root element.
    pub fn wrap<'e>(&self, elements: &'e [T]) -> RootElement<Wrapper<&'e T>> {
        RootElement::new(
            self.root_name.clone(),
            Wrapper::of(elements.iter().collect()),
        )
    }

    /// Creates a marshaller with default settings.
    pub fn create_marshaller(&self) -> Marshaller {
        Marshaller::new(self.element_name.clone())
    }
}

impl<T: DeserializeOwned> BindingContext<T> {
    pub fn create_unmarshaller(&self) -> Unmarshaller<T> {
        Unmarshaller::new(self.element_name.clone())
    }
}

fn check_element_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("element name is blank".to_string()),
        Some(first) if !(first.is_alphabetic() || first == '_') => {
            return Err(format!("{:?} is not a valid XML name", name));
        }
        Some(_) => {}
    }
    if chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')) {
        Ok(())
    } else {
        Err(format!("{:?} is not a valid XML name", name))
    }
}
