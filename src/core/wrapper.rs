use crate::core::name::QualifiedName;

/// A homogeneous list of elements carried by the wrapper root element.
///
/// The wrapper itself declares no structure for its children: each child is bound
/// independently through the element type registered in the active binding context,
/// which lets one wrapper definition serve any element type.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapper<T> {
    elements: Option<Vec<T>>,
}

impl<T> Default for Wrapper<T> {
    /// An unpopulated wrapper, as created for the unmarshaller to fill in.
    fn default() -> Self {
        Self { elements: None }
    }
}

impl<T> Wrapper<T> {
    /// Wraps `elements`, keeping their order.
    pub fn of(elements: Vec<T>) -> Self {
        Self {
            elements: Some(elements),
        }
    }

    /// Borrows the wrapped elements; an unpopulated wrapper holds none.
    pub fn elements(&self) -> &[T] {
        self.elements.as_deref().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    /// Unwraps the elements. An unpopulated wrapper yields an empty list.
    pub fn into_elements(self) -> Vec<T> {
        self.elements.unwrap_or_default()
    }

    pub(crate) fn push(&mut self, element: T) {
        self.elements.get_or_insert_with(Vec::new).push(element);
    }
}

impl<T> From<Vec<T>> for Wrapper<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::of(elements)
    }
}

/// A value bound to a named XML element.
#[derive(Debug, Clone, PartialEq)]
pub struct RootElement<V> {
    name: QualifiedName,
    value: V,
}

impl<V> RootElement<V> {
    pub fn new(name: QualifiedName, value: V) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }
}
