//! XML binding for wrapped lists, built on `quick-xml` and `serde`.
//!
//! A [`BindingContext`] ties the wrapper root element to one element type. It creates
//! a [`Marshaller`] to write lists and an [`Unmarshaller`] to read them back.
//!
//! # Examples
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use xml_list_bind::xml::{BindingContext, MarshalTarget, UnmarshalSource};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Product {
//!     #[serde(rename = "@id")]
//!     id: String,
//!     name: String,
//! }
//!
//! let context = BindingContext::<Product>::new()
//!     .unwrap()
//!     .with_element_name("item")
//!     .unwrap();
//!
//! let products = vec![
//!     Product { id: "P001".to_string(), name: "Headphones".to_string() },
//!     Product { id: "P002".to_string(), name: "USB-C Cable".to_string() },
//! ];
//!
//! let mut xml = String::new();
//! context
//!     .create_marshaller()
//!     .fragment(true)
//!     .marshal(&context.wrap(&products), MarshalTarget::Text(&mut xml))
//!     .unwrap();
//! assert!(xml.contains(r#"<item id="P001"><name>Headphones</name></item>"#));
//!
//! let read = context
//!     .create_unmarshaller()
//!     .unmarshal(UnmarshalSource::Text(&xml))
//!     .unwrap();
//! assert_eq!(read.into_value().into_elements(), products);
//! ```

pub mod context;
pub mod marshaller;
pub mod target;
pub mod unmarshaller;

pub use context::BindingContext;
pub use marshaller::Marshaller;
pub use target::MarshalTarget;
pub use unmarshaller::{UnmarshalSource, Unmarshaller};
