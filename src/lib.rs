#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # XML list binding

 Marshal and unmarshal homogeneous lists of `serde` types to and from XML.

 XML documents have a single root element, so a list cannot be written as-is. This crate
 wraps the list in a generic `<wrapper>` root element qualified with [`NS_URI`](crate::core::name::NS_URI),
 and binds every child element independently through the element type registered in the
 active [`BindingContext`](crate::xml::BindingContext). The same wrapper therefore serves any element type
 without per-type boilerplate.

 The actual XML work is delegated to [`quick-xml`](https://crates.io/crates/quick-xml)
 and its `serde` support.

 ## Core Concepts

- **Wrapper:** the generic list container carried by the root element.
- **BindingContext:** ties the wrapper root to one element type and names its elements.
- **Marshaller:** writes a wrapped list to a [`MarshalTarget`](crate::xml::MarshalTarget): a path, file, byte
  buffer, string, stream or `quick_xml::Writer`.
- **Unmarshaller:** reads a wrapped list back from an [`UnmarshalSource`](crate::xml::UnmarshalSource).

 ## Getting Started

```rust
# use serde::{Deserialize, Serialize};
# use xml_list_bind::{error::BindError, marshal_with, unmarshal};
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Category {
    #[serde(rename = "@id")]
    id: u32,
    name: String,
}

fn main() -> Result<(), BindError> {
    let categories = vec![
        Category { id: 1, name: "Books".to_string() },
        Category { id: 2, name: "Music".to_string() },
    ];

    let mut xml = String::new();
    marshal_with(&categories, &mut xml, |marshaller| {
        Ok(marshaller.formatted_output(true))
    })?;

    // <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
    // <wrapper xmlns="urn:xml-list-bind:wrapper">
    //     <category id="1">
    //         <name>Books</name>
    //     </category>
    //     ...
    // </wrapper>

    let read: Vec<Category> = unmarshal(xml.as_str())?;
    assert_eq!(read, categories);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Qualified names and the list wrapper
pub mod core;

/// Error types for binding operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Marshalling and unmarshalling of wrapped lists
pub mod xml;

mod list;

pub use list::{marshal, marshal_with, unmarshal};
