//! Specification pointers.
//!
//! A [`SpecificationPointer`] addresses a node of the specification document
//! as a list of path elements. Its textual form is a URI-fragment JSON
//! pointer (RFC 6901), e.g. `#/paths/~1pets/get/responses/200`.

use std::fmt;

use crate::error::{SpecError, SpecResult};

/// Location of a node within a specification document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SpecificationPointer {
    elements: Vec<String>,
}

impl SpecificationPointer {
    /// Pointer to the document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a pointer from unescaped path elements.
    pub fn from_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a local pointer such as `#/components/responses/NotFound`.
    ///
    /// # Example
    ///
    /// ```
    /// use mimic_spec::SpecificationPointer;
    ///
    /// let pointer = SpecificationPointer::parse("#/paths/~1pets/get").unwrap();
    /// assert_eq!(pointer.elements(), ["paths", "/pets", "get"]);
    /// ```
    pub fn parse(pointer: &str) -> SpecResult<Self> {
        let body = pointer.strip_prefix('#').ok_or_else(|| SpecError::InvalidPointer {
            pointer: pointer.to_string(),
        })?;

        if body.is_empty() {
            return Ok(Self::root());
        }

        let body = body.strip_prefix('/').ok_or_else(|| SpecError::InvalidPointer {
            pointer: pointer.to_string(),
        })?;

        Ok(Self {
            elements: body.split('/').map(unescape).collect(),
        })
    }

    /// Returns a new pointer with one more path element.
    #[must_use]
    pub fn with_path_element(&self, element: impl Into<String>) -> Self {
        let mut elements = self.elements.clone();
        elements.push(element.into());
        Self { elements }
    }

    /// Returns the unescaped path elements.
    #[must_use]
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Returns the last path element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.elements.last().map(String::as_str)
    }

    /// Returns `true` for the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the escaped textual form, e.g. `#/paths/~1pets`.
    #[must_use]
    pub fn path(&self) -> String {
        if self.elements.is_empty() {
            return "#".to_string();
        }

        let mut path = String::from("#");
        for element in &self.elements {
            path.push('/');
            path.push_str(&escape(element));
        }
        path
    }
}

impl fmt::Display for SpecificationPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn escape(element: &str) -> String {
    element.replace('~', "~0").replace('/', "~1")
}

fn unescape(element: &str) -> String {
    element.replace("~1", "/").replace("~0", "~")
}
