//! XML envelope parsing and validation.
//!
//! Every Namecheap reply is wrapped in the same envelope:
//!
//! ```xml
//! <ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
//!   <Errors />
//!   <Warnings />
//!   <RequestedCommand>namecheap.domains.getlist</RequestedCommand>
//!   <CommandResponse Type="namecheap.domains.getList">...</CommandResponse>
//!   <Server>PHX01APIEXT02</Server>
//!   <GMTTimeDifference>--5:00</GMTTimeDifference>
//!   <ExecutionTime>0.011</ExecutionTime>
//! </ApiResponse>
//! ```
//!
//! The body is parsed with `roxmltree` into an owned tree ([`XmlDocument`]) so
//! the result can outlive the response text. Tag lookups match on local name,
//! so the envelope's default namespace does not get in the way.

use tracing::{error, info};

use crate::errors::NamecheapError;

/// Value of the `Status` attribute that marks a failed call.
pub const STATUS_ERROR: &str = "ERROR";

/// A node in the owned XML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlNode {
    #[must_use]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Element(_) => None,
        }
    }
}

/// An element with its attributes and children, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Local tag name (namespace prefix stripped).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// First direct child element named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.name == name)
    }

    /// All descendant elements named `name`, in document order.
    ///
    /// The element itself is not included, matching DOM `getElementsByTagName`.
    #[must_use]
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        for child in self.child_elements() {
            child.collect_by_name(name, &mut found);
        }
        found
    }

    #[must_use]
    pub fn first_element_by_tag_name(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.first_element_by_tag_name(name)
            }
        })
    }

    fn collect_by_name<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_by_name(name, found);
        }
    }

    /// Text of the first child node, if that node is text.
    #[must_use]
    pub fn first_child_text(&self) -> Option<&str> {
        self.children.first().and_then(XmlNode::as_text)
    }

    /// All descendant text concatenated.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.push_text(out),
            }
        }
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let children = node
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(XmlNode::Element(Self::from_node(child)))
                } else if child.is_text() {
                    child.text().map(|t| XmlNode::Text(t.to_string()))
                } else {
                    None
                }
            })
            .collect();

        Self {
            name: node.tag_name().name().to_string(),
            attributes,
            children,
        }
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Parses `text` into an owned tree.
    ///
    /// # Errors
    ///
    /// Returns [`NamecheapError::Xml`] if the text is not well-formed XML.
    pub fn parse(text: &str) -> Result<Self, NamecheapError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)?;
        Ok(Self {
            root: XmlElement::from_node(doc.root_element()),
        })
    }

    #[must_use]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// All elements named `name` in document order, the root included.
    #[must_use]
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.root.collect_by_name(name, &mut found);
        found
    }

    #[must_use]
    pub fn first_element_by_tag_name(&self, name: &str) -> Option<&XmlElement> {
        if self.root.name == name {
            Some(&self.root)
        } else {
            self.root.first_element_by_tag_name(name)
        }
    }
}

/// One entry from the envelope's `Errors` (or `Warnings`) list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The `Number` attribute, when Namecheap supplies one.
    pub number: Option<String>,
    pub message: String,
}

impl ApiError {
    fn from_element(element: &XmlElement) -> Self {
        Self {
            number: element.attribute("Number").map(str::to_string),
            message: element.first_child_text().unwrap_or_default().to_string(),
        }
    }
}

/// A validated Namecheap envelope.
///
/// Holds the whole parsed document; the accessors read from the first
/// `ApiResponse` element in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    document: XmlDocument,
}

impl ApiResponse {
    fn envelope(&self) -> &XmlElement {
        // Construction guarantees the element exists.
        self.document
            .first_element_by_tag_name("ApiResponse")
            .unwrap_or(&self.document.root)
    }

    /// The `Status` attribute (`"OK"` or `"ERROR"`).
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.envelope().attribute("Status")
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status() == Some(STATUS_ERROR)
    }

    /// Entries of the first `Errors` element.
    #[must_use]
    pub fn errors(&self) -> Vec<ApiError> {
        list_entries(self.envelope(), "Errors", "Error")
    }

    /// Entries of the first `Warnings` element.
    #[must_use]
    pub fn warnings(&self) -> Vec<ApiError> {
        list_entries(self.envelope(), "Warnings", "Warning")
    }

    #[must_use]
    pub fn requested_command(&self) -> Option<String> {
        self.envelope().child("RequestedCommand").map(XmlElement::text)
    }

    /// The `CommandResponse` element holding the command-specific payload.
    #[must_use]
    pub fn command_response(&self) -> Option<&XmlElement> {
        self.envelope().child("CommandResponse")
    }

    #[must_use]
    pub fn server(&self) -> Option<String> {
        self.envelope().child("Server").map(XmlElement::text)
    }

    #[must_use]
    pub fn gmt_time_difference(&self) -> Option<String> {
        self.envelope().child("GMTTimeDifference").map(XmlElement::text)
    }

    /// Server-side execution time in seconds.
    #[must_use]
    pub fn execution_time(&self) -> Option<f64> {
        self.envelope()
            .child("ExecutionTime")
            .and_then(|e| e.text().trim().parse().ok())
    }

    #[must_use]
    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> XmlDocument {
        self.document
    }
}

fn list_entries(envelope: &XmlElement, list: &str, entry: &str) -> Vec<ApiError> {
    envelope
        .first_element_by_tag_name(list)
        .map(|list| {
            list.elements_by_tag_name(entry)
                .into_iter()
                .map(ApiError::from_element)
                .collect()
        })
        .unwrap_or_default()
}

/// Parses a response body and checks the envelope status.
///
/// # Errors
///
/// - [`NamecheapError::Xml`] if the body is not well-formed XML
/// - [`NamecheapError::MalformedResponse`] if there is no `ApiResponse`
///   element, or the status is `ERROR` without an `Errors` element
/// - [`NamecheapError::Api`] if the status is `ERROR`; the message is the
///   text of every `Error` element concatenated in document order
pub fn validate(body: &str) -> Result<ApiResponse, NamecheapError> {
    let document = XmlDocument::parse(body)?;

    let envelope = document.first_element_by_tag_name("ApiResponse").ok_or_else(|| {
        NamecheapError::MalformedResponse(format!(
            "expected an ApiResponse element, found <{}>",
            document.root().name()
        ))
    })?;

    if envelope.attribute("Status") == Some(STATUS_ERROR) {
        let list = envelope.first_element_by_tag_name("Errors").ok_or_else(|| {
            NamecheapError::MalformedResponse(
                "ApiResponse has Status=\"ERROR\" but no Errors element".to_string(),
            )
        })?;

        let errors: Vec<ApiError> = list
            .elements_by_tag_name("Error")
            .into_iter()
            .map(ApiError::from_element)
            .collect();
        let message: String = errors.iter().map(|e| e.message.as_str()).collect();

        info!("Namecheap error envelope: {envelope:?}");
        error!("{message}");

        return Err(NamecheapError::Api { message, errors });
    }

    Ok(ApiResponse { document })
}
