//! SOAP XML to a plain `serde_json::Value` tree.
//!
//! Each element becomes an entry keyed by its local name (namespace prefix
//! dropped). Repeated siblings collapse into a sequence, leaf text becomes a
//! string scalar, and empty or `xsi:nil` elements become null. Markup that
//! has no place in plain data (attributes such as namespace declarations
//! and `xsi:type`, plus stray text next to child elements) is kept under
//! [`RAW_ELEMENTS_KEY`] so the tree is lossless until it is sanitized.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use super::error::OjpError;

/// Key under which per-element protocol markup is recorded.
pub const RAW_ELEMENTS_KEY: &str = "_raw_elements";

/// An element that has been opened but not yet closed.
#[derive(Default)]
struct Frame {
    name: String,
    children: Map<String, Value>,
    raw: Vec<Value>,
    text: String,
    nil: bool,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, OjpError> {
        let mut frame = Frame {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Frame::default()
        };

        for attr in start.attributes() {
            let attr = attr.map_err(|e| xml_error(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| xml_error(e.to_string()))?;

            if attr.key.local_name().as_ref() == b"nil" && key.contains(':') && value == "true" {
                frame.nil = true;
            }
            frame.raw.push(Value::String(format!("{key}=\"{value}\"")));
        }

        Ok(frame)
    }

    fn close(self) -> (String, Value) {
        let Frame {
            name,
            mut children,
            mut raw,
            text,
            nil,
        } = self;

        let value = if nil {
            Value::Null
        } else if !children.is_empty() {
            if !text.is_empty() {
                raw.push(Value::String(text));
            }
            if !raw.is_empty() {
                children.insert(RAW_ELEMENTS_KEY.to_string(), Value::Array(raw));
            }
            Value::Object(children)
        } else if !text.is_empty() {
            Value::String(text)
        } else if !raw.is_empty() {
            let mut map = Map::new();
            map.insert(RAW_ELEMENTS_KEY.to_string(), Value::Array(raw));
            Value::Object(map)
        } else {
            Value::Null
        };

        (name, value)
    }

    /// Add a closed child, turning repeats into a sequence.
    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            // Element values are never arrays themselves, so an array here
            // can only come from an earlier repeat.
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }
}

fn xml_error(message: String) -> OjpError {
    OjpError::Xml {
        message,
        body: None,
    }
}

/// Parse an XML document into a tree rooted at a mapping of its root element.
pub fn to_value(xml: &str) -> Result<Value, OjpError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Frame::default()];

    loop {
        let event = reader.read_event().map_err(|e| OjpError::Xml {
            message: format!("at byte {}: {e}", reader.buffer_position()),
            body: Some(xml.chars().take(500).collect()),
        })?;

        match event {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start)?.close();
                current(&mut stack)?.add_child(name, value);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| xml_error(e.to_string()))?;
                current(&mut stack)?.text.push_str(&text);
            }
            Event::CData(data) => {
                let data = String::from_utf8_lossy(&data.into_inner()).into_owned();
                current(&mut stack)?.text.push_str(&data);
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(xml_error("unbalanced closing tag".to_string()));
                }
                let (name, value) = stack.pop().map(Frame::close).unwrap_or_default();
                current(&mut stack)?.add_child(name, value);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    match stack.pop() {
        Some(root) if stack.is_empty() => Ok(Value::Object(root.children)),
        _ => Err(xml_error("document ended inside an element".to_string())),
    }
}

fn current(stack: &mut [Frame]) -> Result<&mut Frame, OjpError> {
    stack
        .last_mut()
        .ok_or_else(|| xml_error("content outside the document".to_string()))
}
