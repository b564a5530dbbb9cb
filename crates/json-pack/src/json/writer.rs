//! Streaming JSON document writer.

use metacodec_buffers::Writer;

use super::error::JsonError;

#[derive(Debug, Clone, Copy)]
enum Frame {
    Object { first: bool, after_key: bool },
    Array { first: bool },
}

/// Streaming JSON emitter.
///
/// Values are written in document order: `start_object`, then alternating
/// `key` and value calls, then `end_object`. The writer inserts separators
/// and rejects calls that would produce a malformed document. String escaping
/// and number formatting are delegated to `serde_json`.
///
/// # Example
///
/// ```
/// use metacodec_json_pack::JsonWriter;
///
/// let mut w = JsonWriter::new();
/// w.start_object().unwrap();
/// w.key("a").unwrap();
/// w.i64(1).unwrap();
/// w.key("b").unwrap();
/// w.string("x").unwrap();
/// w.end_object().unwrap();
/// assert_eq!(w.finish().unwrap(), r#"{"a":1,"b":"x"}"#);
/// ```
#[derive(Debug)]
pub struct JsonWriter {
    writer: Writer,
    stack: Vec<Frame>,
    root_done: bool,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::with_capacity(metacodec_buffers::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writer: Writer::with_capacity(capacity),
            stack: Vec::new(),
            root_done: false,
        }
    }

    /// Current nesting depth (0 at the document root).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Bytes emitted so far.
    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    fn before_value(&mut self) -> Result<(), JsonError> {
        match self.stack.last_mut() {
            None if self.root_done => Err(JsonError::Unbalanced("document root")),
            None => Ok(()),
            Some(Frame::Object { after_key, .. }) => {
                if !*after_key {
                    return Err(JsonError::MissingKey);
                }
                *after_key = false;
                Ok(())
            }
            Some(Frame::Array { first }) => {
                if !*first {
                    self.writer.u8(b',');
                }
                *first = false;
                Ok(())
            }
        }
    }

    fn after_value(&mut self) {
        if self.stack.is_empty() {
            self.root_done = true;
        }
    }

    pub fn start_object(&mut self) -> Result<(), JsonError> {
        self.before_value()?;
        self.writer.u8(b'{');
        self.stack.push(Frame::Object {
            first: true,
            after_key: false,
        });
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<(), JsonError> {
        match self.stack.last() {
            Some(Frame::Object {
                after_key: false, ..
            }) => {
                self.stack.pop();
                self.writer.u8(b'}');
                self.after_value();
                Ok(())
            }
            Some(Frame::Object { .. }) => Err(JsonError::Incomplete),
            _ => Err(JsonError::Unbalanced("object")),
        }
    }

    pub fn start_array(&mut self) -> Result<(), JsonError> {
        self.before_value()?;
        self.writer.u8(b'[');
        self.stack.push(Frame::Array { first: true });
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<(), JsonError> {
        match self.stack.last() {
            Some(Frame::Array { .. }) => {
                self.stack.pop();
                self.writer.u8(b']');
                self.after_value();
                Ok(())
            }
            _ => Err(JsonError::Unbalanced("array")),
        }
    }

    /// Writes an object member key.
    pub fn key(&mut self, key: &str) -> Result<(), JsonError> {
        match self.stack.last_mut() {
            Some(Frame::Object { first, after_key }) => {
                if *after_key {
                    return Err(JsonError::Incomplete);
                }
                if !*first {
                    self.writer.u8(b',');
                }
                *first = false;
                *after_key = true;
            }
            _ => return Err(JsonError::KeyOutsideObject),
        }
        let escaped = serde_json::to_string(key)?;
        self.writer.utf8(&escaped);
        self.writer.u8(b':');
        Ok(())
    }

    /// Writes a string value. The byte length is taken from the slice, so
    /// embedded NUL bytes are preserved.
    pub fn string(&mut self, value: &str) -> Result<(), JsonError> {
        self.before_value()?;
        let escaped = serde_json::to_string(value)?;
        self.writer.utf8(&escaped);
        self.after_value();
        Ok(())
    }

    pub fn bool(&mut self, value: bool) -> Result<(), JsonError> {
        self.before_value()?;
        self.writer.ascii(if value { "true" } else { "false" });
        self.after_value();
        Ok(())
    }

    pub fn null(&mut self) -> Result<(), JsonError> {
        self.before_value()?;
        self.writer.ascii("null");
        self.after_value();
        Ok(())
    }

    pub fn i64(&mut self, value: i64) -> Result<(), JsonError> {
        self.before_value()?;
        self.writer.ascii(&value.to_string());
        self.after_value();
        Ok(())
    }

    pub fn u64(&mut self, value: u64) -> Result<(), JsonError> {
        self.before_value()?;
        self.writer.ascii(&value.to_string());
        self.after_value();
        Ok(())
    }

    /// Writes a finite float. NaN and infinities have no JSON form.
    pub fn f64(&mut self, value: f64) -> Result<(), JsonError> {
        let Some(number) = serde_json::Number::from_f64(value) else {
            return Err(JsonError::NonFinite(value));
        };
        self.before_value()?;
        self.writer.ascii(&number.to_string());
        self.after_value();
        Ok(())
    }

    /// Returns the finished document text.
    pub fn finish(self) -> Result<String, JsonError> {
        if !self.stack.is_empty() || !self.root_done {
            return Err(JsonError::Incomplete);
        }
        self.writer
            .into_string()
            .map_err(|_| JsonError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_document() {
        let mut w = JsonWriter::new();
        w.start_object().unwrap();
        w.key("type").unwrap();
        w.string("object").unwrap();
        w.key("properties").unwrap();
        w.start_object().unwrap();
        w.key("a").unwrap();
        w.start_array().unwrap();
        w.i64(-1).unwrap();
        w.u64(2).unwrap();
        w.f64(0.5).unwrap();
        w.bool(true).unwrap();
        w.null().unwrap();
        w.end_array().unwrap();
        w.end_object().unwrap();
        w.end_object().unwrap();
        assert_eq!(
            w.finish().unwrap(),
            r#"{"type":"object","properties":{"a":[-1,2,0.5,true,null]}}"#
        );
    }

    #[test]
    fn escapes_strings_and_keys() {
        let mut w = JsonWriter::new();
        w.start_object().unwrap();
        w.key("q\"k").unwrap();
        w.string("line\nnext").unwrap();
        w.end_object().unwrap();
        assert_eq!(w.finish().unwrap(), r#"{"q\"k":"line\nnext"}"#);
    }

    #[test]
    fn rejects_value_without_key() {
        let mut w = JsonWriter::new();
        w.start_object().unwrap();
        assert!(matches!(w.i64(1), Err(JsonError::MissingKey)));
    }

    #[test]
    fn rejects_key_outside_object() {
        let mut w = JsonWriter::new();
        assert!(matches!(w.key("a"), Err(JsonError::KeyOutsideObject)));
        w.start_array().unwrap();
        assert!(matches!(w.key("a"), Err(JsonError::KeyOutsideObject)));
    }

    #[test]
    fn rejects_dangling_key_on_close() {
        let mut w = JsonWriter::new();
        w.start_object().unwrap();
        w.key("a").unwrap();
        assert!(matches!(w.end_object(), Err(JsonError::Incomplete)));
    }

    #[test]
    fn rejects_second_root_value() {
        let mut w = JsonWriter::new();
        w.string("a").unwrap();
        assert!(matches!(w.string("b"), Err(JsonError::Unbalanced(_))));
    }

    #[test]
    fn rejects_non_finite_float() {
        let mut w = JsonWriter::new();
        assert!(matches!(w.f64(f64::NAN), Err(JsonError::NonFinite(_))));
    }

    #[test]
    fn finish_requires_complete_document() {
        let mut w = JsonWriter::new();
        w.start_object().unwrap();
        assert!(matches!(w.finish(), Err(JsonError::Incomplete)));
        assert!(matches!(JsonWriter::new().finish(), Err(JsonError::Incomplete)));
    }
}
