use std::io;

use log::trace;

use super::Serializer;
use crate::EncodeError;

#[derive(Debug)]
enum StackItem {
    ArrayItem { first: bool },
    ObjectItem { first: bool },
}

/// A serializer for the JSON wire format.
///
/// Strings are written between quotes exactly as they are, without
/// escaping, and pairs become `{"first":..,"second":..}` objects.
pub struct JsonSerializer<W: io::Write> {
    writer: W,
    stack: Vec<StackItem>,
}

impl<W: io::Write> JsonSerializer<W> {
    /// Creates a new JSON serializer with the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            stack: Vec::new(),
        }
    }

    /// Flushes the underlying writer
    pub fn flush(&mut self) -> Result<(), EncodeError> {
        Ok(self.writer.flush()?)
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        Ok(self.writer.write_all(bytes)?)
    }

    /// Writes the separator owed before a value in an array. Object values
    /// already got theirs along with the key.
    fn start_value(&mut self) -> Result<(), EncodeError> {
        if let Some(StackItem::ArrayItem { first }) = self.stack.last_mut() {
            if core::mem::replace(first, false) {
                return Ok(());
            }
            return self.write(b",");
        }
        Ok(())
    }

    fn write_quoted(&mut self, s: &str) -> Result<(), EncodeError> {
        self.write(b"\"")?;
        self.write(s.as_bytes())?;
        self.write(b"\"")
    }
}

impl<W: io::Write> Serializer for JsonSerializer<W> {
    fn serialize_bool(&mut self, value: bool) -> Result<(), EncodeError> {
        self.start_value()?;
        self.write(if value { b"true" } else { b"false" })
    }

    fn serialize_u64(&mut self, value: u64) -> Result<(), EncodeError> {
        self.start_value()?;
        self.write(itoa::Buffer::new().format(value).as_bytes())
    }

    fn serialize_i64(&mut self, value: i64) -> Result<(), EncodeError> {
        self.start_value()?;
        self.write(itoa::Buffer::new().format(value).as_bytes())
    }

    fn serialize_f32(&mut self, value: f32) -> Result<(), EncodeError> {
        self.start_value()?;
        self.write(ryu::Buffer::new().format(value).as_bytes())
    }

    fn serialize_f64(&mut self, value: f64) -> Result<(), EncodeError> {
        self.start_value()?;
        self.write(ryu::Buffer::new().format(value).as_bytes())
    }

    fn serialize_char(&mut self, value: char) -> Result<(), EncodeError> {
        self.start_value()?;
        self.write_quoted(value.encode_utf8(&mut [0; 4]))
    }

    fn serialize_str(&mut self, value: &str) -> Result<(), EncodeError> {
        self.start_value()?;
        self.write_quoted(value)
    }

    fn serialize_null(&mut self) -> Result<(), EncodeError> {
        self.start_value()?;
        self.write(b"null")
    }

    fn start_object(&mut self, _len: usize) -> Result<(), EncodeError> {
        self.start_value()?;
        self.stack.push(StackItem::ObjectItem { first: true });
        self.write(b"{")
    }

    fn serialize_field_name(&mut self, name: &str) -> Result<(), EncodeError> {
        trace!("field {name:?}, stack = {:?}", self.stack);
        if let Some(StackItem::ObjectItem { first }) = self.stack.last_mut() {
            if !core::mem::replace(first, false) {
                self.write(b",")?;
            }
        }
        self.write_quoted(name)?;
        self.write(b":")
    }

    fn end_object(&mut self) -> Result<(), EncodeError> {
        self.stack.pop();
        self.write(b"}")
    }

    fn start_array(&mut self, _len: usize) -> Result<(), EncodeError> {
        self.start_value()?;
        self.stack.push(StackItem::ArrayItem { first: true });
        self.write(b"[")
    }

    fn end_array(&mut self) -> Result<(), EncodeError> {
        self.stack.pop();
        self.write(b"]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut JsonSerializer<Vec<u8>>) -> Result<(), EncodeError>) -> String {
        let mut ser = JsonSerializer::new(Vec::new());
        f(&mut ser).expect("serializing into a Vec cannot fail");
        String::from_utf8(ser.into_inner()).expect("output is UTF-8")
    }

    #[test]
    fn commas_between_items_and_fields() {
        let out = render(|ser| {
            ser.start_object(2)?;
            ser.serialize_field_name("a")?;
            ser.start_array(2)?;
            ser.serialize_u64(1)?;
            ser.serialize_i64(-2)?;
            ser.end_array()?;
            ser.serialize_field_name("b")?;
            ser.start_object(0)?;
            ser.end_object()?;
            ser.end_object()
        });
        assert_eq!(out, r#"{"a":[1,-2],"b":{}}"#);
    }

    #[test]
    fn pairs_are_objects() {
        let out = render(|ser| {
            ser.start_array(2)?;
            for (k, v) in [("x", true), ("y", false)] {
                ser.start_pair()?;
                ser.serialize_str(k)?;
                ser.pair_second()?;
                ser.serialize_bool(v)?;
                ser.end_pair()?;
            }
            ser.end_array()
        });
        assert_eq!(
            out,
            r#"[{"first":"x","second":true},{"first":"y","second":false}]"#
        );
    }

    #[test]
    fn strings_are_not_escaped() {
        let out = render(|ser| ser.serialize_str(r#"say "hi"\n"#));
        assert_eq!(out, r#""say "hi"\n""#);
    }

    #[test]
    fn floats_keep_a_fraction() {
        let out = render(|ser| {
            ser.start_array(2)?;
            ser.serialize_f64(4.0)?;
            ser.serialize_f32(0.5)?;
            ser.end_array()
        });
        assert_eq!(out, "[4.0,0.5]");
    }
}
