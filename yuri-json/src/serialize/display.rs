use core::fmt::Write;

use super::Serializer;
use crate::EncodeError;

#[derive(Debug)]
enum Frame {
    List { first: bool },
    Object { first: bool },
    Pair,
    /// A `&` was just written; the pointee follows without a separator
    Pointee,
}

/// A serializer for the human-readable display form.
///
/// Field names are bare and followed by `=`, strings are quoted, owning
/// pointers are prefixed with `&`, pairs are written `<first:second>` and
/// empty nullables are `null`.
#[derive(Debug, Default)]
pub struct DisplaySerializer {
    out: String,
    stack: Vec<Frame>,
}

impl DisplaySerializer {
    /// Creates a serializer with empty output
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the output written so far
    pub fn into_string(self) -> String {
        self.out
    }

    fn start_value(&mut self) {
        match self.stack.last_mut() {
            Some(Frame::List { first }) => {
                if !core::mem::replace(first, false) {
                    self.out.push(',');
                }
            }
            Some(Frame::Pointee) => {
                self.stack.pop();
            }
            _ => {}
        }
    }

    fn write(&mut self, args: core::fmt::Arguments<'_>) -> Result<(), EncodeError> {
        self.start_value();
        // writing into a String never fails
        let _ = self.out.write_fmt(args);
        Ok(())
    }
}

impl Serializer for DisplaySerializer {
    fn serialize_bool(&mut self, value: bool) -> Result<(), EncodeError> {
        self.write(format_args!("{value}"))
    }

    fn serialize_u64(&mut self, value: u64) -> Result<(), EncodeError> {
        self.write(format_args!("{value}"))
    }

    fn serialize_i64(&mut self, value: i64) -> Result<(), EncodeError> {
        self.write(format_args!("{value}"))
    }

    fn serialize_f32(&mut self, value: f32) -> Result<(), EncodeError> {
        self.write(format_args!("{value}"))
    }

    fn serialize_f64(&mut self, value: f64) -> Result<(), EncodeError> {
        self.write(format_args!("{value}"))
    }

    fn serialize_char(&mut self, value: char) -> Result<(), EncodeError> {
        self.write(format_args!("'{value}'"))
    }

    fn serialize_str(&mut self, value: &str) -> Result<(), EncodeError> {
        self.write(format_args!("\"{value}\""))
    }

    fn serialize_null(&mut self) -> Result<(), EncodeError> {
        self.write(format_args!("null"))
    }

    fn start_object(&mut self, _len: usize) -> Result<(), EncodeError> {
        self.write(format_args!("{{"))?;
        self.stack.push(Frame::Object { first: true });
        Ok(())
    }

    fn serialize_field_name(&mut self, name: &str) -> Result<(), EncodeError> {
        if let Some(Frame::Object { first }) = self.stack.last_mut() {
            if !core::mem::replace(first, false) {
                self.out.push(',');
            }
        }
        self.out.push_str(name);
        self.out.push('=');
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), EncodeError> {
        self.stack.pop();
        self.out.push('}');
        Ok(())
    }

    fn start_array(&mut self, _len: usize) -> Result<(), EncodeError> {
        self.write(format_args!("["))?;
        self.stack.push(Frame::List { first: true });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), EncodeError> {
        self.stack.pop();
        self.out.push(']');
        Ok(())
    }

    fn start_pair(&mut self) -> Result<(), EncodeError> {
        self.write(format_args!("<"))?;
        self.stack.push(Frame::Pair);
        Ok(())
    }

    fn pair_second(&mut self) -> Result<(), EncodeError> {
        self.out.push(':');
        Ok(())
    }

    fn end_pair(&mut self) -> Result<(), EncodeError> {
        self.stack.pop();
        self.out.push('>');
        Ok(())
    }

    fn start_pointer(&mut self) -> Result<(), EncodeError> {
        self.write(format_args!("&"))?;
        self.stack.push(Frame::Pointee);
        Ok(())
    }
}
