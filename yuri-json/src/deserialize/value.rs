use log::trace;
use yuri_core::Reflect;

use super::Decoder;
use crate::DecodeError;

/// An untyped value, as read when nothing says what type to expect
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Any number, widened to `f64`
    Number(f64),
    /// A string, escapes left as written
    String(String),
    /// `[...]`
    List(Vec<Value>),
    /// `{...}`, in input order. A repeated key replaces the earlier value
    /// in place.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Looks up a key of a map
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// The string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The elements, if this is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Decoder<'_> {
    /// Reads any value without a destination type, branching on its first
    /// significant character
    pub fn parse_value(&mut self) -> Result<Value, DecodeError> {
        if self.null_next("a value")? {
            self.eat_literal("null")?;
            return Ok(Value::Null);
        }
        match self.peek("a value")? {
            b'[' => {
                self.open(b'[', "'['")?;
                let mut items = Vec::new();
                if !self.eat_close(b']') {
                    loop {
                        items.push(self.parse_value()?);
                        if !self.eat(b',') {
                            break;
                        }
                    }
                    self.close(b']', "',' or ']'")?;
                }
                Ok(Value::List(items))
            }
            b'{' => {
                self.open(b'{', "'{'")?;
                let mut entries: Vec<(String, Value)> = Vec::new();
                if !self.eat_close(b'}') {
                    loop {
                        let key = self.parse_str()?;
                        self.expect(b':', "':'")?;
                        let value = self.parse_value()?;
                        match entries.iter_mut().find(|(k, _)| k == key) {
                            Some((_, slot)) => *slot = value,
                            None => entries.push((key.to_owned(), value)),
                        }
                        if !self.eat(b',') {
                            break;
                        }
                    }
                    self.close(b'}', "',' or '}'")?;
                }
                Ok(Value::Map(entries))
            }
            b'"' => Ok(Value::String(self.parse_str()?.to_owned())),
            b't' | b'f' => Ok(Value::Bool(self.parse_bool()?)),
            _ => Ok(Value::Number(self.parse_number(<f64 as Reflect>::SHAPE)?)),
        }
    }

    /// Reads any value and throws it away.
    ///
    /// Works without recursion and without building anything, so nesting
    /// depth is only bounded by the input. Only the closing bracket of each
    /// open array or object is remembered.
    pub fn skip_value(&mut self) -> Result<(), DecodeError> {
        let start = self.pos();
        let mut closers = Vec::new();
        loop {
            // one value, or the opening of a container
            match self.peek("a value")? {
                open @ (b'[' | b'{') => {
                    self.expect(open, "'[' or '{'")?;
                    let close = if open == b'[' { b']' } else { b'}' };
                    if !self.eat(close) {
                        closers.push(close);
                        if close == b'}' {
                            self.parse_str()?;
                            self.expect(b':', "':'")?;
                        }
                        continue;
                    }
                }
                b'"' => {
                    self.parse_str()?;
                }
                b't' | b'f' => {
                    self.parse_bool()?;
                }
                _ if self.null_next("a value")? => self.eat_literal("null")?,
                _ => {
                    self.parse_number::<f64>(<f64 as Reflect>::SHAPE)?;
                }
            }

            // close finished containers until one has another element
            loop {
                let Some(&close) = closers.last() else {
                    trace!("skipped bytes {start}..{}", self.pos());
                    return Ok(());
                };
                if self.eat(b',') {
                    if close == b'}' {
                        self.parse_str()?;
                        self.expect(b':', "':'")?;
                    }
                    break;
                }
                let wanted = if close == b']' { "',' or ']'" } else { "',' or '}'" };
                self.expect(close, wanted)?;
                closers.pop();
            }
        }
    }
}
