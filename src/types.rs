// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Logic handling the intermediate representation of Avro values.

use crate::AvroResult;
use crate::error::Details;
use serde_json::Value as JsonValue;

/// Represents any valid Avro value.
///
/// The schema compiler materializes record field defaults into this type;
/// callers that walk a schema against a [`BinaryDecoder`] typically collect
/// decoded data into it as well.
///
/// [`BinaryDecoder`]: crate::decode::BinaryDecoder
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A `null` Avro value.
    Null,
    /// A `boolean` Avro value.
    Boolean(bool),
    /// An `int` Avro value.
    Int(i32),
    /// A `long` Avro value.
    Long(i64),
    /// A `float` Avro value.
    Float(f32),
    /// A `double` Avro value.
    Double(f64),
    /// A `bytes` Avro value.
    Bytes(Vec<u8>),
    /// A `string` Avro value.
    String(String),
    /// A `fixed` Avro value: its size and its bytes.
    Fixed(usize, Vec<u8>),
    /// An `enum` Avro value: the symbol's position and the symbol itself.
    Enum(u32, String),
    /// A `union` Avro value: the branch index and the value of that branch.
    Union(u32, Box<Value>),
    /// An `array` Avro value.
    Array(Vec<Value>),
    /// A `map` Avro value, as ordered key-value pairs.
    Map(Vec<(String, Value)>),
    /// A `record` Avro value, as field name and value pairs in field
    /// declaration order.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// Render the value in the JSON form Avro uses for schema defaults.
    ///
    /// Bytes and fixed values map each byte to the character with that code
    /// point, unions render as their inner value, enums as their symbol.
    ///
    /// # Errors
    /// A non-finite float or double has no JSON number representation and
    /// fails with [`Details::ConvertF64ToJson`].
    pub fn to_json(&self) -> AvroResult<JsonValue> {
        fn number(n: f64) -> AvroResult<JsonValue> {
            serde_json::Number::from_f64(n)
                .map(JsonValue::Number)
                .ok_or_else(|| Details::ConvertF64ToJson(n).into())
        }

        fn object(fields: &[(String, Value)]) -> AvroResult<JsonValue> {
            let mut map = serde_json::Map::with_capacity(fields.len());
            for (key, value) in fields {
                map.insert(key.clone(), value.to_json()?);
            }
            Ok(JsonValue::Object(map))
        }

        match self {
            Value::Null => Ok(JsonValue::Null),
            Value::Boolean(b) => Ok(JsonValue::Bool(*b)),
            Value::Int(i) => Ok(JsonValue::from(*i)),
            Value::Long(i) => Ok(JsonValue::from(*i)),
            Value::Float(f) => number(*f as f64),
            Value::Double(d) => number(*d),
            Value::Bytes(bytes) | Value::Fixed(_, bytes) => Ok(JsonValue::String(
                bytes.iter().map(|b| *b as char).collect(),
            )),
            Value::String(s) => Ok(JsonValue::String(s.clone())),
            Value::Enum(_, symbol) => Ok(JsonValue::String(symbol.clone())),
            Value::Union(_, inner) => inner.to_json(),
            Value::Array(items) => Ok(JsonValue::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<AvroResult<_>>()?,
            )),
            Value::Map(entries) => object(entries),
            Value::Record(fields) => object(fields),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_to_json() -> anyhow::Result<()> {
        assert_eq!(Value::Null.to_json()?, json!(null));
        assert_eq!(Value::Int(42).to_json()?, json!(42));
        assert_eq!(Value::Double(0.5).to_json()?, json!(0.5));
        assert_eq!(Value::from("hello").to_json()?, json!("hello"));
        assert_eq!(Value::Bytes(vec![0x61, 0xff]).to_json()?, json!("aÿ"));
        assert_eq!(
            Value::Union(0, Box::new(Value::Long(3))).to_json()?,
            json!(3)
        );
        assert_eq!(
            Value::Record(vec![("x".to_owned(), Value::Int(1))]).to_json()?,
            json!({"x": 1})
        );
        Ok(())
    }

    #[test]
    fn test_to_json_rejects_non_finite_floats() {
        assert!(Value::Double(f64::NAN).to_json().is_err());
        assert!(Value::Float(f32::INFINITY).to_json().is_err());
    }
}
