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

//! Materialization of JSON field defaults into [`Value`] datums.

use crate::AvroResult;
use crate::error::Details;
use crate::schema::{
    ArraySchema, DecimalSchema, EnumSchema, FixedSchema, InnerDecimalSchema, MapSchema, Names,
    RecordSchema, Schema, UnionSchema, UuidSchema,
};
use crate::types::Value;
use serde_json::Value as JsonValue;

/// Materialize the JSON `default` of a record field into a [`Value`] shaped
/// by the field's `schema`.
///
/// The JSON form must match the schema: booleans for `boolean`, integers for
/// `int` and `long`, strings for `string`, `bytes`, `fixed` and `enum`
/// (bytes and fixed take each character's low byte), objects for `record`
/// and `map`, arrays for `array`. A `union` default is always materialized
/// against its **first** branch, so a default matching only a later branch
/// is rejected. Logical type annotations play no part; the default follows
/// the underlying type.
pub(crate) fn datum_from_default(
    schema: &Schema,
    json: &JsonValue,
    names: &Names,
) -> AvroResult<Value> {
    fn wrong_type(expected: &'static str, json: &JsonValue) -> crate::Error {
        Details::FieldDefaultWrongType {
            expected,
            value: json.clone(),
        }
        .into()
    }

    fn bin(s: &str) -> Vec<u8> {
        s.chars().map(|c| c as u8).collect()
    }

    match schema {
        Schema::Null => match json {
            JsonValue::Null => Ok(Value::Null),
            _ => Err(wrong_type("null", json)),
        },
        Schema::Boolean => json
            .as_bool()
            .map(Value::Boolean)
            .ok_or_else(|| wrong_type("boolean", json)),
        // int defaults are written as longs; the value is truncated
        Schema::Int | Schema::Date | Schema::TimeMillis => json
            .as_i64()
            .map(|n| Value::Int(n as i32))
            .ok_or_else(|| wrong_type("integer", json)),
        Schema::Long | Schema::TimeMicros | Schema::TimestampMillis | Schema::TimestampMicros => {
            json.as_i64()
                .map(Value::Long)
                .ok_or_else(|| wrong_type("integer", json))
        }
        Schema::Float => match json {
            JsonValue::Number(n) => n
                .as_i64()
                .map(|i| i as f32)
                .or_else(|| n.as_f64().map(|d| d as f32))
                .map(Value::Float)
                .ok_or_else(|| wrong_type("number", json)),
            _ => Err(wrong_type("number", json)),
        },
        Schema::Double => match json {
            JsonValue::Number(n) => n
                .as_i64()
                .map(|i| i as f64)
                .or_else(|| n.as_f64())
                .map(Value::Double)
                .ok_or_else(|| wrong_type("number", json)),
            _ => Err(wrong_type("number", json)),
        },
        Schema::Bytes
        | Schema::Decimal(DecimalSchema {
            inner: InnerDecimalSchema::Bytes,
            ..
        }) => json
            .as_str()
            .map(|s| Value::Bytes(bin(s)))
            .ok_or_else(|| wrong_type("string", json)),
        Schema::String | Schema::Uuid(UuidSchema::String) => json
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| wrong_type("string", json)),
        Schema::Fixed(FixedSchema { size, .. })
        | Schema::Duration(FixedSchema { size, .. })
        | Schema::Decimal(DecimalSchema {
            inner: InnerDecimalSchema::Fixed(FixedSchema { size, .. }),
            ..
        })
        | Schema::Uuid(UuidSchema::Fixed(FixedSchema { size, .. })) => json
            .as_str()
            .map(|s| Value::Fixed(*size, bin(s)))
            .ok_or_else(|| wrong_type("string", json)),
        Schema::Enum(EnumSchema { symbols, .. }) => match json.as_str() {
            // the symbol is not validated against the symbol list here
            Some(symbol) => {
                let index = symbols.iter().position(|s| s == symbol).unwrap_or(0);
                Ok(Value::Enum(index as u32, symbol.to_string()))
            }
            None => Err(wrong_type("string", json)),
        },
        Schema::Record(RecordSchema { fields, .. }) => match json.as_object() {
            Some(object) => {
                let mut datums = Vec::with_capacity(fields.len());
                for field in fields {
                    let value = object
                        .get(&field.name)
                        .ok_or_else(|| Details::MissingFieldDefault(field.name.clone()))?;
                    datums.push((
                        field.name.clone(),
                        datum_from_default(&field.schema, value, names)?,
                    ));
                }
                Ok(Value::Record(datums))
            }
            None => Err(wrong_type("object", json)),
        },
        Schema::Array(ArraySchema { items, .. }) => match json.as_array() {
            Some(elements) => Ok(Value::Array(
                elements
                    .iter()
                    .map(|element| datum_from_default(items, element, names))
                    .collect::<AvroResult<_>>()?,
            )),
            None => Err(wrong_type("array", json)),
        },
        Schema::Map(MapSchema { types, .. }) => match json.as_object() {
            Some(object) => Ok(Value::Map(
                object
                    .iter()
                    .map(|(key, value)| {
                        Ok((key.clone(), datum_from_default(types, value, names)?))
                    })
                    .collect::<AvroResult<_>>()?,
            )),
            None => Err(wrong_type("object", json)),
        },
        // a union default always matches the first branch
        Schema::Union(UnionSchema { schemas }) => {
            let first = schemas.first().ok_or(Details::EmptyUnion)?;
            Ok(Value::Union(
                0,
                Box::new(datum_from_default(first, json, names)?),
            ))
        }
        Schema::Ref { name } => match names.get(name) {
            Some(resolved) => datum_from_default(resolved, json, names),
            None => Err(Details::SchemaResolutionError(name.clone()).into()),
        },
    }
}
