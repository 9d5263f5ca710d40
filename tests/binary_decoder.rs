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

//! Decoding whole datums by walking a compiled schema against a
//! [`BinaryDecoder`].

use avro_core::schema::{
    ArraySchema, DecimalSchema, EnumSchema, FixedSchema, InnerDecimalSchema, MapSchema,
    RecordSchema, Schema, UuidSchema,
};
use avro_core::{BinaryDecoder, ValidSchema, Value, compile_json_schema_from_str};
use pretty_assertions::assert_eq;
use std::io::Read;

/// Read one datum of `schema` off the decoder.
///
/// This is the caller side of the decoder's contract: the schema dictates
/// which typed operation to invoke next, the decoder never looks at it.
fn read_datum<R: Read>(
    decoder: &mut BinaryDecoder<R>,
    schema: &Schema,
    valid: &ValidSchema,
) -> anyhow::Result<Value> {
    let value = match schema {
        Schema::Null => {
            decoder.decode_null()?;
            Value::Null
        }
        Schema::Boolean => Value::Boolean(decoder.decode_bool()?),
        Schema::Int | Schema::Date | Schema::TimeMillis => Value::Int(decoder.decode_int()?),
        Schema::Long
        | Schema::TimeMicros
        | Schema::TimestampMillis
        | Schema::TimestampMicros => Value::Long(decoder.decode_long()?),
        Schema::Float => Value::Float(decoder.decode_float()?),
        Schema::Double => Value::Double(decoder.decode_double()?),
        Schema::Bytes
        | Schema::Decimal(DecimalSchema {
            inner: InnerDecimalSchema::Bytes,
            ..
        }) => Value::Bytes(decoder.decode_bytes()?),
        Schema::String | Schema::Uuid(UuidSchema::String) => {
            Value::String(decoder.decode_string()?)
        }
        Schema::Fixed(FixedSchema { size, .. })
        | Schema::Duration(FixedSchema { size, .. })
        | Schema::Decimal(DecimalSchema {
            inner: InnerDecimalSchema::Fixed(FixedSchema { size, .. }),
            ..
        })
        | Schema::Uuid(UuidSchema::Fixed(FixedSchema { size, .. })) => {
            Value::Fixed(*size, decoder.decode_fixed(*size)?)
        }
        Schema::Enum(EnumSchema { symbols, .. }) => {
            let index = decoder.decode_enum()?;
            let symbol = symbols
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("enum index {index} out of bounds"))?;
            Value::Enum(index as u32, symbol.clone())
        }
        Schema::Union(union) => {
            let index = decoder.decode_union_index()?;
            let branch = union
                .variants()
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("union index {index} out of bounds"))?;
            Value::Union(index as u32, Box::new(read_datum(decoder, branch, valid)?))
        }
        Schema::Array(ArraySchema { items, .. }) => {
            let mut collected = Vec::new();
            let mut count = decoder.array_start()?;
            while count != 0 {
                for _ in 0..count {
                    collected.push(read_datum(decoder, items, valid)?);
                }
                count = decoder.array_next()?;
            }
            Value::Array(collected)
        }
        Schema::Map(MapSchema { types, .. }) => {
            let mut collected = Vec::new();
            let mut count = decoder.map_start()?;
            while count != 0 {
                for _ in 0..count {
                    let key = decoder.decode_string()?;
                    collected.push((key, read_datum(decoder, types, valid)?));
                }
                count = decoder.map_next()?;
            }
            Value::Map(collected)
        }
        Schema::Record(RecordSchema { fields, .. }) => {
            let mut collected = Vec::with_capacity(fields.len());
            for field in fields {
                collected.push((
                    field.name.clone(),
                    read_datum(decoder, &field.schema, valid)?,
                ));
            }
            Value::Record(collected)
        }
        Schema::Ref { name } => {
            let resolved = valid
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("unresolved reference {name}"))?;
            read_datum(decoder, resolved, valid)?
        }
    };
    Ok(value)
}

fn decode(schema_json: &str, encoded: &[u8]) -> anyhow::Result<Value> {
    let schema = compile_json_schema_from_str(schema_json)?;
    let mut decoder = BinaryDecoder::new(encoded);
    read_datum(&mut decoder, schema.root(), &schema)
}

#[test]
fn decode_int() -> anyhow::Result<()> {
    assert_eq!(decode(r#""int""#, &[0x04])?, Value::Int(2));
    Ok(())
}

#[test]
fn decode_long() -> anyhow::Result<()> {
    assert_eq!(decode(r#""long""#, &[0x01])?, Value::Long(-1));
    assert_eq!(decode(r#""long""#, &[0x7f])?, Value::Long(-64));
    assert_eq!(decode(r#""long""#, &[0x80, 0x01])?, Value::Long(64));
    Ok(())
}

#[test]
fn decode_array_of_ints() -> anyhow::Result<()> {
    assert_eq!(
        decode(r#"{"type": "array", "items": "int"}"#, &[0x04, 0x02, 0x04, 0x00])?,
        Value::Array(vec![Value::Int(1), Value::Int(2)])
    );
    Ok(())
}

#[test]
fn decode_map_of_strings() -> anyhow::Result<()> {
    assert_eq!(
        decode(
            r#"{"type": "map", "values": "string"}"#,
            &[0x02, 0x02, 0x61, 0x02, 0x62, 0x00]
        )?,
        Value::Map(vec![("a".to_string(), Value::String("b".to_string()))])
    );
    Ok(())
}

#[test]
fn decode_fixed_md5() -> anyhow::Result<()> {
    let bytes: Vec<u8> = (0u8..16).collect();
    assert_eq!(
        decode(r#"{"type": "fixed", "name": "md5", "size": 16}"#, &bytes)?,
        Value::Fixed(16, bytes)
    );
    Ok(())
}

#[test]
fn decode_recursive_record() -> anyhow::Result<()> {
    // Node { next: Node { next: null } }
    let encoded = [
        0x02, // next: union branch 1 (Node)
        0x00, // next.next: union branch 0 (null)
    ];
    let value = decode(
        r#"{
            "type": "record",
            "name": "Node",
            "fields": [
                {"name": "next", "type": ["null", "Node"]}
            ]
        }"#,
        &encoded,
    )?;

    assert_eq!(
        value,
        Value::Record(vec![(
            "next".to_string(),
            Value::Union(
                1,
                Box::new(Value::Record(vec![(
                    "next".to_string(),
                    Value::Union(0, Box::new(Value::Null)),
                )])),
            ),
        )])
    );
    Ok(())
}

#[test]
fn decode_enum_symbol() -> anyhow::Result<()> {
    let value = decode(
        r#"{"type": "enum", "name": "Suit", "symbols": ["SPADES", "HEARTS", "DIAMONDS"]}"#,
        &[0x04],
    )?;
    assert_eq!(value, Value::Enum(2, "DIAMONDS".to_string()));
    Ok(())
}

#[test]
fn decode_record_with_mixed_fields() -> anyhow::Result<()> {
    let mut encoded = Vec::new();
    encoded.push(0x01); // active: true
    encoded.extend_from_slice(&[0x06, 0x62, 0x6f, 0x62]); // name: "bob"
    encoded.extend_from_slice(&[0x00, 0x00, 0x80, 0x3f]); // score: 1.0f

    let value = decode(
        r#"{
            "type": "record",
            "name": "Player",
            "fields": [
                {"name": "active", "type": "boolean"},
                {"name": "name", "type": "string"},
                {"name": "score", "type": "float"}
            ]
        }"#,
        &encoded,
    )?;

    assert_eq!(
        value,
        Value::Record(vec![
            ("active".to_string(), Value::Boolean(true)),
            ("name".to_string(), Value::String("bob".to_string())),
            ("score".to_string(), Value::Float(1.0)),
        ])
    );
    Ok(())
}
