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

//! Logic for compiling and interacting with schemas in Avro format.

mod default;
mod name;
mod parser;
mod record;
mod union;

pub use crate::schema::{
    name::{Name, Names, Namespace},
    record::{RecordField, RecordFieldBuilder, RecordSchema, RecordSchemaBuilder},
    union::UnionSchema,
};
pub(crate) use crate::schema::parser::Parser;

use crate::{
    AvroResult,
    error::{Details, Error},
};
use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use strum::{Display, EnumDiscriminants};

/// Represents documentation for complex Avro schemas.
pub type Documentation = Option<String>;

/// Represents any valid Avro schema.
///
/// More information about Avro schemas can be found in the
/// [Avro specification](https://avro.apache.org/docs/++version++/specification/#schema-declaration)
#[derive(Clone, Debug, PartialEq, EnumDiscriminants, Display)]
#[strum_discriminants(name(SchemaKind), derive(Hash, Ord, PartialOrd))]
pub enum Schema {
    /// A `null` Avro schema.
    Null,
    /// A `boolean` Avro schema.
    Boolean,
    /// An `int` Avro schema.
    Int,
    /// A `long` Avro schema.
    Long,
    /// A `float` Avro schema.
    Float,
    /// A `double` Avro schema.
    Double,
    /// A `bytes` Avro schema.
    ///
    /// `Bytes` represents a sequence of 8-bit unsigned bytes.
    Bytes,
    /// A `string` Avro schema.
    ///
    /// `String` represents a unicode character sequence.
    String,
    /// An `array` Avro schema.
    ///
    /// All items will have the same schema.
    Array(ArraySchema),
    /// A `map` Avro schema.
    ///
    /// Keys are always strings and all values will have the same schema.
    Map(MapSchema),
    /// A `union` Avro schema.
    Union(UnionSchema),
    /// A `record` Avro schema.
    Record(RecordSchema),
    /// An `enum` Avro schema.
    Enum(EnumSchema),
    /// A `fixed` Avro schema.
    Fixed(FixedSchema),
    /// Logical type which represents `Decimal` values over a `bytes` or
    /// `fixed` schema.
    Decimal(DecimalSchema),
    /// A universally unique identifier, annotating a string or a fixed of
    /// size 16.
    Uuid(UuidSchema),
    /// Logical type which represents the number of days since the unix
    /// epoch, annotating an `int`.
    Date,
    /// The time of day in number of milliseconds after midnight, annotating
    /// an `int`.
    TimeMillis,
    /// The time of day in number of microseconds after midnight, annotating
    /// a `long`.
    TimeMicros,
    /// An instant in time represented as the number of milliseconds after
    /// the UNIX epoch, annotating a `long`.
    TimestampMillis,
    /// An instant in time represented as the number of microseconds after
    /// the UNIX epoch, annotating a `long`.
    TimestampMicros,
    /// An amount of time defined by months, days and milliseconds,
    /// annotating a fixed of size 12.
    Duration(FixedSchema),
    /// A reference to another schema, by fully qualified name.
    ///
    /// This is how named types are referenced inside a schema graph,
    /// including a record referencing itself; the referenced definition
    /// lives in the [`Names`] table of the enclosing [`ValidSchema`].
    Ref { name: Name },
}

/// A description of an Array schema.
#[derive(Clone, Debug, PartialEq)]
pub struct ArraySchema {
    /// The schema of the array's items.
    pub items: Box<Schema>,
    /// The documentation of the schema.
    pub doc: Documentation,
}

/// A description of a Map schema. Map keys are always strings.
#[derive(Clone, Debug, PartialEq)]
pub struct MapSchema {
    /// The schema of the map's values.
    pub types: Box<Schema>,
    /// The documentation of the schema.
    pub doc: Documentation,
}

/// A description of an Enum schema.
#[derive(bon::Builder, Debug, Clone, PartialEq)]
pub struct EnumSchema {
    /// The name of the schema
    pub name: Name,
    /// The documentation of the schema
    #[builder(default)]
    pub doc: Documentation,
    /// The set of symbols of the schema
    pub symbols: Vec<String>,
}

/// A description of a Fixed schema.
#[derive(bon::Builder, Debug, Clone, PartialEq)]
pub struct FixedSchema {
    /// The name of the schema
    pub name: Name,
    /// The documentation of the schema
    #[builder(default)]
    pub doc: Documentation,
    /// The size of the fixed schema, in bytes. Always strictly positive.
    pub size: usize,
}

impl FixedSchema {
    fn serialize_to_map<S>(&self, mut map: S::SerializeMap) -> Result<S::SerializeMap, S::Error>
    where
        S: Serializer,
    {
        map.serialize_entry("type", "fixed")?;
        if let Some(ref n) = self.name.namespace {
            map.serialize_entry("namespace", n)?;
        }
        map.serialize_entry("name", &self.name.name)?;
        if let Some(docstr) = self.doc.as_ref() {
            map.serialize_entry("doc", docstr)?;
        }
        map.serialize_entry("size", &self.size)?;
        Ok(map)
    }
}

/// A description of a Decimal schema.
///
/// `scale` defaults to 0 and is an integer greater than or equal to 0 and
/// `precision` is an integer greater than 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalSchema {
    /// The number of digits in the unscaled value
    pub precision: DecimalMetadata,
    /// The number of digits to the right of the decimal point
    pub scale: DecimalMetadata,
    /// The inner schema of the decimal (fixed or bytes)
    pub inner: InnerDecimalSchema,
}

/// The inner schema of the Decimal type.
#[derive(Debug, Clone, PartialEq)]
pub enum InnerDecimalSchema {
    Bytes,
    Fixed(FixedSchema),
}

impl TryFrom<Schema> for InnerDecimalSchema {
    type Error = Error;

    fn try_from(value: Schema) -> Result<Self, Self::Error> {
        match value {
            Schema::Bytes => Ok(InnerDecimalSchema::Bytes),
            Schema::Fixed(fixed) => Ok(InnerDecimalSchema::Fixed(fixed)),
            _ => Err(Details::ResolveDecimalSchema((&value).into()).into()),
        }
    }
}

/// The inner schema of the Uuid type.
#[derive(Debug, Clone, PartialEq)]
pub enum UuidSchema {
    /// [`Schema::String`].
    String,
    /// [`Schema::Fixed`] with size of 16.
    Fixed(FixedSchema),
}

type DecimalMetadata = usize;
pub(crate) type Precision = DecimalMetadata;
pub(crate) type Scale = DecimalMetadata;

impl SchemaKind {
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            SchemaKind::Null
                | SchemaKind::Boolean
                | SchemaKind::Int
                | SchemaKind::Long
                | SchemaKind::Double
                | SchemaKind::Float
                | SchemaKind::Bytes
                | SchemaKind::String,
        )
    }
}

impl Schema {
    /// Returns whether the schema represents a named type according to the
    /// Avro specification.
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            Schema::Ref { .. }
                | Schema::Record(_)
                | Schema::Enum(_)
                | Schema::Fixed(_)
                | Schema::Decimal(DecimalSchema {
                    inner: InnerDecimalSchema::Fixed(_),
                    ..
                })
                | Schema::Uuid(UuidSchema::Fixed(_))
                | Schema::Duration(_)
        )
    }

    /// Returns the name of the schema if it has one.
    pub fn name(&self) -> Option<&Name> {
        match self {
            Schema::Ref { name, .. }
            | Schema::Record(RecordSchema { name, .. })
            | Schema::Enum(EnumSchema { name, .. })
            | Schema::Fixed(FixedSchema { name, .. })
            | Schema::Decimal(DecimalSchema {
                inner: InnerDecimalSchema::Fixed(FixedSchema { name, .. }),
                ..
            })
            | Schema::Uuid(UuidSchema::Fixed(FixedSchema { name, .. }))
            | Schema::Duration(FixedSchema { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Returns the namespace of the schema if it has one.
    pub fn namespace(&self) -> Namespace {
        self.name().and_then(|n| n.namespace.clone())
    }

    /// Returns the doc of the schema if it has one.
    pub fn doc(&self) -> Option<&String> {
        match self {
            Schema::Record(RecordSchema { doc, .. })
            | Schema::Enum(EnumSchema { doc, .. })
            | Schema::Fixed(FixedSchema { doc, .. })
            | Schema::Array(ArraySchema { doc, .. })
            | Schema::Map(MapSchema { doc, .. })
            | Schema::Decimal(DecimalSchema {
                inner: InnerDecimalSchema::Fixed(FixedSchema { doc, .. }),
                ..
            })
            | Schema::Uuid(UuidSchema::Fixed(FixedSchema { doc, .. }))
            | Schema::Duration(FixedSchema { doc, .. }) => doc.as_ref(),
            _ => None,
        }
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self {
            Schema::Ref { name } => serializer.serialize_str(&name.fullname(None)),
            Schema::Null => serializer.serialize_str("null"),
            Schema::Boolean => serializer.serialize_str("boolean"),
            Schema::Int => serializer.serialize_str("int"),
            Schema::Long => serializer.serialize_str("long"),
            Schema::Float => serializer.serialize_str("float"),
            Schema::Double => serializer.serialize_str("double"),
            Schema::Bytes => serializer.serialize_str("bytes"),
            Schema::String => serializer.serialize_str("string"),
            Schema::Array(ArraySchema { items, doc }) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
                if let Some(docstr) = doc {
                    map.serialize_entry("doc", docstr)?;
                }
                map.end()
            }
            Schema::Map(MapSchema { types, doc }) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "map")?;
                map.serialize_entry("values", types)?;
                if let Some(docstr) = doc {
                    map.serialize_entry("doc", docstr)?;
                }
                map.end()
            }
            Schema::Union(inner) => {
                let variants = inner.variants();
                let mut seq = serializer.serialize_seq(Some(variants.len()))?;
                for v in variants {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Schema::Record(RecordSchema {
                name,
                doc,
                fields,
                lookup: _lookup,
            }) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "record")?;
                if let Some(ref n) = name.namespace {
                    map.serialize_entry("namespace", n)?;
                }
                map.serialize_entry("name", &name.name)?;
                if let Some(docstr) = doc {
                    map.serialize_entry("doc", docstr)?;
                }
                map.serialize_entry("fields", fields)?;
                map.end()
            }
            Schema::Enum(EnumSchema { name, doc, symbols }) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "enum")?;
                if let Some(ref n) = name.namespace {
                    map.serialize_entry("namespace", n)?;
                }
                map.serialize_entry("name", &name.name)?;
                if let Some(docstr) = doc {
                    map.serialize_entry("doc", docstr)?;
                }
                map.serialize_entry("symbols", symbols)?;
                map.end()
            }
            Schema::Fixed(fixed_schema) => {
                let mut map = serializer.serialize_map(None)?;
                map = fixed_schema.serialize_to_map::<S>(map)?;
                map.end()
            }
            Schema::Decimal(DecimalSchema {
                scale,
                precision,
                inner,
            }) => {
                let mut map = serializer.serialize_map(None)?;
                match inner {
                    InnerDecimalSchema::Fixed(fixed_schema) => {
                        map = fixed_schema.serialize_to_map::<S>(map)?;
                    }
                    InnerDecimalSchema::Bytes => {
                        map.serialize_entry("type", "bytes")?;
                    }
                }
                map.serialize_entry("logicalType", "decimal")?;
                map.serialize_entry("scale", scale)?;
                map.serialize_entry("precision", precision)?;
                map.end()
            }
            Schema::Uuid(inner) => {
                let mut map = serializer.serialize_map(None)?;
                match inner {
                    UuidSchema::String => {
                        map.serialize_entry("type", "string")?;
                    }
                    UuidSchema::Fixed(fixed_schema) => {
                        map = fixed_schema.serialize_to_map::<S>(map)?;
                    }
                }
                map.serialize_entry("logicalType", "uuid")?;
                map.end()
            }
            Schema::Date => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "int")?;
                map.serialize_entry("logicalType", "date")?;
                map.end()
            }
            Schema::TimeMillis => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "int")?;
                map.serialize_entry("logicalType", "time-millis")?;
                map.end()
            }
            Schema::TimeMicros => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "long")?;
                map.serialize_entry("logicalType", "time-micros")?;
                map.end()
            }
            Schema::TimestampMillis => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "long")?;
                map.serialize_entry("logicalType", "timestamp-millis")?;
                map.end()
            }
            Schema::TimestampMicros => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "long")?;
                map.serialize_entry("logicalType", "timestamp-micros")?;
                map.end()
            }
            Schema::Duration(fixed_schema) => {
                let mut map = serializer.serialize_map(None)?;
                map = fixed_schema.serialize_to_map::<S>(map)?;
                map.serialize_entry("logicalType", "duration")?;
                map.end()
            }
        }
    }
}

/// A compiled schema graph whose named references are all resolved.
///
/// Construction re-walks the graph and rejects any [`Schema::Ref`] that does
/// not resolve against the symbol table, so holders can follow references
/// through [`get`](Self::get) without worrying about dangling names.
///
/// A `ValidSchema` is immutable and can be shared freely between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidSchema {
    root: Schema,
    names: Names,
}

impl ValidSchema {
    /// Wrap a compiled `root` schema and its symbol table.
    ///
    /// # Errors
    /// Fails with [`Details::SchemaResolutionError`] when the graph holds a
    /// reference to a name that is not in `names`.
    pub fn new(root: Schema, names: Names) -> AvroResult<Self> {
        validate(&root, &names)?;
        for schema in names.values() {
            validate(schema, &names)?;
        }
        Ok(Self { root, names })
    }

    /// The root node of the schema graph.
    pub fn root(&self) -> &Schema {
        &self.root
    }

    /// All named types of the schema graph, by fully qualified name.
    pub fn names(&self) -> &Names {
        &self.names
    }

    /// Resolve a named reference.
    pub fn get(&self, name: &Name) -> Option<&Schema> {
        self.names.get(name)
    }

    /// Render the schema back to pretty-printed JSON.
    pub fn to_json(&self) -> AvroResult<String> {
        serde_json::to_string_pretty(&self.root)
            .map_err(|e| Details::SerializeSchemaJson(e).into())
    }
}

fn validate(schema: &Schema, names: &Names) -> AvroResult<()> {
    match schema {
        Schema::Ref { name } => {
            if !names.contains_key(name) {
                return Err(Details::SchemaResolutionError(name.clone()).into());
            }
        }
        Schema::Record(RecordSchema { fields, .. }) => {
            for field in fields {
                validate(&field.schema, names)?;
            }
        }
        Schema::Array(ArraySchema { items, .. }) => validate(items, names)?,
        Schema::Map(MapSchema { types, .. }) => validate(types, names)?,
        Schema::Union(UnionSchema { schemas }) => {
            for branch in schemas {
                validate(branch, names)?;
            }
        }
        _ => (),
    }
    Ok(())
}

/// Compile a JSON schema document held in a string.
pub fn compile_json_schema_from_str(input: &str) -> AvroResult<ValidSchema> {
    let value = serde_json::from_str(input).map_err(Details::ParseSchemaJson)?;
    compile_json_schema(&value)
}

/// Compile a JSON schema document held in a byte slice.
pub fn compile_json_schema_from_slice(input: &[u8]) -> AvroResult<ValidSchema> {
    let value = serde_json::from_slice(input).map_err(Details::ParseSchemaJson)?;
    compile_json_schema(&value)
}

/// Compile a JSON schema document read from `reader`.
pub fn compile_json_schema_from_reader<R: Read>(reader: &mut R) -> AvroResult<ValidSchema> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(Details::ReadSchemaFromReader)?;
    compile_json_schema_from_str(&input)
}

/// Compile the JSON schema document in the file at `path`.
pub fn compile_json_schema_from_file(path: impl AsRef<Path>) -> AvroResult<ValidSchema> {
    let mut file = File::open(path).map_err(Details::ReadSchemaFromReader)?;
    compile_json_schema_from_reader(&mut file)
}

/// Compile an already parsed JSON schema document.
pub fn compile_json_schema(value: &serde_json::Value) -> AvroResult<ValidSchema> {
    let mut parser = Parser::default();
    let root = parser.parse(value, &None)?;
    ValidSchema::new(root, parser.into_names())
}
