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

use crate::AvroResult;
use crate::error::Details;
use crate::schema::record::RecordField;
use crate::schema::{
    ArraySchema, DecimalSchema, EnumSchema, FixedSchema, MapSchema, Name, Names, Namespace,
    Precision, RecordSchema, Scale, Schema, SchemaKind, UnionSchema, UuidSchema,
};
use crate::util::MapHelper;
use crate::validator::validate_enum_symbol_name;
use log::{debug, error, warn};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Compiles a JSON schema document into a [`Schema`] graph.
///
/// One parser instance compiles one document; the symbol table it builds up
/// along the way ends up in the [`ValidSchema`](crate::schema::ValidSchema).
#[derive(Default)]
pub(crate) struct Parser {
    /// Names whose definitions are currently being compiled. A field type
    /// may already reference such a name, which is how a record refers to
    /// itself or to an enclosing type.
    resolving: HashSet<Name>,
    /// Fully compiled named types.
    parsed: Names,
}

fn parse_primitive(name: &str) -> Option<Schema> {
    match name {
        "null" => Some(Schema::Null),
        "boolean" => Some(Schema::Boolean),
        "int" => Some(Schema::Int),
        "long" => Some(Schema::Long),
        "double" => Some(Schema::Double),
        "float" => Some(Schema::Float),
        "bytes" => Some(Schema::Bytes),
        "string" => Some(Schema::String),
        _ => None,
    }
}

impl Parser {
    pub(crate) fn names(&self) -> &Names {
        &self.parsed
    }

    pub(crate) fn into_names(self) -> Names {
        self.parsed
    }

    /// Create a `Schema` from a `serde_json::Value` representing a JSON Avro
    /// schema.
    pub(crate) fn parse(
        &mut self,
        value: &Value,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        match value {
            Value::String(t) => self.parse_known_schema(t.as_str(), enclosing_namespace),
            Value::Object(data) => self.parse_complex(data, enclosing_namespace),
            Value::Array(data) => self.parse_union(data, enclosing_namespace),
            _ => Err(Details::ParseSchemaFromValidJson.into()),
        }
    }

    /// Parse a string as a primitive type or as a reference to a previously
    /// defined named type.
    fn parse_known_schema(
        &mut self,
        name: &str,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        match parse_primitive(name) {
            Some(schema) => Ok(schema),
            None => self.fetch_schema_ref(name, enclosing_namespace),
        }
    }

    /// Resolve a type name against the symbol table and produce a
    /// [`Schema::Ref`] to it.
    ///
    /// Named types must be defined before they are referenced; a name that
    /// is neither compiled nor currently being compiled is unknown.
    fn fetch_schema_ref(
        &mut self,
        name: &str,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        let fully_qualified_name =
            Name::new_with_enclosing_namespace(name, enclosing_namespace.as_deref())?;

        if self.resolving.contains(&fully_qualified_name)
            || self.parsed.contains_key(&fully_qualified_name)
        {
            return Ok(Schema::Ref {
                name: fully_qualified_name,
            });
        }

        let full_name = fully_qualified_name.fullname(None);
        if full_name == "bool" {
            Err(Details::ParsePrimitiveSimilar(full_name, "boolean").into())
        } else {
            Err(Details::ParsePrimitive(full_name).into())
        }
    }

    /// Parse a `serde_json::Value` representing a complex Avro type into a
    /// `Schema`.
    fn parse_complex(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        // Parse the underlying type of an object that carries a
        // `logicalType` attribute.
        fn parse_as_native_complex(
            complex: &Map<String, Value>,
            parser: &mut Parser,
            enclosing_namespace: &Namespace,
        ) -> AvroResult<Schema> {
            match complex.get("type") {
                Some(value) => match value {
                    Value::String(s) if s == "fixed" => {
                        parser.parse_fixed(complex, enclosing_namespace)
                    }
                    Value::String(s) if s == "record" || s == "error" => {
                        parser.parse_record(complex, enclosing_namespace)
                    }
                    Value::String(s) if s == "enum" => {
                        parser.parse_enum(complex, enclosing_namespace)
                    }
                    _ => parser.parse(value, enclosing_namespace),
                },
                None => Err(Details::GetLogicalTypeField.into()),
            }
        }

        // Annotate the underlying schema with the logical type when the
        // underlying kind supports it; otherwise keep the bare schema.
        fn try_convert_to_logical_type<F>(
            logical_type: &str,
            schema: Schema,
            supported_schema_kinds: &[SchemaKind],
            convert: F,
        ) -> AvroResult<Schema>
        where
            F: FnOnce(Schema) -> AvroResult<Schema>,
        {
            let kind = SchemaKind::from(&schema);
            if supported_schema_kinds.contains(&kind) {
                convert(schema)
            } else {
                warn!(
                    "Ignoring logical type '{logical_type}' for schema of type: {schema:?}!"
                );
                Ok(schema)
            }
        }

        match complex.get("logicalType") {
            Some(Value::String(t)) => match t.as_str() {
                "decimal" => {
                    return try_convert_to_logical_type(
                        "decimal",
                        parse_as_native_complex(complex, self, enclosing_namespace)?,
                        &[SchemaKind::Fixed, SchemaKind::Bytes],
                        |inner| match self.parse_precision_and_scale(complex) {
                            Ok((precision, scale)) => Ok(Schema::Decimal(DecimalSchema {
                                precision,
                                scale,
                                inner: inner.try_into()?,
                            })),
                            Err(err) => {
                                warn!("Ignoring invalid decimal logical type: {err}");
                                Ok(inner)
                            }
                        },
                    );
                }
                "uuid" => {
                    return try_convert_to_logical_type(
                        "uuid",
                        parse_as_native_complex(complex, self, enclosing_namespace)?,
                        &[SchemaKind::String, SchemaKind::Fixed],
                        |schema| match schema {
                            Schema::String => Ok(Schema::Uuid(UuidSchema::String)),
                            Schema::Fixed(fixed @ FixedSchema { size: 16, .. }) => {
                                Ok(Schema::Uuid(UuidSchema::Fixed(fixed)))
                            }
                            Schema::Fixed(FixedSchema { size, .. }) => {
                                warn!(
                                    "Ignoring uuid logical type for a Fixed schema because its size ({size}) is not 16! Schema: {schema:?}"
                                );
                                Ok(schema)
                            }
                            _ => {
                                warn!("Ignoring invalid uuid logical type for schema: {schema:?}");
                                Ok(schema)
                            }
                        },
                    );
                }
                "date" => {
                    return try_convert_to_logical_type(
                        "date",
                        parse_as_native_complex(complex, self, enclosing_namespace)?,
                        &[SchemaKind::Int],
                        |_| Ok(Schema::Date),
                    );
                }
                "time-millis" => {
                    return try_convert_to_logical_type(
                        "time-millis",
                        parse_as_native_complex(complex, self, enclosing_namespace)?,
                        &[SchemaKind::Int],
                        |_| Ok(Schema::TimeMillis),
                    );
                }
                "time-micros" => {
                    return try_convert_to_logical_type(
                        "time-micros",
                        parse_as_native_complex(complex, self, enclosing_namespace)?,
                        &[SchemaKind::Long],
                        |_| Ok(Schema::TimeMicros),
                    );
                }
                "timestamp-millis" => {
                    return try_convert_to_logical_type(
                        "timestamp-millis",
                        parse_as_native_complex(complex, self, enclosing_namespace)?,
                        &[SchemaKind::Long],
                        |_| Ok(Schema::TimestampMillis),
                    );
                }
                "timestamp-micros" => {
                    return try_convert_to_logical_type(
                        "timestamp-micros",
                        parse_as_native_complex(complex, self, enclosing_namespace)?,
                        &[SchemaKind::Long],
                        |_| Ok(Schema::TimestampMicros),
                    );
                }
                "duration" => {
                    return try_convert_to_logical_type(
                        "duration",
                        parse_as_native_complex(complex, self, enclosing_namespace)?,
                        &[SchemaKind::Fixed],
                        |schema| match schema {
                            Schema::Fixed(fixed @ FixedSchema { size: 12, .. }) => {
                                Ok(Schema::Duration(fixed))
                            }
                            Schema::Fixed(FixedSchema { size, .. }) => {
                                warn!(
                                    "Ignoring duration logical type on fixed type because size ({size}) is not 12! Schema: {schema:?}"
                                );
                                Ok(schema)
                            }
                            _ => {
                                warn!(
                                    "Ignoring invalid duration logical type for schema: {schema:?}"
                                );
                                Ok(schema)
                            }
                        },
                    );
                }
                // an unknown logical type: the underlying type applies
                _ => {}
            },
            // a malformed logicalType attribute is ignored wholesale
            Some(value) => {
                warn!("Ignoring non-string logicalType: {value}");
            }
            None => {}
        }
        match complex.get("type") {
            Some(Value::String(t)) => match t.as_str() {
                "record" | "error" => self.parse_record(complex, enclosing_namespace),
                "enum" => self.parse_enum(complex, enclosing_namespace),
                "array" => self.parse_array(complex, enclosing_namespace),
                "map" => self.parse_map(complex, enclosing_namespace),
                "fixed" => self.parse_fixed(complex, enclosing_namespace),
                other => match parse_primitive(other) {
                    Some(schema) => Ok(schema),
                    None => Err(Details::GetComplexType(Value::String(other.to_string())).into()),
                },
            },
            Some(Value::Object(data)) => self.parse_complex(data, enclosing_namespace),
            Some(Value::Array(variants)) => self.parse_union(variants, enclosing_namespace),
            Some(unknown) => Err(Details::GetComplexType(unknown.clone()).into()),
            None => Err(Details::GetComplexTypeField.into()),
        }
    }

    /// Parse a `serde_json::Value` representing an Avro record type into a
    /// `Schema`.
    ///
    /// The record's name is registered before its fields are compiled so
    /// that a field can reference the record itself. Nested children
    /// inherit the record's namespace, not the outer one.
    fn parse_record(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        let fully_qualified_name = Name::parse(complex, enclosing_namespace)?;
        self.register_resolving(fully_qualified_name.clone())?;

        debug!("Going to parse record schema: {:?}", &fully_qualified_name);

        let fields_json = complex
            .get("fields")
            .and_then(|fields| fields.as_array())
            .ok_or(Details::GetRecordFieldsJson)?;

        let mut fields: Vec<RecordField> = Vec::with_capacity(fields_json.len());
        for field in fields_json {
            let field = field
                .as_object()
                .ok_or_else(|| Details::GetRecordFieldJson(field.clone()))?;
            fields.push(RecordField::parse(field, self, &fully_qualified_name)?);
        }

        let mut lookup = BTreeMap::new();
        for (position, field) in fields.iter().enumerate() {
            if lookup.insert(field.name.clone(), position).is_some() {
                return Err(Details::FieldNameDuplicate(field.name.clone()).into());
            }
        }

        let schema = Schema::Record(RecordSchema {
            name: fully_qualified_name.clone(),
            doc: complex.doc(),
            fields,
            lookup,
        });

        self.register_parsed(fully_qualified_name, schema.clone());
        Ok(schema)
    }

    /// Parse a `serde_json::Value` representing an Avro enum type into a
    /// `Schema`.
    fn parse_enum(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        let fully_qualified_name = Name::parse(complex, enclosing_namespace)?;
        self.check_duplicate(&fully_qualified_name)?;

        let symbols: Vec<String> = complex
            .get("symbols")
            .and_then(|v| v.as_array())
            .ok_or(Details::GetEnumSymbolsField)?
            .iter()
            .map(|symbol| symbol.as_str().map(|s| s.to_string()))
            .collect::<Option<_>>()
            .ok_or(Details::GetEnumSymbols)?;

        let mut existing_symbols: HashSet<&String> = HashSet::with_capacity(symbols.len());
        for symbol in symbols.iter() {
            validate_enum_symbol_name(symbol)?;

            if !existing_symbols.insert(symbol) {
                return Err(Details::EnumSymbolDuplicate(symbol.to_string()).into());
            }
        }

        let schema = Schema::Enum(EnumSchema {
            name: fully_qualified_name.clone(),
            doc: complex.doc(),
            symbols,
        });

        self.register_parsed(fully_qualified_name, schema.clone());
        Ok(schema)
    }

    /// Parse a `serde_json::Value` representing an Avro array type into a
    /// `Schema`.
    fn parse_array(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        let items = complex.get("items").ok_or(Details::GetArrayItemsField)?;
        let items = self.parse(items, enclosing_namespace)?;

        Ok(Schema::Array(ArraySchema {
            items: Box::new(items),
            doc: complex.doc(),
        }))
    }

    /// Parse a `serde_json::Value` representing an Avro map type into a
    /// `Schema`. Map keys are always strings; only the value type is
    /// declared.
    fn parse_map(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        let types = complex.get("values").ok_or(Details::GetMapValuesField)?;
        let types = self.parse(types, enclosing_namespace)?;

        Ok(Schema::Map(MapSchema {
            types: Box::new(types),
            doc: complex.doc(),
        }))
    }

    /// Parse a `serde_json::Value` representing an Avro union type into a
    /// `Schema`. Branches keep their source order.
    fn parse_union(
        &mut self,
        items: &[Value],
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        let schemas = items
            .iter()
            .map(|value| self.parse(value, enclosing_namespace))
            .collect::<AvroResult<Vec<_>>>()?;

        if schemas.is_empty() {
            error!("Union schemas should have at least two members!");
        } else if schemas.len() == 1 {
            warn!("Union schema with just one member! Consider dropping the union!");
        }

        Ok(Schema::Union(UnionSchema::new(schemas)))
    }

    /// Parse a `serde_json::Value` representing an Avro fixed type into a
    /// `Schema`.
    fn parse_fixed(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Schema> {
        let size = match complex.get("size") {
            Some(size) => size
                .as_u64()
                .filter(|s| *s > 0)
                .ok_or_else(|| Details::GetFixedSizeFieldPositive(size.clone())),
            None => Err(Details::GetFixedSizeField),
        }?;

        let fully_qualified_name = Name::parse(complex, enclosing_namespace)?;
        self.check_duplicate(&fully_qualified_name)?;

        let schema = Schema::Fixed(FixedSchema {
            name: fully_qualified_name.clone(),
            doc: complex.doc(),
            size: size as usize,
        });

        self.register_parsed(fully_qualified_name, schema.clone());
        Ok(schema)
    }

    fn check_duplicate(&self, name: &Name) -> AvroResult<()> {
        if self.resolving.contains(name) || self.parsed.contains_key(name) {
            return Err(Details::AmbiguousSchemaDefinition(name.clone()).into());
        }
        Ok(())
    }

    fn register_resolving(&mut self, name: Name) -> AvroResult<()> {
        self.check_duplicate(&name)?;
        self.resolving.insert(name);
        Ok(())
    }

    fn register_parsed(&mut self, name: Name, schema: Schema) {
        self.resolving.remove(&name);
        self.parsed.insert(name, schema);
    }

    fn get_decimal_integer(
        &self,
        complex: &Map<String, Value>,
        key: &'static str,
    ) -> AvroResult<usize> {
        match complex.get(key) {
            Some(Value::Number(value)) => match value.as_u64() {
                Some(num) => {
                    usize::try_from(num).map_err(|e| Details::ConvertU64ToUsize(e, num).into())
                }
                None => Err(Details::GetDecimalMetadataValueFromJson {
                    key: key.into(),
                    value: Value::Number(value.clone()),
                }
                .into()),
            },
            None => {
                if key == "scale" {
                    Ok(0)
                } else {
                    Err(Details::GetDecimalMetadataFromJson(key).into())
                }
            }
            Some(value) => Err(Details::GetDecimalMetadataValueFromJson {
                key: key.into(),
                value: value.clone(),
            }
            .into()),
        }
    }

    fn parse_precision_and_scale(
        &self,
        complex: &Map<String, Value>,
    ) -> AvroResult<(Precision, Scale)> {
        let precision = self.get_decimal_integer(complex, "precision")?;
        let scale = self.get_decimal_integer(complex, "scale")?;

        if precision < 1 {
            return Err(Details::DecimalPrecisionMustBePositive { precision }.into());
        }

        if precision < scale {
            Err(Details::DecimalPrecisionLessThanScale { precision, scale }.into())
        } else {
            Ok((precision, scale))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Value as AvroValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(json: &Value) -> AvroResult<Schema> {
        Parser::default().parse(json, &None)
    }

    #[test]
    fn test_parse_primitives() -> anyhow::Result<()> {
        assert_eq!(parse(&json!("null"))?, Schema::Null);
        assert_eq!(parse(&json!("boolean"))?, Schema::Boolean);
        assert_eq!(parse(&json!("int"))?, Schema::Int);
        assert_eq!(parse(&json!("long"))?, Schema::Long);
        assert_eq!(parse(&json!("float"))?, Schema::Float);
        assert_eq!(parse(&json!("double"))?, Schema::Double);
        assert_eq!(parse(&json!("bytes"))?, Schema::Bytes);
        assert_eq!(parse(&json!("string"))?, Schema::String);
        assert_eq!(parse(&json!({"type": "int"}))?, Schema::Int);
        Ok(())
    }

    #[test]
    fn test_unknown_type() {
        match parse(&json!("weather")).map_err(Error::into_details) {
            Err(Details::ParsePrimitive(name)) => assert_eq!(name, "weather"),
            other => panic!("Expected Details::ParsePrimitive, got {other:?}"),
        }

        match parse(&json!("bool")).map_err(Error::into_details) {
            Err(Details::ParsePrimitiveSimilar(name, hint)) => {
                assert_eq!(name, "bool");
                assert_eq!(hint, "boolean");
            }
            other => panic!("Expected Details::ParsePrimitiveSimilar, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_avro_type() {
        assert!(matches!(
            parse(&json!(42)).map_err(Error::into_details),
            Err(Details::ParseSchemaFromValidJson)
        ));
    }

    #[test]
    fn test_recursive_record() -> anyhow::Result<()> {
        let schema = parse(&json!({
            "type": "record",
            "name": "Node",
            "fields": [
                {"name": "next", "type": ["null", "Node"]}
            ]
        }))?;

        let Schema::Record(record) = schema else {
            panic!("Expected a record schema");
        };
        assert_eq!(record.name, Name::new("Node")?);
        assert_eq!(record.fields.len(), 1);
        assert_eq!(
            record.fields[0].schema,
            Schema::Union(UnionSchema::new(vec![
                Schema::Null,
                Schema::Ref {
                    name: Name::new("Node")?
                },
            ]))
        );
        Ok(())
    }

    #[test]
    fn test_self_reference_by_fullname() -> anyhow::Result<()> {
        let schema = parse(&json!({
            "type": "record",
            "name": "LongList",
            "namespace": "com.example",
            "fields": [
                {"name": "value", "type": "long"},
                {"name": "next", "type": ["null", "com.example.LongList"]}
            ]
        }))?;

        let Schema::Record(record) = schema else {
            panic!("Expected a record schema");
        };
        assert_eq!(
            record.fields[1].schema,
            Schema::Union(UnionSchema::new(vec![
                Schema::Null,
                Schema::Ref {
                    name: Name::new("com.example.LongList")?
                },
            ]))
        );
        Ok(())
    }

    #[test]
    fn test_namespace_inheritance() -> anyhow::Result<()> {
        // C is defined without a namespace inside a.b.R, so it lands in
        // a.b and the simple reference "C" resolves to a.b.C
        let mut parser = Parser::default();
        let schema = parser.parse(
            &json!({
                "type": "record",
                "name": "R",
                "namespace": "a.b",
                "fields": [
                    {"name": "first", "type": {"type": "fixed", "name": "C", "size": 4}},
                    {"name": "second", "type": "C"}
                ]
            }),
            &None,
        )?;

        assert!(parser.names().contains_key(&Name::new("a.b.C")?));

        let Schema::Record(record) = schema else {
            panic!("Expected a record schema");
        };
        assert_eq!(
            record.fields[1].schema,
            Schema::Ref {
                name: Name::new("a.b.C")?
            }
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_fullname_rejected() {
        let result = parse(&json!({
            "type": "record",
            "name": "R",
            "fields": [
                {"name": "a", "type": {"type": "enum", "name": "E", "symbols": ["X"]}},
                {"name": "b", "type": {"type": "enum", "name": "E", "symbols": ["Y"]}}
            ]
        }));

        assert!(matches!(
            result.map_err(Error::into_details),
            Err(Details::AmbiguousSchemaDefinition(name)) if name.name == "E"
        ));
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let result = parse(&json!({
            "type": "record",
            "name": "R",
            "fields": [
                {"name": "a", "type": "int"},
                {"name": "a", "type": "string"}
            ]
        }));

        assert!(matches!(
            result.map_err(Error::into_details),
            Err(Details::FieldNameDuplicate(name)) if name == "a"
        ));
    }

    #[test]
    fn test_enum() -> anyhow::Result<()> {
        let schema = parse(&json!({
            "type": "enum",
            "name": "Suit",
            "symbols": ["SPADES", "HEARTS", "DIAMONDS", "CLUBS"]
        }))?;

        let Schema::Enum(enum_schema) = schema else {
            panic!("Expected an enum schema");
        };
        assert_eq!(enum_schema.symbols, ["SPADES", "HEARTS", "DIAMONDS", "CLUBS"]);
        Ok(())
    }

    #[test]
    fn test_enum_symbol_must_be_a_string() {
        let result = parse(&json!({
            "type": "enum",
            "name": "E",
            "symbols": ["A", 3]
        }));
        assert!(matches!(
            result.map_err(Error::into_details),
            Err(Details::GetEnumSymbols)
        ));
    }

    #[test]
    fn test_enum_duplicate_symbol_rejected() {
        let result = parse(&json!({
            "type": "enum",
            "name": "E",
            "symbols": ["A", "A"]
        }));
        assert!(matches!(
            result.map_err(Error::into_details),
            Err(Details::EnumSymbolDuplicate(symbol)) if symbol == "A"
        ));
    }

    #[test]
    fn test_fixed_size_must_be_positive() {
        for bad in [json!(0), json!(-2), json!("16")] {
            let result = parse(&json!({"type": "fixed", "name": "F", "size": bad}));
            assert!(matches!(
                result.map_err(Error::into_details),
                Err(Details::GetFixedSizeFieldPositive(_))
            ));
        }

        let result = parse(&json!({"type": "fixed", "name": "F"}));
        assert!(matches!(
            result.map_err(Error::into_details),
            Err(Details::GetFixedSizeField)
        ));
    }

    #[test]
    fn test_field_default_materialized() -> anyhow::Result<()> {
        let schema = parse(&json!({
            "type": "record",
            "name": "R",
            "fields": [
                {"name": "count", "type": "long", "default": 7},
                {"name": "tag", "type": "string"}
            ]
        }))?;

        let Schema::Record(record) = schema else {
            panic!("Expected a record schema");
        };
        assert_eq!(record.fields[0].default, Some(AvroValue::Long(7)));
        assert_eq!(record.fields[1].default, None);
        Ok(())
    }

    #[test]
    fn test_union_default_must_match_first_branch() {
        let result = parse(&json!({
            "type": "record",
            "name": "R",
            "fields": [
                {"name": "u", "type": ["int", "string"], "default": "hello"}
            ]
        }));
        assert!(matches!(
            result.map_err(Error::into_details),
            Err(Details::FieldDefaultWrongType { .. })
        ));
    }

    #[test]
    fn test_record_field_doc_unescaped() -> anyhow::Result<()> {
        let schema = parse(&json!({
            "type": "record",
            "name": "R",
            "fields": [
                {"name": "x", "type": "int", "doc": "a \\\"quoted\\\" doc"}
            ]
        }))?;

        let Schema::Record(record) = schema else {
            panic!("Expected a record schema");
        };
        assert_eq!(record.fields[0].doc, Some("a \"quoted\" doc".to_string()));
        Ok(())
    }

    #[test]
    fn test_decimal() -> anyhow::Result<()> {
        let schema = parse(&json!({
            "type": "bytes",
            "logicalType": "decimal",
            "precision": 4,
            "scale": 2
        }))?;

        assert_eq!(
            schema,
            Schema::Decimal(DecimalSchema {
                precision: 4,
                scale: 2,
                inner: crate::schema::InnerDecimalSchema::Bytes,
            })
        );
        Ok(())
    }

    #[test]
    fn test_decimal_missing_precision_is_ignored() -> anyhow::Result<()> {
        // a malformed decimal attribute leaves the bare underlying type
        let schema = parse(&json!({
            "type": "bytes",
            "logicalType": "decimal",
            "scale": 2
        }))?;
        assert_eq!(schema, Schema::Bytes);

        let schema = parse(&json!({
            "type": "fixed",
            "name": "F",
            "size": 16,
            "logicalType": "decimal",
            "precision": "four"
        }))?;
        assert!(matches!(schema, Schema::Fixed(_)));
        Ok(())
    }

    #[test]
    fn test_unknown_logical_type_is_ignored() -> anyhow::Result<()> {
        let schema = parse(&json!({
            "type": "string",
            "logicalType": "email"
        }))?;
        assert_eq!(schema, Schema::String);

        // a non-string logicalType is ignored wholesale
        let schema = parse(&json!({
            "type": "string",
            "logicalType": 12
        }))?;
        assert_eq!(schema, Schema::String);
        Ok(())
    }

    #[test]
    fn test_logical_type_on_wrong_underlying_type_is_ignored() -> anyhow::Result<()> {
        let schema = parse(&json!({
            "type": "string",
            "logicalType": "date"
        }))?;
        assert_eq!(schema, Schema::String);
        Ok(())
    }

    #[test]
    fn test_date_and_timestamps() -> anyhow::Result<()> {
        assert_eq!(
            parse(&json!({"type": "int", "logicalType": "date"}))?,
            Schema::Date
        );
        assert_eq!(
            parse(&json!({"type": "int", "logicalType": "time-millis"}))?,
            Schema::TimeMillis
        );
        assert_eq!(
            parse(&json!({"type": "long", "logicalType": "time-micros"}))?,
            Schema::TimeMicros
        );
        assert_eq!(
            parse(&json!({"type": "long", "logicalType": "timestamp-millis"}))?,
            Schema::TimestampMillis
        );
        assert_eq!(
            parse(&json!({"type": "long", "logicalType": "timestamp-micros"}))?,
            Schema::TimestampMicros
        );
        Ok(())
    }

    #[test]
    fn test_uuid_and_duration() -> anyhow::Result<()> {
        assert_eq!(
            parse(&json!({"type": "string", "logicalType": "uuid"}))?,
            Schema::Uuid(UuidSchema::String)
        );

        let schema = parse(&json!({
            "type": "fixed",
            "name": "Dur",
            "size": 12,
            "logicalType": "duration"
        }))?;
        assert!(matches!(schema, Schema::Duration(FixedSchema { size: 12, .. })));

        // a duration over the wrong size keeps the bare fixed
        let schema = parse(&json!({
            "type": "fixed",
            "name": "NotDur",
            "size": 8,
            "logicalType": "duration"
        }))?;
        assert!(matches!(schema, Schema::Fixed(FixedSchema { size: 8, .. })));
        Ok(())
    }

    #[test]
    fn test_union_of_unknown_type_fails() {
        let result = parse(&json!(["null", "Missing"]));
        assert!(matches!(
            result.map_err(Error::into_details),
            Err(Details::ParsePrimitive(name)) if name == "Missing"
        ));
    }
}
