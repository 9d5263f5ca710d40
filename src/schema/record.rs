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

use crate::error::Details;
use crate::schema::default::datum_from_default;
use crate::schema::{Documentation, Name, Parser, Schema};
use crate::types::Value;
use crate::util::MapHelper;
use crate::validator::validate_record_field_name;
use crate::AvroResult;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// A description of a Record schema.
#[derive(bon::Builder, Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// The name of the schema
    pub name: Name,
    /// The documentation of the schema
    #[builder(default)]
    pub doc: Documentation,
    /// The set of fields of the schema
    #[builder(default)]
    pub fields: Vec<RecordField>,
    /// The `lookup` table maps field names to their position in the `Vec`
    /// of `fields`.
    #[builder(skip = calculate_lookup_table(&fields))]
    pub lookup: BTreeMap<String, usize>,
}

/// Calculate the lookup table for the given fields.
pub(crate) fn calculate_lookup_table(fields: &[RecordField]) -> BTreeMap<String, usize> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| (field.name.clone(), i))
        .collect()
}

/// Represents a `field` in a `record` Avro schema.
#[derive(bon::Builder, Debug, Clone, PartialEq)]
pub struct RecordField {
    /// Name of the field.
    #[builder(into)]
    pub name: String,
    /// Documentation of the field.
    #[builder(default)]
    pub doc: Documentation,
    /// Default value of the field, materialized against the field's schema
    /// at compile time. `None` when the field declares no default.
    pub default: Option<Value>,
    /// Schema of the field.
    pub schema: Schema,
}

impl RecordField {
    /// Parse a `serde_json::Value` into a `RecordField`.
    pub(crate) fn parse(
        field: &Map<String, JsonValue>,
        parser: &mut Parser,
        enclosing_record: &Name,
    ) -> AvroResult<Self> {
        let name = field.name().ok_or(Details::GetNameFieldFromRecord)?;

        validate_record_field_name(&name)?;

        let ty = field.get("type").ok_or(Details::GetRecordFieldTypeField)?;
        let schema = parser.parse(ty, &enclosing_record.namespace)?;

        let default = match field.get("default") {
            Some(json) => Some(datum_from_default(&schema, json, parser.names())?),
            None => None,
        };

        Ok(RecordField {
            name,
            doc: field.doc(),
            default,
            schema,
        })
    }
}

impl Serialize for RecordField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.schema)?;

        if let Some(default) = &self.default {
            let json = default.to_json().map_err(S::Error::custom)?;
            map.serialize_entry("default", &json)?;
        }

        if let Some(doc) = &self.doc {
            map.serialize_entry("doc", doc)?;
        }

        map.end()
    }
}
