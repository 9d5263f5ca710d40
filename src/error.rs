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

//! Errors of this crate.

use crate::schema::{Name, SchemaKind};
use std::{error::Error as _, fmt};

/// Errors encountered while decoding Avro data or compiling a schema.
///
/// To inspect the details of the error use [`details`](Self::details) or
/// [`into_details`](Self::into_details) to get a [`Details`] which contains
/// more precise error information.
#[derive(thiserror::Error, Debug)]
#[repr(transparent)]
#[error(transparent)]
pub struct Error {
    details: Box<Details>,
}

impl Error {
    pub fn new(details: Details) -> Self {
        Self {
            details: Box::new(details),
        }
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn into_details(self) -> Details {
        *self.details
    }
}

impl From<Details> for Error {
    fn from(details: Details) -> Self {
        Self::new(details)
    }
}

#[derive(thiserror::Error)]
pub enum Details {
    // ---- binary decoding ----
    #[error("Invalid u8 for bool: {0}")]
    BoolValue(u8),

    #[error("Invalid variable-length integer: more than 10 bytes")]
    IntegerOverflow,

    #[error("Value out of range for Avro int: {1}")]
    ZagI32(#[source] std::num::TryFromIntError, i64),

    #[error("Cannot have negative length: {0}")]
    NegativeLength(i32),

    #[error("Index cannot be negative: {1}")]
    ConvertI64ToUsize(#[source] std::num::TryFromIntError, i64),

    #[error("Unable to allocate {desired} bytes (maximum allowed: {maximum})")]
    MemoryAllocation { desired: usize, maximum: usize },

    #[error("Invalid utf-8 string")]
    ConvertToUtf8(#[source] std::string::FromUtf8Error),

    #[error("Failed to read bytes for a variable-length integer: {0}")]
    ReadVariableIntegerBytes(#[source] std::io::Error),

    #[error("Failed to read boolean bytes: {0}")]
    ReadBoolean(#[source] std::io::Error),

    #[error("Failed to read bytes: {0}")]
    ReadBytes(#[source] std::io::Error),

    #[error("Failed to read string: {0}")]
    ReadString(#[source] std::io::Error),

    #[error("Failed to read float: {0}")]
    ReadFloat(#[source] std::io::Error),

    #[error("Failed to read double: {0}")]
    ReadDouble(#[source] std::io::Error),

    #[error("Failed to read fixed number of bytes {1}: {0}")]
    ReadFixed(#[source] std::io::Error, usize),

    #[error("Failed to skip bytes: {0}")]
    SkipBytes(#[source] std::io::Error),

    #[error("Failed to write bytes: {0}")]
    WriteBytes(#[source] std::io::Error),

    // ---- schema compilation ----
    #[error("Failed to parse schema from JSON")]
    ParseSchemaJson(#[source] serde_json::Error),

    #[error("Failed to read schema")]
    ReadSchemaFromReader(#[source] std::io::Error),

    #[error("Must be a JSON string, object or array")]
    ParseSchemaFromValidJson,

    #[error("Unknown type: {0}")]
    ParsePrimitive(String),

    #[error("Unknown type: {0}. Did you mean '{1}'?")]
    ParsePrimitiveSimilar(String, &'static str),

    #[error("Unknown complex type: {0}")]
    GetComplexType(serde_json::Value),

    #[error("No `type` in complex type")]
    GetComplexTypeField,

    #[error("No `type` field found for `logicalType`")]
    GetLogicalTypeField,

    #[error("No `name` field")]
    GetNameField,

    #[error("No `name` in record field")]
    GetNameFieldFromRecord,

    #[error("No `type` in record field")]
    GetRecordFieldTypeField,

    #[error("No `fields` in record")]
    GetRecordFieldsJson,

    #[error("Record field must be a JSON object: {0}")]
    GetRecordFieldJson(serde_json::Value),

    #[error("Duplicate field name {0}")]
    FieldNameDuplicate(String),

    #[error("Invalid field name {0}")]
    FieldName(String),

    #[error("No `symbols` field in enum")]
    GetEnumSymbolsField,

    #[error("Unable to parse `symbols` in enum")]
    GetEnumSymbols,

    #[error("Invalid enum symbol name {0}")]
    EnumSymbolName(String),

    #[error("Duplicate enum symbol {0}")]
    EnumSymbolDuplicate(String),

    #[error("No `items` in array")]
    GetArrayItemsField,

    #[error("No `values` in map")]
    GetMapValuesField,

    #[error("Fixed schema has no `size`")]
    GetFixedSizeField,

    #[error("Fixed schema `size` value must be a positive integer: {0}")]
    GetFixedSizeFieldPositive(serde_json::Value),

    #[error("Json field `namespace` is not a string: {0}")]
    GetNamespaceFieldType(serde_json::Value),

    #[error("Invalid schema name {0}. It must match the regex '{1}'")]
    InvalidSchemaName(String, &'static str),

    #[error("Invalid namespace {0}. It must match the regex '{1}'")]
    InvalidNamespace(String, &'static str),

    #[error("Two named schema defined for same fullname: {0}")]
    AmbiguousSchemaDefinition(Name),

    #[error("Unresolved schema reference: {0}")]
    SchemaResolutionError(Name),

    #[error("Union type should not be empty")]
    EmptyUnion,

    #[error("Key {0} not found in decimal metadata JSON")]
    GetDecimalMetadataFromJson(&'static str),

    #[error("Invalid JSON for {key:?}: {value:?}")]
    GetDecimalMetadataValueFromJson {
        key: String,
        value: serde_json::Value,
    },

    #[error("The decimal precision ({precision}) must be a positive number")]
    DecimalPrecisionMustBePositive { precision: usize },

    #[error("Cannot convert u64 to usize: {1}")]
    ConvertU64ToUsize(#[source] std::num::TryFromIntError, u64),

    #[error("Not a fixed or bytes type, required for decimal schema, got: {0:?}")]
    ResolveDecimalSchema(SchemaKind),

    #[error("The decimal precision ({precision}) must be bigger or equal to the scale ({scale})")]
    DecimalPrecisionLessThanScale { precision: usize, scale: usize },

    // ---- default value materialization ----
    #[error("Unexpected JSON type for default value: expected {expected}, but found: {value}")]
    FieldDefaultWrongType {
        expected: &'static str,
        value: serde_json::Value,
    },

    #[error("No value found in default for field {0}")]
    MissingFieldDefault(String),

    // ---- schema serialization ----
    #[error("Failed to convert avro float to json: {0}")]
    ConvertF64ToJson(f64),

    #[error("Failed to serialize schema to JSON")]
    SerializeSchemaJson(#[source] serde_json::Error),
}

impl fmt::Debug for Details {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut msg = self.to_string();
        if let Some(e) = self.source() {
            msg.extend([": ", &e.to_string()]);
        }
        write!(f, "{msg}")
    }
}
