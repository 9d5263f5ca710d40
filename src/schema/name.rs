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

use crate::util::MapHelper;
use crate::validator::{validate_namespace, validate_schema_name};
use crate::{AvroResult, Error, error::Details};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::Schema;

/// Represents names for `record`, `enum` and `fixed` Avro schemas.
///
/// Each of these `Schema`s has a `fullname` composed of two parts:
///   * a name
///   * a namespace
///
/// More information about schema names can be found in the
/// [Avro specification](https://avro.apache.org/docs/++version++/specification/#names)
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Name {
    /// The name part of the full name.
    pub name: String,
    /// The namespace part, if any. An absent namespace and an empty one are
    /// the same thing.
    pub namespace: Namespace,
}

/// Represents schema lookup within a schema
pub type Names = HashMap<Name, Schema>;
/// Represents the namespace for a named schema
pub type Namespace = Option<String>;

impl Name {
    /// Create a new `Name`.
    /// Parses the optional `namespace` from the `name` string.
    pub fn new(name: &str) -> AvroResult<Self> {
        Self::new_with_enclosing_namespace(name, None)
    }

    /// Create a new `Name` using the namespace from `enclosing_namespace`
    /// when `name` does not carry its own.
    pub fn new_with_enclosing_namespace(
        name: &str,
        enclosing_namespace: Option<&str>,
    ) -> AvroResult<Self> {
        let index_of_name = validate_schema_name(name)?;

        if index_of_name == 0 {
            let namespace = match enclosing_namespace {
                Some(namespace) if !namespace.is_empty() => {
                    validate_namespace(namespace)?;
                    Some(namespace.to_string())
                }
                _ => None,
            };
            Ok(Self {
                name: name.to_string(),
                namespace,
            })
        } else if index_of_name == 1 {
            // A leading dot means the null namespace
            Ok(Self {
                name: name[1..].to_string(),
                namespace: None,
            })
        } else {
            Ok(Self {
                name: name[index_of_name..].to_string(),
                namespace: Some(name[..index_of_name - 1].to_string()),
            })
        }
    }

    /// Parse a JSON object holding a `"name"` and optionally a `"namespace"`
    /// field into a `Name`.
    ///
    /// A dotted `"name"` carries its own namespace and wins over both the
    /// `"namespace"` field and the enclosing namespace.
    pub(crate) fn parse(
        complex: &Map<String, Value>,
        enclosing_namespace: &Namespace,
    ) -> AvroResult<Self> {
        let name_field = complex.name().ok_or(Details::GetNameField)?;

        if name_field.contains('.') {
            return Self::new(&name_field);
        }
        match complex.get("namespace") {
            Some(Value::String(namespace)) => {
                Self::new_with_enclosing_namespace(&name_field, Some(namespace))
            }
            Some(value) => Err(Details::GetNamespaceFieldType(value.clone()).into()),
            None => Self::new_with_enclosing_namespace(&name_field, enclosing_namespace.as_deref()),
        }
    }

    /// Return the `fullname` of this `Name`.
    ///
    /// More information about fullnames can be found in the
    /// [Avro specification](https://avro.apache.org/docs/++version++/specification/#names)
    pub fn fullname(&self, default_namespace: Option<&str>) -> String {
        match self
            .namespace
            .as_deref()
            .or(default_namespace)
            .filter(|ns| !ns.is_empty())
        {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Construct the fully qualified name, qualifying an unqualified one
    /// with the enclosing namespace.
    pub fn fully_qualified_name(&self, enclosing_namespace: &Namespace) -> Name {
        Self {
            name: self.name.clone(),
            namespace: self
                .namespace
                .clone()
                .or_else(|| enclosing_namespace.clone().filter(|ns| !ns.is_empty())),
        }
    }
}

impl TryFrom<&str> for Name {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fullname(None))
    }
}
