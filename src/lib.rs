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

//! Core **[Apache Avro](https://avro.apache.org/)** machinery: a schema
//! compiler and a binary decoder.
//!
//! The two halves of this crate meet only through the compiled schema graph:
//!
//! 1. The compiler ([`compile_json_schema_from_str`] and friends) turns a
//!    JSON schema document into a [`ValidSchema`], resolving named types,
//!    namespaces, field defaults and logical type annotations along the way.
//! 2. The decoder ([`BinaryDecoder`]) pulls typed values off a byte stream
//!    per the [Avro binary encoding]. It holds no schema knowledge at all;
//!    the caller walks the schema graph and invokes the matching typed
//!    operation for each node it encounters.
//!
//! A [`ValidSchema`] is immutable once built and can be shared freely between
//! threads. A [`BinaryDecoder`] is bound to a single input stream and must
//! not be shared; use one decoder per stream.
//!
//! Schema evolution (resolving a writer schema against a reader schema), the
//! object container file format, RPC framing and compression codecs are
//! explicitly out of scope.
//!
//! [Avro binary encoding]: https://avro.apache.org/docs/++version++/specification/#binary-encoding

pub mod decode;
pub mod error;
pub mod schema;
pub mod types;
pub mod util;
pub mod validator;

pub use decode::BinaryDecoder;
pub use error::Error;
pub use schema::{
    Schema, ValidSchema, compile_json_schema_from_file, compile_json_schema_from_reader,
    compile_json_schema_from_slice, compile_json_schema_from_str,
};
pub use types::Value;

/// A convenience type alias for `Result`s with `Error`s.
pub type AvroResult<T> = Result<T, Error>;
