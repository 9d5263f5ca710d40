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

//! Pull-based decoding of the Avro binary encoding.

use crate::AvroResult;
use crate::error::Details;
use crate::util::{safe_len, zag_i32, zag_i64};
use std::io::{self, Read};

/// A decoder for the [Avro binary encoding].
///
/// The decoder exposes one typed pull operation per Avro wire construct and
/// holds no schema knowledge: the caller walks a compiled schema graph and
/// invokes the operation matching each node, in schema order. Calling
/// operations out of order reads garbage or fails; the stream position after
/// a failure is undefined.
///
/// Arrays and maps are block-framed on the wire. [`array_start`] returns the
/// item count of the first block; after consuming that many items the caller
/// asks [`array_next`] for the next count, until it returns zero. The block
/// cursor therefore lives with the caller, not the decoder.
///
/// The decoder reads directly from the underlying reader one value at a
/// time. Wrap the source in a [`std::io::BufReader`] when it is unbuffered.
///
/// [Avro binary encoding]: https://avro.apache.org/docs/++version++/specification/#binary-encoding
/// [`array_start`]: BinaryDecoder::array_start
/// [`array_next`]: BinaryDecoder::array_next
pub struct BinaryDecoder<R> {
    reader: R,
}

impl<R: Read> BinaryDecoder<R> {
    /// Create a decoder bound to `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Rebind the decoder to a different stream.
    pub fn init(&mut self, reader: R) {
        self.reader = reader;
    }

    /// Consume the decoder and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decode a `null`. Consumes no bytes.
    pub fn decode_null(&mut self) -> AvroResult<()> {
        Ok(())
    }

    /// Decode a `boolean`. Any byte other than 0 or 1 is an error.
    pub fn decode_bool(&mut self) -> AvroResult<bool> {
        let mut byte = [0u8; 1];
        self.reader
            .read_exact(&mut byte)
            .map_err(Details::ReadBoolean)?;
        match byte[0] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(Details::BoolValue(value).into()),
        }
    }

    /// Decode an `int`.
    ///
    /// The wire value is a 64-bit ZigZag varint; values outside the signed
    /// 32-bit range fail with [`Details::ZagI32`].
    pub fn decode_int(&mut self) -> AvroResult<i32> {
        zag_i32(&mut self.reader)
    }

    /// Decode a `long`.
    pub fn decode_long(&mut self) -> AvroResult<i64> {
        zag_i64(&mut self.reader)
    }

    /// Decode a `float`: 4 bytes, little-endian IEEE-754 binary32.
    pub fn decode_float(&mut self) -> AvroResult<f32> {
        let mut bytes = [0u8; 4];
        self.reader
            .read_exact(&mut bytes)
            .map_err(Details::ReadFloat)?;
        Ok(f32::from_le_bytes(bytes))
    }

    /// Decode a `double`: 8 bytes, little-endian IEEE-754 binary64.
    pub fn decode_double(&mut self) -> AvroResult<f64> {
        let mut bytes = [0u8; 8];
        self.reader
            .read_exact(&mut bytes)
            .map_err(Details::ReadDouble)?;
        Ok(f64::from_le_bytes(bytes))
    }

    /// Decode a `string`: a length-prefixed run of UTF-8 bytes.
    pub fn decode_string(&mut self) -> AvroResult<String> {
        let len = self.decode_len()?;
        let mut buf = vec![0u8; len];
        self.reader
            .read_exact(&mut buf)
            .map_err(Details::ReadString)?;
        String::from_utf8(buf).map_err(|e| Details::ConvertToUtf8(e).into())
    }

    /// Skip over a `string` without materializing it.
    pub fn skip_string(&mut self) -> AvroResult<()> {
        let len = self.decode_len()?;
        self.skip(len)
    }

    /// Decode `bytes`: a length-prefixed run of raw bytes.
    pub fn decode_bytes(&mut self) -> AvroResult<Vec<u8>> {
        let len = self.decode_len()?;
        let mut buf = vec![0u8; len];
        self.reader
            .read_exact(&mut buf)
            .map_err(Details::ReadBytes)?;
        Ok(buf)
    }

    /// Skip over `bytes` without materializing them.
    pub fn skip_bytes(&mut self) -> AvroResult<()> {
        let len = self.decode_len()?;
        self.skip(len)
    }

    /// Decode a `fixed` of `n` bytes. `n` comes from the schema, not the
    /// stream.
    pub fn decode_fixed(&mut self, n: usize) -> AvroResult<Vec<u8>> {
        let mut buf = vec![0u8; safe_len(n)?];
        self.reader
            .read_exact(&mut buf)
            .map_err(|e| Details::ReadFixed(e, n))?;
        Ok(buf)
    }

    /// Skip over a `fixed` of `n` bytes.
    pub fn skip_fixed(&mut self, n: usize) -> AvroResult<()> {
        self.skip(n)
    }

    /// Decode an `enum` value: the index into the symbol list.
    pub fn decode_enum(&mut self) -> AvroResult<usize> {
        let index = self.decode_long()?;
        usize::try_from(index).map_err(|e| Details::ConvertI64ToUsize(e, index).into())
    }

    /// Decode the branch index of a `union`.
    pub fn decode_union_index(&mut self) -> AvroResult<usize> {
        let index = self.decode_long()?;
        usize::try_from(index).map_err(|e| Details::ConvertI64ToUsize(e, index).into())
    }

    /// Begin reading an `array`: returns the item count of the first block,
    /// or 0 for an empty array.
    pub fn array_start(&mut self) -> AvroResult<usize> {
        self.decode_item_count()
    }

    /// Return the item count of the next array block; 0 ends the array.
    ///
    /// This reads the raw count long only. A writer that emits a negative
    /// count with a trailing byte-size long is handled by [`array_start`],
    /// [`map_next`] and the skip loops, not here.
    ///
    /// [`array_start`]: BinaryDecoder::array_start
    /// [`map_next`]: BinaryDecoder::map_next
    pub fn array_next(&mut self) -> AvroResult<usize> {
        Ok(self.decode_long()? as usize)
    }

    /// Drain the remaining blocks of an `array`.
    ///
    /// Blocks that declare their byte size are skipped wholesale. Returns 0
    /// at the end of the array, or the item count of a block that did not
    /// declare its size; the caller must then skip those items one by one
    /// and call this again.
    pub fn skip_array(&mut self) -> AvroResult<usize> {
        loop {
            let count = self.decode_long()?;
            if count < 0 {
                let bytes = self.decode_long()? as usize;
                self.skip(bytes)?;
            } else {
                return Ok(count as usize);
            }
        }
    }

    /// Begin reading a `map`: returns the entry count of the first block,
    /// or 0 for an empty map.
    pub fn map_start(&mut self) -> AvroResult<usize> {
        self.decode_item_count()
    }

    /// Return the entry count of the next map block; 0 ends the map.
    pub fn map_next(&mut self) -> AvroResult<usize> {
        self.decode_item_count()
    }

    /// Drain the remaining blocks of a `map`. See [`skip_array`].
    ///
    /// [`skip_array`]: BinaryDecoder::skip_array
    pub fn skip_map(&mut self) -> AvroResult<usize> {
        self.skip_array()
    }

    /// Hand any buffered bytes back to the underlying stream.
    ///
    /// This decoder buffers nothing, so there is never anything to hand
    /// back; the call exists so schema walkers can drain unconditionally
    /// between datums.
    pub fn drain(&mut self) -> AvroResult<()> {
        Ok(())
    }

    /// Read a block header and return its item count.
    ///
    /// A negative count means the count's magnitude, followed by a long
    /// giving the block's size in bytes. Non-skipping reads have no use for
    /// the size, so it is decoded and dropped.
    fn decode_item_count(&mut self) -> AvroResult<usize> {
        let count = self.decode_long()?;
        if count < 0 {
            self.decode_long()?;
            Ok(count.unsigned_abs() as usize)
        } else {
            Ok(count as usize)
        }
    }

    /// Decode the length prefix of a string or bytes value.
    fn decode_len(&mut self) -> AvroResult<usize> {
        let len = self.decode_int()?;
        if len < 0 {
            return Err(Details::NegativeLength(len).into());
        }
        safe_len(len as usize)
    }

    fn skip(&mut self, n: usize) -> AvroResult<()> {
        let skipped = io::copy(&mut self.reader.by_ref().take(n as u64), &mut io::sink())
            .map_err(Details::SkipBytes)?;
        if skipped < n as u64 {
            return Err(Details::SkipBytes(io::ErrorKind::UnexpectedEof.into()).into());
        }
        Ok(())
    }
}
