use serde::ser::{self, Impossible, Serialize};

use crate::error::Error;
use crate::tree::Scalar;
use crate::writer::TreeWriter;
use crate::Result;

/// Serializer that turns a value into write events on a [`TreeWriter`].
pub struct NodeSerializer<'w> {
    writer: &'w mut TreeWriter,
}

impl<'w> NodeSerializer<'w> {
    pub fn new(writer: &'w mut TreeWriter) -> Self {
        Self { writer }
    }
}

impl<'w> ser::Serializer for NodeSerializer<'w> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'w>;
    type SerializeTuple = Compound<'w>;
    type SerializeTupleStruct = Compound<'w>;
    type SerializeTupleVariant = Compound<'w>;
    type SerializeMap = Compound<'w>;
    type SerializeStruct = Compound<'w>;
    type SerializeStructVariant = Compound<'w>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        match i128::try_from(v) {
            Ok(v) => self.writer.value(v),
            Err(_) => Err(Error::serialize("u128 value out of range")),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.writer.value(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.writer.write_bytes(v)
    }

    fn serialize_none(self) -> Result<()> {
        self.writer.write_null()
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.writer.write_null()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.writer.write_null()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.writer.value(Scalar::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.writer.start_object()?;
        self.writer.property_name(variant)?;
        value.serialize(NodeSerializer::new(&mut *self.writer))?;
        self.writer.end_object()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'w>> {
        self.writer.start_array()?;
        Ok(Compound::new(self.writer, Close::Array))
    }

    fn serialize_tuple(self, len: usize) -> Result<Compound<'w>> {
        self.serialize_seq(Some(len))
    }

    /// Tuple structs become named constructors.
    fn serialize_tuple_struct(self, name: &'static str, _len: usize) -> Result<Compound<'w>> {
        self.writer.start_constructor(name)?;
        Ok(Compound::new(self.writer, Close::Constructor))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'w>> {
        self.writer.start_object()?;
        self.writer.property_name(variant)?;
        self.writer.start_array()?;
        Ok(Compound::new(self.writer, Close::VariantArray))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'w>> {
        self.writer.start_object()?;
        Ok(Compound::new(self.writer, Close::Object))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Compound<'w>> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'w>> {
        self.writer.start_object()?;
        self.writer.property_name(variant)?;
        self.writer.start_object()?;
        Ok(Compound::new(self.writer, Close::VariantObject))
    }
}

/// Which end events finish a compound value.
#[derive(Debug, Clone, Copy)]
enum Close {
    Array,
    Constructor,
    Object,
    VariantArray,
    VariantObject,
}

pub struct Compound<'w> {
    writer: &'w mut TreeWriter,
    close: Close,
}

impl<'w> Compound<'w> {
    fn new(writer: &'w mut TreeWriter, close: Close) -> Self {
        Self { writer, close }
    }

    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(NodeSerializer::new(&mut *self.writer))
    }

    fn field<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.writer.property_name(key)?;
        self.element(value)
    }

    fn finish(self) -> Result<()> {
        match self.close {
            Close::Array => self.writer.end_array(),
            Close::Constructor => self.writer.end_constructor(),
            Close::Object => self.writer.end_object(),
            Close::VariantArray => {
                self.writer.end_array()?;
                self.writer.end_object()
            }
            Close::VariantObject => {
                self.writer.end_object()?;
                self.writer.end_object()
            }
        }
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = key.serialize(MapKeySerializer)?;
        self.writer.property_name(&key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

struct MapKeySerializer;

fn key_must_be_a_string() -> Error {
    Error::serialize("map key must be a string")
}

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(if v { "true" } else { "false" }.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        self.serialize_i128(v as i128)
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        self.serialize_i128(v as i128)
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        self.serialize_i128(v as i128)
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        self.serialize_i128(v as i128)
    }

    fn serialize_i128(self, v: i128) -> Result<String> {
        let mut buffer = itoa::Buffer::new();
        Ok(buffer.format(v).to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        self.serialize_u128(v as u128)
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        self.serialize_u128(v as u128)
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        self.serialize_u128(v as u128)
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        self.serialize_u128(v as u128)
    }

    fn serialize_u128(self, v: u128) -> Result<String> {
        let mut buffer = itoa::Buffer::new();
        Ok(buffer.format(v).to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string())
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_a_string())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_a_string())
    }
}
