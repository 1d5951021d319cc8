//! Typed access into NBT compounds.
//!
//! fastnbt hands us loosely typed `Value` trees; every read here names the
//! field it wanted so a bad save points at the exact tag that broke.
use crate::prelude::*;

pub type Compound = std::collections::HashMap<String, Value>;

macro_rules! field {
    { $($name:ident: $variant:ident -> $t:ty, $what:literal;)* } => {
        $(
            pub fn $name<'a>(nbt: &'a Compound, field: &'static str) -> Result<&'a $t> {
                match nbt.get(field) {
                    Some(Value::$variant(v)) => Ok(v),
                    Some(_) => Err(Error::malformed(field, concat!("is not ", $what))),
                    None => Err(Error::malformed(field, "is missing")),
                }
            }
        )*
    }
}
field! {
    byte: Byte -> i8, "a byte";
    int: Int -> i32, "an int";
    string: String -> String, "a string";
    list: List -> Vec<Value>, "a list";
    compound: Compound -> Compound, "a compound";
    int_array: IntArray -> IntArray, "an int array";
}

pub fn value<'a>(nbt: &'a Compound, field: &'static str) -> Result<&'a Value> {
    nbt.get(field).ok_or(Error::malformed(field, "is missing"))
}

/// Every element of a list of compounds. An empty list may carry any element tag.
pub fn compounds<'a>(nbt: &'a Compound, field: &'static str) -> Result<impl Iterator<Item = Result<&'a Compound>>> {
    Ok(list(nbt, field)?.iter().map(move |entry| match entry {
        Value::Compound(c) => Ok(c),
        _ => Err(Error::malformed(field, "contains a non-compound entry")),
    }))
}

pub fn to_bytes(nbt: &Compound) -> Result<Vec<u8>> {
    Ok(fastnbt::to_bytes(nbt)?)
}
pub fn from_bytes(buf: &[u8]) -> Result<Compound> {
    Ok(fastnbt::from_bytes(buf)?)
}
