use alloc::string::String;
use core::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
    ser,
};

use crate::{CodeUnit, WideString};

/// Serializes as a UTF-8 string; fails on units that are not scalar values.
impl<U: CodeUnit> Serialize for WideString<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let utf8 = self.to_utf8().map_err(ser::Error::custom)?;
        serializer.serialize_str(&utf8)
    }
}

impl<'de, U: CodeUnit> Deserialize<'de> for WideString<U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(WideStringVisitor(PhantomData))
    }
}

struct WideStringVisitor<U>(PhantomData<U>);

impl<U: CodeUnit> Visitor<'_> for WideStringVisitor<U> {
    type Value = WideString<U>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a UTF-8 string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        WideString::from_utf8(v).map_err(E::custom)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        self.visit_str(&v)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        WideString::from_utf8(v).map_err(E::custom)
    }
}
