use crate::bn254::{BN254Scalar, BN254G1};
use crate::prelude::*;
use serde::de::{SeqAccess, Visitor};

/// Helper trait to serialize objects that implement from/to bytes.
pub trait UltraFromToBytes: Sized {
    /// Convert to bytes.
    fn ultra_to_bytes(&self) -> Vec<u8>;
    /// Reconstruct from bytes.
    fn ultra_from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Visitor that collects a byte string from either a base64 text or raw bytes.
pub struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        formatter.write_str("a base64 string or a byte array")
    }

    fn visit_str<E>(self, v: &str) -> core::result::Result<Vec<u8>, E>
    where
        E: serde::de::Error,
    {
        b64dec(v).map_err(serde::de::Error::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Vec<u8>, E>
    where
        E: serde::de::Error,
    {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> core::result::Result<Vec<u8>, E>
    where
        E: serde::de::Error,
    {
        Ok(v)
    }

    fn visit_seq<V>(self, mut seq: V) -> core::result::Result<Vec<u8>, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let mut vec: Vec<u8> = vec![];
        while let Some(x) = seq.next_element()? {
            vec.push(x);
        }
        Ok(vec)
    }
}

/// Derive `serde::Serialize` and `serde::Deserialize` from `UltraFromToBytes`.
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&$crate::utils::b64enc(&self.ultra_to_bytes()))
                } else {
                    serializer.serialize_bytes(&self.ultra_to_bytes())
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bytes = if deserializer.is_human_readable() {
                    deserializer.deserialize_str($crate::serialization::BytesVisitor)?
                } else {
                    deserializer.deserialize_bytes($crate::serialization::BytesVisitor)?
                };
                $t::ultra_from_bytes(bytes.as_slice()).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl UltraFromToBytes for BN254Scalar {
    fn ultra_to_bytes(&self) -> Vec<u8> {
        self.to_bytes()
    }

    fn ultra_from_bytes(bytes: &[u8]) -> Result<Self> {
        BN254Scalar::from_bytes(bytes).map_err(|_| AlgebraError::DeserializationError)
    }
}

impl UltraFromToBytes for BN254G1 {
    fn ultra_to_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    fn ultra_from_bytes(bytes: &[u8]) -> Result<Self> {
        BN254G1::from_compressed_bytes(bytes)
    }
}

serialize_deserialize!(BN254Scalar);
serialize_deserialize!(BN254G1);
