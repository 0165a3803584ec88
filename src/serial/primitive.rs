//! Serialization of primitive values.
#![cfg(target_pointer_width = "64")]

use std::io::{Read, Write};

use anyhow::Result;

use super::Serializable;
use crate::Error;

macro_rules! common_def {
    ($int:ident) => {
        impl Serializable for $int {
            fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
                writer.write_all(&self.to_le_bytes())?;
                Ok(std::mem::size_of::<Self>())
            }

            fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
                let mut buf = [0; std::mem::size_of::<Self>()];
                reader.read_exact(&mut buf)?;
                Ok(Self::from_le_bytes(buf))
            }

            fn size_in_bytes(&self) -> usize {
                std::mem::size_of::<Self>()
            }

            fn size_of() -> Option<usize> {
                Some(std::mem::size_of::<Self>())
            }
        }
    };
}

common_def!(u8);
common_def!(u32);
common_def!(u64);
common_def!(usize);

/// Characters are stored as their 32-bit scalar values.
impl Serializable for char {
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize> {
        (*self as u32).serialize_into(writer)
    }

    fn deserialize_from<R: Read>(reader: R) -> Result<Self> {
        let x = u32::deserialize_from(reader)?;
        char::from_u32(x)
            .ok_or_else(|| Error::serialization(format!("{x:#x} is not a unicode scalar value.")))
    }

    fn size_in_bytes(&self) -> usize {
        std::mem::size_of::<u32>()
    }

    fn size_of() -> Option<usize> {
        Some(std::mem::size_of::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char() {
        let mut bytes = vec![];
        let chars = vec!['a', 'あ', '\u{FFFF}', '\0'];
        let size = chars.serialize_into(&mut bytes).unwrap();
        let other = Vec::<char>::deserialize_from(&bytes[..]).unwrap();
        assert_eq!(chars, other);
        assert_eq!(size, bytes.len());
        assert_eq!(size, chars.size_in_bytes());
    }

    #[test]
    fn test_char_surrogate() {
        let bytes = 0xD800u32.to_le_bytes();
        let e = char::deserialize_from(&bytes[..]).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::Serialization(
                "0xd800 is not a unicode scalar value.".to_string()
            ))
        );
    }

    #[test]
    fn test_truncated() {
        let bytes = [1u8, 2, 3];
        assert!(u64::deserialize_from(&bytes[..]).is_err());
    }
}
