use alloc::string::ToString;
use core::{fmt, str::FromStr};

use log::debug;

use crate::codecs::{Base64Codec, HexCodec, Utf8Codec};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::BufferError;

/// The fixed set of text encodings a buffer converts to and from.
///
/// Names parse case-insensitively; `utf-8` is accepted as an alias of
/// `utf8`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    Base64,
    Hex,
}

impl Encoding {
    pub const ALL: [Encoding; 3] = [Encoding::Utf8, Encoding::Base64, Encoding::Hex];

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Base64 => "base64",
            Self::Hex => "hex",
        }
    }

    /// Returns `true` if `name` parses as an encoding.
    pub fn is_encoding(name: &str) -> bool {
        Self::lookup(name).is_some()
    }

    fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|encoding| name.eq_ignore_ascii_case(encoding.as_str()))
            .or_else(|| name.eq_ignore_ascii_case("utf-8").then_some(Self::Utf8))
    }

    pub fn encoder(self) -> &'static dyn Encoder {
        match self {
            Self::Utf8 => &Utf8Codec,
            Self::Base64 => &Base64Codec,
            Self::Hex => &HexCodec,
        }
    }

    pub fn decoder(self) -> &'static dyn Decoder {
        match self {
            Self::Utf8 => &Utf8Codec,
            Self::Base64 => &Base64Codec,
            Self::Hex => &HexCodec,
        }
    }

    /// Number of bytes `text` decodes to under this encoding.
    pub fn byte_length(self, text: &str) -> usize {
        self.decoder().decode_len(text)
    }
}

impl FromStr for Encoding {
    type Err = BufferError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::lookup(name).ok_or_else(|| {
            debug!("rejecting unsupported encoding {name:?}");
            BufferError::UnsupportedEncoding {
                name: name.to_string(),
            }
        })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("utf8".parse::<Encoding>(), Ok(Encoding::Utf8));
        assert_eq!("UTF8".parse::<Encoding>(), Ok(Encoding::Utf8));
        assert_eq!("Utf-8".parse::<Encoding>(), Ok(Encoding::Utf8));
        assert_eq!("BASE64".parse::<Encoding>(), Ok(Encoding::Base64));
        assert_eq!("Hex".parse::<Encoding>(), Ok(Encoding::Hex));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "latin1".parse::<Encoding>(),
            Err(BufferError::UnsupportedEncoding {
                name: "latin1".to_string()
            })
        );
        assert!(!Encoding::is_encoding("base64url"));
        assert!(!Encoding::is_encoding(""));
        assert!(Encoding::is_encoding("HEX"));
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(Encoding::default(), Encoding::Utf8);
        for encoding in Encoding::ALL {
            assert_eq!(encoding.to_string().parse::<Encoding>(), Ok(encoding));
        }
    }

    #[test]
    fn test_byte_length() {
        assert_eq!(Encoding::Utf8.byte_length("£1"), 3);
        assert_eq!(Encoding::Base64.byte_length("aGVsbG8gd29ybGQ="), 11);
        assert_eq!(Encoding::Hex.byte_length("abcdef"), 3);
    }
}
