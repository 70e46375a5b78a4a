//! Client protocol versions
//!
//! The negotiated version only decides which types are legal; it never
//! changes the byte layout.

use crate::error::{QlError, Result};
use crate::types::DataType;

/// Negotiated client protocol (CQL native protocol version)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientProtocol {
    version: u8,
}

impl ClientProtocol {
    pub const MIN_VERSION: u8 = 3;
    pub const MAX_VERSION: u8 = 5;

    pub const V3: ClientProtocol = ClientProtocol { version: 3 };
    pub const V4: ClientProtocol = ClientProtocol { version: 4 };
    pub const V5: ClientProtocol = ClientProtocol { version: 5 };

    /// Protocol for a negotiated version number
    pub fn new(version: u8) -> Result<Self> {
        if !(Self::MIN_VERSION..=Self::MAX_VERSION).contains(&version) {
            return Err(QlError::invalid_argument(format!(
                "unsupported client protocol version {} (expected {}..={})",
                version,
                Self::MIN_VERSION,
                Self::MAX_VERSION
            )));
        }
        Ok(Self { version })
    }

    pub fn version(self) -> u8 {
        self.version
    }

    /// Whether values of `data_type` may cross the wire at this version
    ///
    /// `tinyint` and `smallint` arrived with v4. Collections are legal when
    /// all of their element types are.
    pub fn supports(self, data_type: &DataType) -> bool {
        match data_type {
            DataType::TinyInt | DataType::SmallInt => self.version >= 4,
            DataType::Map(key, value) => self.supports(key) && self.supports(value),
            DataType::Set(elem) | DataType::List(elem) => self.supports(elem),
            _ => true,
        }
    }

    pub(crate) fn check(self, data_type: &DataType) -> Result<()> {
        if self.supports(data_type) {
            Ok(())
        } else {
            Err(QlError::invalid_argument(format!(
                "type {} is not supported by client protocol v{}",
                data_type, self.version
            )))
        }
    }
}

impl Default for ClientProtocol {
    fn default() -> Self {
        Self::V4
    }
}
