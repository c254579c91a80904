//! Element type metadata and the closed set of output value kinds.
//!
//! Each decoded element carries a [`TypeInfo`] describing how its raw integer was
//! packed on the wire (bit width, decimal scale and reference value) together with its
//! unit. From these the engine derives the [`ValueKind`] used for output arrays, unless
//! the caller explicitly overrides it with one of the names accepted by
//! [`ValueKind::from_override_name`].

use serde::{Deserialize, Serialize};

/// Unit string marking character (string-valued) elements.
pub const STRING_UNIT: &str = "CCITT IA5";

/// The closed set of output value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    String,
}

impl ValueKind {
    /// Resolves a type override name.
    ///
    /// Recognized names are `int`, `uint`, `int32`, `uint32`, `int64`, `uint64`,
    /// `float` and `double`. `int` and `uint` are the 32-bit variants, `float` is
    /// single precision and `double` is double precision.
    pub fn from_override_name(name: &str) -> Option<ValueKind> {
        let kind = match name {
            "int" | "int32" => ValueKind::Int32,
            "uint" | "uint32" => ValueKind::UInt32,
            "int64" => ValueKind::Int64,
            "uint64" => ValueKind::UInt64,
            "float" => ValueKind::Float32,
            "double" => ValueKind::Float64,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ValueKind::String)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ValueKind::Int32 | ValueKind::UInt32 | ValueKind::Int64 | ValueKind::UInt64
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Int32 => "int32",
            ValueKind::UInt32 => "uint32",
            ValueKind::Int64 => "int64",
            ValueKind::UInt64 => "uint64",
            ValueKind::Float32 => "float",
            ValueKind::Float64 => "double",
            ValueKind::String => "string",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Packing metadata of a decoded element.
///
/// A decoded value is `(raw + reference) * 10^-scale`, where `raw` is an unsigned
/// integer of `bits` bits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub scale: i32,
    #[serde(default)]
    pub reference: i64,
    #[serde(default)]
    pub bits: u32,
    #[serde(default)]
    pub unit: String,
}

impl TypeInfo {
    pub fn new(scale: i32, reference: i64, bits: u32, unit: impl Into<String>) -> TypeInfo {
        TypeInfo {
            scale,
            reference,
            bits,
            unit: unit.into(),
        }
    }

    pub fn string() -> TypeInfo {
        TypeInfo::new(0, 0, 64, STRING_UNIT)
    }

    pub fn int32() -> TypeInfo {
        TypeInfo::new(0, -1, 31, "")
    }

    pub fn uint32() -> TypeInfo {
        TypeInfo::new(0, 0, 32, "")
    }

    pub fn int64() -> TypeInfo {
        TypeInfo::new(0, -1, 40, "")
    }

    pub fn uint64() -> TypeInfo {
        TypeInfo::new(0, 0, 40, "")
    }

    pub fn float32() -> TypeInfo {
        TypeInfo::new(1, 0, 16, "")
    }

    pub fn float64() -> TypeInfo {
        TypeInfo::new(1, 0, 32, "")
    }

    /// Returns a type info whose native kind is `kind`.
    pub fn for_kind(kind: ValueKind) -> TypeInfo {
        match kind {
            ValueKind::Int32 => TypeInfo::int32(),
            ValueKind::UInt32 => TypeInfo::uint32(),
            ValueKind::Int64 => TypeInfo::int64(),
            ValueKind::UInt64 => TypeInfo::uint64(),
            ValueKind::Float32 => TypeInfo::float32(),
            ValueKind::Float64 => TypeInfo::float64(),
            ValueKind::String => TypeInfo::string(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> TypeInfo {
        self.unit = unit.into();
        self
    }

    pub fn is_string(&self) -> bool {
        self.unit == STRING_UNIT
    }

    pub fn is_signed(&self) -> bool {
        self.reference < 0
    }

    pub fn is_integer(&self) -> bool {
        self.scale <= 0
    }

    /// Returns `true` when the decoded value range does not fit the 32-bit variant
    /// of the element's kind.
    pub fn is_64bit(&self) -> bool {
        if self.is_string() {
            return false;
        }

        let raw_max = 2f64.powi(self.bits.min(64) as i32) - 1.0;
        let low = self.reference as f64;
        let high = raw_max + self.reference as f64;

        if self.is_integer() {
            let factor = 10f64.powi(-self.scale);
            let (low, high) = (low * factor, high * factor);
            if self.is_signed() {
                low < i32::MIN as f64 || high > i32::MAX as f64
            } else {
                high > u32::MAX as f64
            }
        } else {
            // Raw magnitudes beyond the single precision mantissa need a double.
            low.abs().max(high.abs()) > (1u64 << f32::MANTISSA_DIGITS) as f64
        }
    }

    /// Selects the output kind implied by the packing metadata.
    pub fn native_kind(&self) -> ValueKind {
        if self.is_string() {
            ValueKind::String
        } else if self.is_integer() {
            match (self.is_signed(), self.is_64bit()) {
                (true, false) => ValueKind::Int32,
                (true, true) => ValueKind::Int64,
                (false, false) => ValueKind::UInt32,
                (false, true) => ValueKind::UInt64,
            }
        } else if self.is_64bit() {
            ValueKind::Float64
        } else {
            ValueKind::Float32
        }
    }
}
