//! ScalarType: fixed-precision numbers.

use metacodec_json_pack::{JsonWriter, Value};

use crate::args::{Arg, ArgCursor, ArgCursorMut};
use crate::error::{CodecResult, ContractError, FormatError};
use crate::type_def::abs_type::{self, pad};
use crate::type_def::{TypeDescriptor, TypeNode};
use crate::value::{GenericData, GenericValue};

const TYPE_NAME: &str = "scalar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSubtype {
    Float,
    Int,
    Uint,
}

impl ScalarSubtype {
    /// Also the [`Arg::kind`] of values of this subtype.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Uint => "uint",
        }
    }

    /// Bit widths values of this subtype may have.
    pub fn supports_precision(self, precision: u64) -> bool {
        match self {
            Self::Float => matches!(precision, 32 | 64),
            Self::Int | Self::Uint => matches!(precision, 8 | 16 | 32 | 64),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "float" => Some(Self::Float),
            "int" => Some(Self::Int),
            "uint" => Some(Self::Uint),
            _ => None,
        }
    }
}

/// Numeric leaf descriptor, one argument slot per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarType {
    pub subtype: ScalarSubtype,
    /// Width in bits.
    pub precision: u32,
}

impl ScalarType {
    pub fn new(subtype: ScalarSubtype, precision: u32) -> Self {
        Self { subtype, precision }
    }

    /// A 64-bit float.
    pub fn float() -> Self {
        Self::new(ScalarSubtype::Float, 64)
    }

    pub fn int(precision: u32) -> Self {
        Self::new(ScalarSubtype::Int, precision)
    }

    pub fn uint(precision: u32) -> Self {
        Self::new(ScalarSubtype::Uint, precision)
    }

    /// Fails for widths the subtype does not support. Encode and decode
    /// refuse to run with such a descriptor.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.subtype.supports_precision(u64::from(self.precision)) {
            return Ok(());
        }
        log::error!(
            "{TYPE_NAME}: unsupported precision {} for {}",
            self.precision,
            self.subtype.as_str()
        );
        Err(ContractError::InvalidPrecision {
            subtype: self.subtype.as_str(),
            precision: self.precision,
        })
    }

    /// Inclusive value range of a signed integer of this width.
    pub fn int_range(&self) -> (i64, i64) {
        match self.precision {
            0 => (0, 0),
            p if p >= 64 => (i64::MIN, i64::MAX),
            p => {
                let half = 1i64 << (p - 1);
                (-half, half - 1)
            }
        }
    }

    pub fn uint_max(&self) -> u64 {
        match self.precision {
            p if p >= 64 => u64::MAX,
            p => (1u64 << p) - 1,
        }
    }

    fn out_of_range(value: impl ToString) -> FormatError {
        FormatError::OutOfRange {
            type_name: TYPE_NAME,
            value: value.to_string(),
        }
    }

    /// Checks `arg` against the subtype and precision. `Ok(false)` means the
    /// argument has the wrong kind.
    fn check(&self, arg: &Arg) -> Result<bool, FormatError> {
        match (self.subtype, arg) {
            (ScalarSubtype::Float, Arg::Float(v)) if !v.is_finite() => Err(Self::out_of_range(v)),
            (ScalarSubtype::Int, Arg::Int(v)) => {
                let (lo, hi) = self.int_range();
                if (lo..=hi).contains(v) {
                    Ok(true)
                } else {
                    Err(Self::out_of_range(v))
                }
            }
            (ScalarSubtype::Uint, Arg::Uint(v)) if *v > self.uint_max() => {
                Err(Self::out_of_range(v))
            }
            (ScalarSubtype::Float, Arg::Float(_)) | (ScalarSubtype::Uint, Arg::Uint(_)) => Ok(true),
            _ => Ok(false),
        }
    }

    fn write(writer: &mut JsonWriter, arg: &Arg) -> CodecResult<()> {
        match arg {
            Arg::Float(v) => writer.f64(*v)?,
            Arg::Int(v) => writer.i64(*v)?,
            Arg::Uint(v) => writer.u64(*v)?,
            _ => {}
        }
        Ok(())
    }

    fn read(&self, data: &Value) -> CodecResult<Arg> {
        self.validate()?;
        let arg = match self.subtype {
            ScalarSubtype::Float => data.as_f64().map(Arg::Float),
            ScalarSubtype::Int => data.as_i64().map(Arg::Int),
            ScalarSubtype::Uint => data.as_u64().map(Arg::Uint),
        };
        let Some(arg) = arg else {
            return Err(abs_type::wrong_kind(TYPE_NAME, self.subtype.as_str(), data).into());
        };
        self.check(&arg)?;
        Ok(arg)
    }
}

impl TypeDescriptor for ScalarType {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn copy(&self) -> TypeNode {
        TypeNode::Scalar(*self)
    }

    fn display_into(&self, out: &mut String, indent: usize) {
        pad(out, indent);
        out.push_str(&format!(
            "{TYPE_NAME} ({}, {} bits)\n",
            self.subtype.as_str(),
            self.precision
        ));
    }

    fn nbytes(&self) -> usize {
        (self.precision as usize).div_ceil(8)
    }

    fn nargs_exp(&self) -> usize {
        1
    }

    fn update(&mut self, other: &TypeNode) -> CodecResult<()> {
        let TypeNode::Scalar(other) = other else {
            return Err(abs_type::type_mismatch(TYPE_NAME, other));
        };
        other.validate()?;
        if other.subtype != self.subtype {
            return Err(ContractError::TypeMismatch {
                expected: self.subtype.as_str(),
                found: other.subtype.as_str(),
            }
            .into());
        }
        self.precision = other.precision;
        Ok(())
    }

    fn encode_type_prop(&self, writer: &mut JsonWriter) -> CodecResult<()> {
        abs_type::encode_type_name(TYPE_NAME, writer)?;
        writer.key("subtype")?;
        writer.string(self.subtype.as_str())?;
        writer.key("precision")?;
        writer.u64(u64::from(self.precision))?;
        Ok(())
    }

    fn encode_data(&self, writer: &mut JsonWriter, args: &mut ArgCursor<'_>) -> CodecResult<()> {
        self.validate()?;
        let index = args.consumed();
        let arg = args.take()?;
        if !self.check(arg)? {
            return Err(ContractError::ArgumentKind {
                index,
                expected: self.subtype.as_str(),
                found: arg.kind(),
            }
            .into());
        }
        Self::write(writer, arg)
    }

    fn encode_generic(&self, writer: &mut JsonWriter, x: &GenericValue) -> CodecResult<()> {
        self.validate()?;
        let arg = x.as_arg().unwrap_or(&Arg::Empty);
        if !self.check(arg)? {
            return Err(ContractError::GenericKind {
                type_name: TYPE_NAME,
                expected: self.subtype.as_str(),
                found: x.data.kind(),
            }
            .into());
        }
        Self::write(writer, arg)
    }

    fn decode_data(
        &self,
        data: &Value,
        allow_realloc: bool,
        args: &mut ArgCursorMut<'_>,
    ) -> CodecResult<()> {
        let arg = self.read(data)?;
        *args.take_for(self.subtype.as_str(), allow_realloc)? = arg;
        Ok(())
    }

    fn decode_generic(&self, data: &Value, x: &mut GenericValue) -> CodecResult<()> {
        x.data = GenericData::Native(self.read(data)?);
        Ok(())
    }
}
