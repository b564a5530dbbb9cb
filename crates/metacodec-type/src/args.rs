//! Native call arguments.
//!
//! An argument list is a slice of [`Arg`] slots. Encoding reads slots left to
//! right through an [`ArgCursor`]; decoding writes into them through an
//! [`ArgCursorMut`]. Each type descriptor consumes exactly
//! [`nargs_exp`](crate::TypeDescriptor::nargs_exp) slots per call, and every
//! consumption point checks the slot's kind.

use crate::error::ContractError;
use crate::mesh::Mesh;

/// One native argument slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Arg {
    /// Unset destination, filled by a decode that may reallocate.
    #[default]
    Empty,
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Mesh(Mesh),
}

impl Arg {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Mesh(_) => "mesh",
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Self::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Mesh> for Arg {
    fn from(m: Mesh) -> Self {
        Self::Mesh(m)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Arg {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

/// Read cursor over arguments being encoded.
#[derive(Debug)]
pub struct ArgCursor<'a> {
    args: &'a [Arg],
    consumed: usize,
}

impl<'a> ArgCursor<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self { args, consumed: 0 }
    }

    /// Slots not consumed yet.
    pub fn remaining(&self) -> usize {
        self.args.len()
    }

    /// Slots consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Consumes the next slot.
    pub fn take(&mut self) -> Result<&'a Arg, ContractError> {
        let (first, rest) = self
            .args
            .split_first()
            .ok_or(ContractError::ArgumentsExhausted {
                consumed: self.consumed,
            })?;
        self.args = rest;
        self.consumed += 1;
        Ok(first)
    }

    /// Consumes the next slot, which must hold a mesh.
    pub fn take_mesh(&mut self) -> Result<&'a Mesh, ContractError> {
        let index = self.consumed;
        let arg = self.take()?;
        arg.as_mesh().ok_or(ContractError::ArgumentKind {
            index,
            expected: "mesh",
            found: arg.kind(),
        })
    }
}

/// Write cursor over destinations being decoded into.
#[derive(Debug)]
pub struct ArgCursorMut<'a> {
    args: &'a mut [Arg],
    consumed: usize,
}

impl<'a> ArgCursorMut<'a> {
    pub fn new(args: &'a mut [Arg]) -> Self {
        Self { args, consumed: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.args.len()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Consumes the next destination slot.
    pub fn take(&mut self) -> Result<&'a mut Arg, ContractError> {
        let args = std::mem::take(&mut self.args);
        let Some((first, rest)) = args.split_first_mut() else {
            return Err(ContractError::ArgumentsExhausted {
                consumed: self.consumed,
            });
        };
        self.args = rest;
        self.consumed += 1;
        Ok(first)
    }

    /// Consumes the next destination slot for a value of kind `expected`.
    ///
    /// Without `allow_realloc` the slot must already hold that kind.
    pub fn take_for(
        &mut self,
        expected: &'static str,
        allow_realloc: bool,
    ) -> Result<&'a mut Arg, ContractError> {
        let index = self.consumed;
        let slot = self.take()?;
        if !allow_realloc && slot.kind() != expected {
            return Err(ContractError::ArgumentKind {
                index,
                expected,
                found: slot.kind(),
            });
        }
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_consumes_left_to_right() {
        let args = vec![Arg::Int(1), Arg::from("a"), Arg::Float(0.5)];
        let mut c = ArgCursor::new(&args);
        assert_eq!(c.remaining(), 3);
        assert_eq!(c.take().unwrap(), &Arg::Int(1));
        assert_eq!(c.take().unwrap().as_str(), Some("a"));
        assert_eq!(c.consumed(), 2);
        assert_eq!(c.remaining(), 1);
    }

    #[test]
    fn cursor_reports_exhaustion() {
        let mut c = ArgCursor::new(&[]);
        assert!(matches!(
            c.take(),
            Err(ContractError::ArgumentsExhausted { consumed: 0 })
        ));
    }

    #[test]
    fn take_mesh_checks_kind() {
        let args = vec![Arg::Int(3)];
        let mut c = ArgCursor::new(&args);
        let err = c.take_mesh().unwrap_err();
        assert!(matches!(
            err,
            ContractError::ArgumentKind { index: 0, expected: "mesh", found: "int" }
        ));
    }

    #[test]
    fn mut_cursor_writes_slots() {
        let mut args = vec![Arg::Empty, Arg::Empty];
        {
            let mut c = ArgCursorMut::new(&mut args);
            *c.take().unwrap() = Arg::Int(7);
            *c.take().unwrap() = Arg::from("x");
            assert_eq!(c.remaining(), 0);
            assert!(c.take().is_err());
        }
        assert_eq!(args, vec![Arg::Int(7), Arg::Str("x".into())]);
    }

    #[test]
    fn take_for_respects_realloc() {
        let mut args = vec![Arg::Empty, Arg::Float(0.0)];
        let mut c = ArgCursorMut::new(&mut args);
        assert!(c.take_for("float", false).is_err());
        assert!(c.take_for("float", false).is_ok());

        let mut args = vec![Arg::Empty];
        let mut c = ArgCursorMut::new(&mut args);
        assert!(c.take_for("mesh", true).is_ok());
    }
}
