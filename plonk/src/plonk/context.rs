//! Evaluation contexts for verifier arithmetic.
//!
//! The same widget code runs over plain field elements (native verification)
//! and over constraint-system variables (recursive verification). A context
//! owns whatever state the arithmetic needs: nothing natively, the gate list
//! in-circuit.

use crate::errors::{PlonkError, Result};
use ark_std::marker::PhantomData;
use ultra_algebra::prelude::*;

/// Field arithmetic over handles of type `Fr`.
pub trait FieldContext {
    /// The field the handles evaluate to.
    type Native: Scalar;

    /// The handle type: a field element natively, a variable index in-circuit.
    type Fr: Copy + Debug;

    /// Introduce a constant.
    fn constant(&mut self, c: Self::Native) -> Self::Fr;

    /// Return `a + b`.
    fn add(&mut self, a: &Self::Fr, b: &Self::Fr) -> Self::Fr;

    /// Return `a - b`.
    fn sub(&mut self, a: &Self::Fr, b: &Self::Fr) -> Self::Fr;

    /// Return `a * b`.
    fn mul(&mut self, a: &Self::Fr, b: &Self::Fr) -> Self::Fr;

    /// Return `a + c` for a constant `c`.
    fn add_constant(&mut self, a: &Self::Fr, c: &Self::Native) -> Self::Fr;

    /// Return `a * c` for a constant `c`.
    fn mul_constant(&mut self, a: &Self::Fr, c: &Self::Native) -> Self::Fr;

    /// Return `a / b`.
    fn div(&mut self, a: &Self::Fr, b: &Self::Fr) -> Result<Self::Fr>;

    /// Return the value behind a handle.
    fn value(&self, a: &Self::Fr) -> Self::Native;

    /// Constrain `a == b`. Natively there is nothing to record; the caller
    /// compares values.
    fn enforce_equal(&mut self, a: &Self::Fr, b: &Self::Fr);

    /// Return `-a`.
    fn neg(&mut self, a: &Self::Fr) -> Self::Fr {
        self.mul_constant(a, &Self::Native::one().neg())
    }

    /// Return `a^2`.
    fn square(&mut self, a: &Self::Fr) -> Self::Fr {
        self.mul(a, a)
    }

    /// Return `a^exp` by square-and-multiply.
    fn pow(&mut self, a: &Self::Fr, exp: u64) -> Self::Fr {
        let mut result = self.constant(Self::Native::one());
        let mut base = *a;
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(&result, &base);
            }
            e >>= 1;
            if e > 0 {
                base = self.square(&base);
            }
        }
        result
    }

    /// Return the sum of all terms, or zero for an empty slice.
    fn sum(&mut self, terms: &[Self::Fr]) -> Self::Fr {
        match terms.split_first() {
            None => self.constant(Self::Native::zero()),
            Some((first, rest)) => rest.iter().fold(*first, |acc, t| self.add(&acc, t)),
        }
    }

    /// Return the product of all factors, or one for an empty slice.
    fn product(&mut self, factors: &[Self::Fr]) -> Self::Fr {
        match factors.split_first() {
            None => self.constant(Self::Native::one()),
            Some((first, rest)) => rest.iter().fold(*first, |acc, t| self.mul(&acc, t)),
        }
    }
}

/// Plain field arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeContext<F>(PhantomData<F>);

impl<F: Scalar> NativeContext<F> {
    /// Create a native context.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<F: Scalar> FieldContext for NativeContext<F> {
    type Native = F;
    type Fr = F;

    #[inline]
    fn constant(&mut self, c: F) -> F {
        c
    }

    #[inline]
    fn add(&mut self, a: &F, b: &F) -> F {
        a.add(b)
    }

    #[inline]
    fn sub(&mut self, a: &F, b: &F) -> F {
        a.sub(b)
    }

    #[inline]
    fn mul(&mut self, a: &F, b: &F) -> F {
        a.mul(b)
    }

    #[inline]
    fn add_constant(&mut self, a: &F, c: &F) -> F {
        a.add(c)
    }

    #[inline]
    fn mul_constant(&mut self, a: &F, c: &F) -> F {
        a.mul(c)
    }

    #[inline]
    fn div(&mut self, a: &F, b: &F) -> Result<F> {
        let b_inv = b.inv().map_err(|_| PlonkError::DivisionByZero)?;
        Ok(a.mul(&b_inv))
    }

    #[inline]
    fn value(&self, a: &F) -> F {
        *a
    }

    #[inline]
    fn enforce_equal(&mut self, _a: &F, _b: &F) {}

    #[inline]
    fn neg(&mut self, a: &F) -> F {
        a.neg()
    }

    #[inline]
    fn pow(&mut self, a: &F, exp: u64) -> F {
        a.pow(&[exp])
    }
}
