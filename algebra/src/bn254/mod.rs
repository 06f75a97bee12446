/// The number of bytes for a scalar value over BN254.
pub const BN254_SCALAR_LEN: usize = 32;

/// Forward one binary operator, by value and by reference, plus its
/// assigning form, to the wrapped arkworks type.
macro_rules! impl_wrapped_ops {
    ($t:ty, $rhs:ty, $op:ident $method:ident $op_assign:ident $method_assign:ident) => {
        impl $op<$rhs> for $t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: $rhs) -> $t {
                Self(self.0.$method(rhs.0))
            }
        }

        impl<'a> $op<&'a $rhs> for $t {
            type Output = $t;

            #[inline]
            fn $method(self, rhs: &'a $rhs) -> $t {
                Self(self.0.$method(rhs.0))
            }
        }

        impl<'a> $op_assign<&'a $rhs> for $t {
            #[inline]
            fn $method_assign(&mut self, rhs: &'a $rhs) {
                self.0.$method_assign(rhs.0)
            }
        }
    };
}

mod fr;
pub use fr::*;

mod g1;
pub use g1::*;
