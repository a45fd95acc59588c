//! A pure-Rust implementation of group operations on secp256k1.

pub(crate) mod accumulator;
pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod jacobian;
pub(crate) mod mul;
pub(crate) mod scalar;

#[cfg(test)]
pub(crate) mod dev;

pub use self::{
    affine::AffinePoint,
    field::FieldElement,
    jacobian::JacobianPoint,
    mul::{scalar_base_mult_non_const, scalar_mult_non_const, split_k},
    scalar::Scalar,
};

/// The curve equation constant `b = 7`.
pub(crate) const CURVE_EQUATION_B: FieldElement = FieldElement::from_u32(7);
