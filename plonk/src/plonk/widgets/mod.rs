//! The constraint widgets of an Ultra proof.
//!
//! Each widget checks one gate family. It consumes a fixed number of
//! consecutive powers of the `alpha` challenge, starting from the power it is
//! handed, and returns the first power it did not use. Two passes exist:
//! one fills the scalar map with the coefficients of the widget's
//! commitments, the other adds the widget's share to the quotient evaluation.
//! Both consume the same powers.

use crate::errors::{PlonkError, Result};
use crate::plonk::{
    context::FieldContext, curve::VerifierCurve, key::VerificationKey, settings::BaseSettings,
    transcript::VerifierTranscript,
};
use ark_std::collections::BTreeMap;
use tracing::trace;
use ultra_algebra::prelude::*;

mod arithmetic;
mod auxiliary;
mod elliptic;
mod genperm_sort;
mod permutation;
mod plookup;

pub use arithmetic::PlookupArithmeticWidget;
pub use auxiliary::PlookupAuxiliaryWidget;
pub use elliptic::EllipticWidget;
pub use genperm_sort::GenPermSortWidget;
pub use permutation::{PermutationParams, PermutationWidget};
pub use plookup::PlookupWidget;

/// Coefficients of labelled commitments, filled by the scalar pass.
pub type ScalarMap<V> = BTreeMap<String, V>;

/// A constraint checker for one gate family.
pub trait VerifierWidget {
    /// A short name for logs.
    const NAME: &'static str;

    /// The number of alpha powers each pass consumes.
    const NUM_ALPHA_POWERS: usize;

    /// The labels the scalar pass inserts.
    const SCALAR_LABELS: &'static [&'static str];

    /// Extra inputs of both passes, chosen by the verifier profile.
    type Params: Copy + Debug + Default;

    /// The settings the widget was built with.
    fn settings(&self) -> &BaseSettings;

    /// Return [`Self::NAME`].
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Return [`Self::NUM_ALPHA_POWERS`].
    fn num_alpha_powers(&self) -> usize {
        Self::NUM_ALPHA_POWERS
    }

    /// Return [`Self::SCALAR_LABELS`].
    fn scalar_labels(&self) -> &'static [&'static str] {
        Self::SCALAR_LABELS
    }

    /// Insert this widget's commitment coefficients into `scalars` and
    /// return the next unused alpha power.
    fn append_scalar_multiplication_inputs<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        scalars: &mut ScalarMap<C::Fr>,
        params: Self::Params,
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>;

    /// Add this widget's share of the quotient evaluation to `quotient` and
    /// return the next unused alpha power.
    fn compute_quotient_evaluation_contribution<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        quotient: &mut C::Fr,
        params: Self::Params,
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>;
}

/// Return `alpha_base * alpha^i` for `i < n`, and `alpha_base * alpha^n`.
pub(crate) fn alpha_powers<C, T>(
    cs: &mut C,
    transcript: &T,
    alpha_base: &C::Fr,
    n: usize,
) -> Result<(Vec<C::Fr>, C::Fr)>
where
    C: FieldContext,
    T: VerifierTranscript<C>,
{
    let alpha = transcript.get_challenge_field_element(cs, "alpha", 0)?;
    let mut powers = Vec::with_capacity(n);
    let mut current = *alpha_base;
    for _ in 0..n {
        powers.push(current);
        current = cs.mul(&current, &alpha);
    }
    Ok((powers, current))
}

/// Read a fixed list of evaluations.
pub(crate) fn read_evaluations<C, T, const N: usize>(
    cs: &mut C,
    transcript: &T,
    names: [&str; N],
) -> Result<[C::Fr; N]>
where
    C: FieldContext,
    T: VerifierTranscript<C>,
{
    let values = names
        .iter()
        .map(|name| transcript.get_field_element(cs, name))
        .collect::<Result<Vec<_>>>()?;
    values.try_into().map_err(|_| PlonkError::FuncParamsError)
}

/// Insert a coefficient, refusing to overwrite another widget's label.
pub(crate) fn insert_scalar<V>(scalars: &mut ScalarMap<V>, label: &str, value: V) -> Result<()> {
    if scalars.contains_key(label) {
        return Err(PlonkError::DuplicateScalarLabel(label.to_string()));
    }
    scalars.insert(label.to_string(), value);
    Ok(())
}

/// Add `contribution` to `quotient`.
pub(crate) fn accumulate<C: FieldContext>(cs: &mut C, quotient: &mut C::Fr, contribution: &C::Fr) {
    *quotient = cs.add(quotient, contribution);
}

/// Return `a - c` for a constant `c`.
pub(crate) fn sub_constant<C: FieldContext>(cs: &mut C, a: &C::Fr, c: u64) -> C::Fr {
    cs.add_constant(a, &C::Native::from(c).neg())
}

/// The widgets a verifier profile is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    /// The copy-constraint grand product.
    Permutation(PermutationWidget),
    /// The lookup grand product.
    Plookup(PlookupWidget),
    /// Ultra arithmetic gates.
    Arithmetic(PlookupArithmeticWidget),
    /// Delta-range (sorted list) constraints.
    GenPermSort(GenPermSortWidget),
    /// Embedded-curve addition and doubling.
    Elliptic(EllipticWidget),
    /// ROM, non-native field and limb accumulation gates.
    Auxiliary(PlookupAuxiliaryWidget),
}

macro_rules! with_widget {
    ($kind:expr, $w:ident => $body:expr) => {
        match $kind {
            WidgetKind::Permutation($w) => $body,
            WidgetKind::Plookup($w) => $body,
            WidgetKind::Arithmetic($w) => $body,
            WidgetKind::GenPermSort($w) => $body,
            WidgetKind::Elliptic($w) => $body,
            WidgetKind::Auxiliary($w) => $body,
        }
    };
}

/// Like `with_widget!`, also binding the widget's `Params` for the profile's
/// `idpolys` flag.
macro_rules! with_params {
    ($kind:expr, $idpolys:expr, $w:ident, $p:ident => $body:expr) => {
        match $kind {
            WidgetKind::Permutation($w) => {
                let $p = PermutationParams { idpolys: $idpolys };
                $body
            }
            WidgetKind::Plookup($w) => {
                let $p = ();
                $body
            }
            WidgetKind::Arithmetic($w) => {
                let $p = ();
                $body
            }
            WidgetKind::GenPermSort($w) => {
                let $p = ();
                $body
            }
            WidgetKind::Elliptic($w) => {
                let $p = ();
                $body
            }
            WidgetKind::Auxiliary($w) => {
                let $p = ();
                $body
            }
        }
    };
}

impl WidgetKind {
    /// Return the widget's name.
    pub fn name(&self) -> &'static str {
        with_widget!(self, w => w.name())
    }

    /// Return the number of alpha powers the widget consumes.
    pub fn num_alpha_powers(&self) -> usize {
        with_widget!(self, w => w.num_alpha_powers())
    }

    /// Return the labels the widget's scalar pass inserts.
    pub fn scalar_labels(&self) -> &'static [&'static str] {
        with_widget!(self, w => w.scalar_labels())
    }

    /// Return the settings the widget was built with.
    pub fn settings(&self) -> &BaseSettings {
        with_widget!(self, w => w.settings())
    }

    /// Run the widget's scalar pass. `idpolys` only reaches the permutation widget.
    pub fn append_scalar_multiplication_inputs<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        scalars: &mut ScalarMap<C::Fr>,
        idpolys: bool,
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        self.settings()
            .check_challenge_bytes(transcript.num_challenge_bytes())?;
        trace!(
            widget = self.name(),
            powers = self.num_alpha_powers(),
            "appending scalar multiplication inputs"
        );
        with_params!(self, idpolys, w, params => w.append_scalar_multiplication_inputs(
            cs, key, alpha_base, transcript, scalars, params
        ))
    }

    /// Run the widget's quotient pass. `idpolys` only reaches the permutation widget.
    pub fn compute_quotient_evaluation_contribution<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        quotient: &mut C::Fr,
        idpolys: bool,
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        self.settings()
            .check_challenge_bytes(transcript.num_challenge_bytes())?;
        trace!(
            widget = self.name(),
            powers = self.num_alpha_powers(),
            "computing quotient evaluation contribution"
        );
        with_params!(self, idpolys, w, params => w.compute_quotient_evaluation_contribution(
            cs, key, alpha_base, transcript, quotient, params
        ))
    }
}
