//! Ciphertext type in the CL encryption scheme.

use crate::cl::{traits::TryConvertFrom, ClParameters};
use crate::proto::cl::Ciphertext as CiphertextProto;
use crate::{Error, Result};
use clhe_math::curve::GroupElement;
use clhe_traits::{
    DeserializeParametrized, DeserializeWithContext, LheCiphertext, LheParametrized, Serialize,
};
use prost::Message;
use std::sync::Arc;

/// A ciphertext encrypting a plaintext: the pair `(c1, c2) = (gq^r, f^m·pk^r)`.
///
/// The components are read through [`Ciphertext::c1`] and [`Ciphertext::c2`]
/// and can only be replaced through [`Ciphertext::new`], which checks that
/// they belong to the group of the parameters:
///
/// ```compile_fail
/// use clhe::cl::{Ciphertext, ClParameters, GroupElement};
///
/// let params = ClParameters::default_arc(16);
/// let other = ClParameters::default_arc(16);
/// let mut ct = Ciphertext::zero(&params);
/// ct.c1 = GroupElement::identity(other.group());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    /// The parameters of the underlying CL encryption scheme.
    pub(crate) par: Arc<ClParameters>,

    /// The randomizer component `gq^r`.
    pub(crate) c1: GroupElement,

    /// The masked message `f^m · pk^r`.
    pub(crate) c2: GroupElement,
}

impl Ciphertext {
    /// Number of group elements in a ciphertext.
    pub const NUM_COMPONENTS: usize = 2;

    /// Create a ciphertext from its two components.
    ///
    /// Both components must belong to the group of the parameters. Whether
    /// they are well-formed encryptions is not checked.
    pub fn new(c1: GroupElement, c2: GroupElement, par: &Arc<ClParameters>) -> Result<Self> {
        if c1.group() != par.group() || c2.group() != par.group() {
            return Err(Error::MathError(clhe_math::Error::InvalidContext));
        }
        Ok(Self {
            par: par.clone(),
            c1,
            c2,
        })
    }

    /// Create a ciphertext from a list of components, which must contain
    /// exactly `c1` and `c2`.
    pub fn try_from_components(c: Vec<GroupElement>, par: &Arc<ClParameters>) -> Result<Self> {
        match <[GroupElement; 2]>::try_from(c) {
            Ok([c1, c2]) => Self::new(c1, c2, par),
            Err(c) => Err(Error::InvalidCiphertextShape(c.len())),
        }
    }

    /// The ciphertext `(1, 1)`, a trivial encryption of `0` and the neutral
    /// element of the homomorphic addition.
    pub fn zero(par: &Arc<ClParameters>) -> Self {
        Self {
            par: par.clone(),
            c1: GroupElement::identity(par.group()),
            c2: GroupElement::identity(par.group()),
        }
    }

    /// Returns the randomizer component.
    pub fn c1(&self) -> &GroupElement {
        &self.c1
    }

    /// Returns the masked message component.
    pub fn c2(&self) -> &GroupElement {
        &self.c2
    }
}

impl LheCiphertext for Ciphertext {}

impl LheParametrized for Ciphertext {
    type Parameters = ClParameters;
}

impl Serialize for Ciphertext {
    fn to_bytes(&self) -> Vec<u8> {
        CiphertextProto::from(self).encode_to_vec()
    }
}

impl DeserializeParametrized for Ciphertext {
    type Error = Error;

    fn from_bytes(bytes: &[u8], par: &Arc<ClParameters>) -> Result<Self> {
        if let Ok(ctp) = Message::decode(bytes) {
            Ciphertext::try_convert_from(&ctp, par)
        } else {
            Err(Error::SerializationError)
        }
    }
}

/// Conversions from and to protobuf.
impl From<&Ciphertext> for CiphertextProto {
    fn from(ct: &Ciphertext) -> Self {
        CiphertextProto {
            c: vec![ct.c1.to_bytes(), ct.c2.to_bytes()],
        }
    }
}

impl TryConvertFrom<&CiphertextProto> for Ciphertext {
    fn try_convert_from(value: &CiphertextProto, par: &Arc<ClParameters>) -> Result<Self> {
        if value.c.len() != Self::NUM_COMPONENTS {
            return Err(Error::InvalidCiphertextShape(value.c.len()));
        }
        let c = value
            .c
            .iter()
            .map(|ci| GroupElement::from_bytes(ci, par.group()).map_err(Error::from))
            .collect::<Result<Vec<_>>>()?;
        Self::try_from_components(c, par)
    }
}
