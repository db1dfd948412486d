//! Traits used for the CL encryption scheme.

use crate::cl::ClParameters;
use crate::Result;
use std::sync::Arc;

/// Fallible conversion that needs the scheme parameters, e.g. to rebuild
/// group elements from their protobuf encoding.
///
/// `TryFrom` has no room for the extra `par` argument.
pub trait TryConvertFrom<T>
where
    Self: Sized,
{
    /// Attempt to convert the `value` under the parameters `par`.
    fn try_convert_from(value: T, par: &Arc<ClParameters>) -> Result<Self>;
}
