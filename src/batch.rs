//! Parallel fan-out over many inputs.
//!
//! Definitions are immutable and contention-free, so conforming a batch
//! of independent inputs parallelizes trivially.

use rayon::prelude::*;

use crate::def::Conform;
use crate::result::ConformResult;
use crate::value::Value;

/// Conforms every value against one shared definition on the rayon
/// thread pool.
///
/// Results come back in input order.
///
/// # Example
///
/// ```rust
/// use conformal::{batch, Def, Value, ValueType};
///
/// let def = Def::value_type(ValueType::Int);
/// let inputs = vec![Value::Int(1), Value::from("x"), Value::Int(3)];
///
/// let results = batch::conform_all(&def, &inputs);
/// assert!(results[0].passed());
/// assert!(results[1].failed());
/// assert!(results[2].passed());
/// ```
pub fn conform_all<D>(def: &D, values: &[Value]) -> Vec<ConformResult>
where
    D: Conform + ?Sized,
{
    values.par_iter().map(|value| def.conform(value)).collect()
}
