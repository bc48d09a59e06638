//! Registry of comparison strategies keyed by target type.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use attrval_core::AttrValue;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use super::{
    CompareOp, ComparisonFn, compare_bool, compare_decimal, compare_float64, compare_int,
    compare_int64, compare_ints, compare_string, compare_strings,
};
use crate::coerce::{Dynamic, TypeKey};
use crate::error::ComparisonError;

/// Maps target types to comparison strategies.
///
/// # Thread Safety
///
/// Strategies live behind a `parking_lot::RwLock`. Lookups take a read lock
/// and clone the strategy out, so the lock is never held while a strategy
/// runs and a strategy may itself use the registry.
///
/// # Examples
///
/// ```rust
/// use attrval_core::AttrValue;
/// use attrval_validator::coerce::Dynamic;
/// use attrval_validator::compare::{CompareOp, ComparisonRegistry};
///
/// let registry = ComparisonRegistry::new();
///
/// // Treat every bool comparison as passing.
/// registry.set_comparison_fn(&Dynamic::from(false), |_av, _op, _target, _meta| Ok(()));
///
/// let result = registry.compare_attr_values(
///     &AttrValue::bool_value(true),
///     CompareOp::LessThan,
///     &Dynamic::from(false),
///     &[],
/// );
/// assert!(result.is_ok());
/// ```
pub struct ComparisonRegistry {
    funcs: RwLock<HashMap<TypeKey, ComparisonFn>>,
}

impl ComparisonRegistry {
    /// Registry holding the default strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fns(Self::default_comparison_fns())
    }

    /// Registry with no strategies.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_fns(HashMap::new())
    }

    #[must_use]
    pub fn with_fns(funcs: HashMap<TypeKey, ComparisonFn>) -> Self {
        Self {
            funcs: RwLock::new(funcs),
        }
    }

    /// Default strategies.
    ///
    /// | target family | strategy |
    /// |---|---|
    /// | `bool` | [`compare_bool`] |
    /// | `f64` | [`compare_float64`] |
    /// | `i64` | [`compare_int64`] |
    /// | `isize`, `i32` | [`compare_int`] |
    /// | `Decimal` | [`compare_decimal`] |
    /// | `String` | [`compare_string`] |
    /// | `Vec<String>` | [`compare_strings`] |
    /// | `Vec<i64>` | [`compare_ints`] |
    pub fn default_comparison_fns() -> HashMap<TypeKey, ComparisonFn> {
        let int: ComparisonFn = Arc::new(compare_int);
        HashMap::from([
            (TypeKey::of::<bool>(), Arc::new(compare_bool) as ComparisonFn),
            (TypeKey::of::<f64>(), Arc::new(compare_float64) as ComparisonFn),
            (TypeKey::of::<i64>(), Arc::new(compare_int64) as ComparisonFn),
            (TypeKey::of::<isize>(), Arc::clone(&int)),
            (TypeKey::of::<i32>(), int),
            (TypeKey::of::<Decimal>(), Arc::new(compare_decimal) as ComparisonFn),
            (TypeKey::of::<String>(), Arc::new(compare_string) as ComparisonFn),
            (TypeKey::of::<Vec<String>>(), Arc::new(compare_strings) as ComparisonFn),
            (TypeKey::of::<Vec<i64>>(), Arc::new(compare_ints) as ComparisonFn),
        ])
    }

    /// Register `func` for targets of the same type as `exemplar`, replacing
    /// any existing strategy for that type.
    pub fn set_comparison_fn<F>(&self, exemplar: &Dynamic, func: F)
    where
        F: Fn(&AttrValue, CompareOp, &Dynamic, &[Dynamic]) -> Result<(), ComparisonError>
            + Send
            + Sync
            + 'static,
    {
        let key = exemplar.type_key();
        let replaced = self.funcs.write().insert(key, Arc::new(func)).is_some();
        tracing::debug!(target_type = key.name(), replaced, "comparison func registered");
    }

    /// Strategy for targets of the same type as `exemplar`.
    pub fn get_comparison_fn(&self, exemplar: &Dynamic) -> Option<ComparisonFn> {
        self.funcs.read().get(&exemplar.type_key()).cloned()
    }

    /// Whether a strategy exists for targets of the same type as `exemplar`.
    pub fn contains(&self, exemplar: &Dynamic) -> bool {
        self.funcs.read().contains_key(&exemplar.type_key())
    }

    /// Compare `av` with `target` using the strategy registered for the
    /// target's type.
    pub fn compare_attr_values(
        &self,
        av: &AttrValue,
        op: CompareOp,
        target: &Dynamic,
        meta: &[Dynamic],
    ) -> Result<(), ComparisonError> {
        let Some(func) = self.get_comparison_fn(target) else {
            tracing::debug!(
                target_type = target.type_name(),
                op = %op,
                "no comparison func registered"
            );
            return Err(ComparisonError::no_strategy(op, target.type_name()));
        };
        let result = func(av, op, target, meta);
        tracing::trace!(
            target_type = target.type_name(),
            op = %op,
            ok = result.is_ok(),
            "attribute comparison evaluated"
        );
        result
    }

    /// Number of registered strategies.
    pub fn len(&self) -> usize {
        self.funcs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.read().is_empty()
    }
}

impl Default for ComparisonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComparisonRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&'static str> = self.funcs.read().keys().map(TypeKey::name).collect();
        names.sort_unstable();
        f.debug_struct("ComparisonRegistry")
            .field("target_types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComparisonErrorKind;

    #[test]
    fn default_registry_covers_every_family() {
        let registry = ComparisonRegistry::new();
        for exemplar in [
            Dynamic::from(false),
            Dynamic::from(0.0_f64),
            Dynamic::from(0_i64),
            Dynamic::from(0_isize),
            Dynamic::from(0_i32),
            Dynamic::from(Decimal::ZERO),
            Dynamic::from(String::new()),
            Dynamic::from(Vec::<String>::new()),
            Dynamic::from(Vec::<i64>::new()),
        ] {
            assert!(registry.contains(&exemplar), "{}", exemplar.type_name());
        }
        assert_eq!(registry.len(), 9);
        assert!(!registry.contains(&Dynamic::from(0_u8)));
    }

    #[test]
    fn missing_strategy_is_reported() {
        let registry = ComparisonRegistry::empty();
        let err = registry
            .compare_attr_values(
                &AttrValue::int64_value(1),
                CompareOp::Equal,
                &Dynamic::from(1_i64),
                &[],
            )
            .unwrap_err();
        assert_eq!(err.kind(), ComparisonErrorKind::NoStrategyRegistered);
        assert!(registry.is_empty());
    }

    #[test]
    fn registration_replaces_existing() {
        let registry = ComparisonRegistry::new();
        let av = AttrValue::int64_value(1);
        let target = Dynamic::from(2_i64);
        assert!(registry.compare_attr_values(&av, CompareOp::Equal, &target, &[]).is_err());

        registry.set_comparison_fn(&target, |_, _, _, _| Ok(()));
        assert!(registry.compare_attr_values(&av, CompareOp::Equal, &target, &[]).is_ok());
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn strategy_may_reenter_registry() {
        let registry = Arc::new(ComparisonRegistry::new());
        let inner = Arc::clone(&registry);
        registry.set_comparison_fn(&Dynamic::from(0_u8), move |av, op, target, meta| {
            let Dynamic::Uint8(v) = target else {
                return Err(ComparisonError::unexpected_target("compare_u8", target, op, "uint8", None));
            };
            inner.compare_attr_values(av, op, &Dynamic::from(i64::from(*v)), meta)
        });

        assert!(
            registry
                .compare_attr_values(
                    &AttrValue::int64_value(9),
                    CompareOp::GreaterThan,
                    &Dynamic::from(3_u8),
                    &[],
                )
                .is_ok()
        );
    }

    #[test]
    fn concurrent_registration_and_lookup() {
        let registry = Arc::new(ComparisonRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let av = AttrValue::int64_value(5);
                    let target = Dynamic::from(5_i64);
                    for _ in 0..2000 {
                        if worker % 2 == 0 {
                            registry.set_comparison_fn(&Dynamic::from(0_u8), |_, _, _, _| Ok(()));
                        }
                        assert!(
                            registry
                                .compare_attr_values(
                                    &av,
                                    CompareOp::GreaterThanOrEqualTo,
                                    &target,
                                    &[],
                                )
                                .is_ok()
                        );
                        assert!(registry.get_comparison_fn(&target).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 10);
        assert!(registry.contains(&Dynamic::from(0_u8)));
    }
}
