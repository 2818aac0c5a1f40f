//! Custom operation trait and registry.

use std::collections::HashMap;

use tsgen_model::{RecordSet, ResolvedValue, SliceBounds, ValueKind};

use crate::error::OperationError;

/// Signature of a function-backed operation.
pub type OperationFn = fn(&RecordSet, &SliceBounds) -> Result<ResolvedValue, OperationError>;

/// A named derivation over the records of one sheet.
///
/// Scalar operations ignore `bounds`; table operations apply them.
pub trait CustomOperation: Send + Sync {
    /// Configuration-facing name, e.g. `getTableData`.
    fn name(&self) -> &str;

    /// Kind of value this operation produces.
    fn kind(&self) -> ValueKind;

    fn description(&self) -> &str {
        "Custom operation"
    }

    fn apply(
        &self,
        records: &RecordSet,
        bounds: &SliceBounds,
    ) -> Result<ResolvedValue, OperationError>;
}

/// Adapts a plain function to [`CustomOperation`].
pub struct FunctionOperation {
    name: &'static str,
    kind: ValueKind,
    description: &'static str,
    apply_fn: OperationFn,
}

impl FunctionOperation {
    pub fn new(
        name: &'static str,
        kind: ValueKind,
        description: &'static str,
        apply_fn: OperationFn,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            apply_fn,
        }
    }
}

impl CustomOperation for FunctionOperation {
    fn name(&self) -> &str {
        self.name
    }

    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn description(&self) -> &str {
        self.description
    }

    fn apply(
        &self,
        records: &RecordSet,
        bounds: &SliceBounds,
    ) -> Result<ResolvedValue, OperationError> {
        (self.apply_fn)(records, bounds)
    }
}

/// Operations indexed by name. Lookup is case-sensitive.
#[derive(Default)]
pub struct OperationRegistry {
    operations: HashMap<String, Box<dyn CustomOperation>>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation under its name, replacing any previous one.
    pub fn register(&mut self, operation: Box<dyn CustomOperation>) {
        self.operations
            .insert(operation.name().to_string(), operation);
    }

    pub fn get(&self, name: &str) -> Option<&dyn CustomOperation> {
        self.operations.get(name).map(|op| op.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Registered operations sorted by name.
    pub fn operations(&self) -> Vec<&dyn CustomOperation> {
        let mut operations: Vec<&dyn CustomOperation> =
            self.operations.values().map(|op| op.as_ref()).collect();
        operations.sort_by(|a, b| a.name().cmp(b.name()));
        operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(_: &RecordSet, _: &SliceBounds) -> Result<ResolvedValue, OperationError> {
        Ok(ResolvedValue::Scalar("42".to_string()))
    }

    #[test]
    fn register_replaces_by_name() {
        let mut registry = OperationRegistry::new();
        registry.register(Box::new(FunctionOperation::new(
            "answer",
            ValueKind::Scalar,
            "first",
            constant,
        )));
        registry.register(Box::new(FunctionOperation::new(
            "answer",
            ValueKind::Scalar,
            "second",
            constant,
        )));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("answer").map(|op| op.description()), Some("second"));
        assert!(registry.get("Answer").is_none());
    }
}
