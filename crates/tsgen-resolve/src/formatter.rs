//! Formatter trait and registry.

use std::collections::HashMap;

use crate::error::OperationError;

pub type FormatterFn = fn(&str) -> Result<String, OperationError>;

/// Post-processing applied to an already resolved scalar.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        "Formatter"
    }

    fn format(&self, value: &str) -> Result<String, OperationError>;
}

pub struct FunctionFormatter {
    name: &'static str,
    description: &'static str,
    format_fn: FormatterFn,
}

impl FunctionFormatter {
    pub fn new(name: &'static str, description: &'static str, format_fn: FormatterFn) -> Self {
        Self {
            name,
            description,
            format_fn,
        }
    }
}

impl Formatter for FunctionFormatter {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn format(&self, value: &str) -> Result<String, OperationError> {
        (self.format_fn)(value)
    }
}

/// Formatters indexed by name.
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, formatter: Box<dyn Formatter>) {
        self.formatters
            .insert(formatter.name().to_string(), formatter);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Registered formatters sorted by name.
    pub fn formatters(&self) -> Vec<&dyn Formatter> {
        let mut formatters: Vec<&dyn Formatter> =
            self.formatters.values().map(|f| f.as_ref()).collect();
        formatters.sort_by(|a, b| a.name().cmp(b.name()));
        formatters
    }
}
