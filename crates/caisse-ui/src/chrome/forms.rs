//! Required-field validation on submit.

/// A form field as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub required: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Required fields must not be blank.
    pub fn is_valid(&self) -> bool {
        !self.required || !self.value.trim().is_empty()
    }
}

/// Outcome of validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValidation {
    /// Names of the fields flagged invalid, in form order.
    pub invalid: Vec<String>,
}

impl FormValidation {
    /// The form may be submitted.
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn is_invalid(&self, name: &str) -> bool {
        self.invalid.iter().any(|n| n == name)
    }
}

pub fn validate(fields: &[Field]) -> FormValidation {
    FormValidation {
        invalid: fields
            .iter()
            .filter(|f| !f.is_valid())
            .map(|f| f.name.clone())
            .collect(),
    }
}
