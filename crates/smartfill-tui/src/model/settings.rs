use smartfill_core::{FieldBindings, FieldPath, SourceSpec};

/// A form input as declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub id: String,
    pub label: String,
    pub value: String,
}

/// Fully resolved settings: config files, env vars and CLI flags merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: Option<String>,
    pub key: Option<String>,
    pub display_fields: Vec<FieldPath>,
    pub bindings: FieldBindings,
    pub inputs: Vec<InputSpec>,
    pub timeout_secs: u64,
    pub theme_name: String,
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            key: None,
            display_fields: Vec::new(),
            bindings: FieldBindings::default(),
            inputs: Vec::new(),
            timeout_secs: 10,
            theme_name: "hacker".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// The `(source, key)` pair, once both are known.
    pub fn source_spec(&self) -> Option<SourceSpec> {
        match (&self.source, &self.key) {
            (Some(source), Some(key)) if !source.is_empty() && !key.is_empty() => {
                Some(SourceSpec::new(source.clone(), key.clone()))
            }
            _ => None,
        }
    }

    /// Declared inputs, or one input per bound id (labelled by the bound
    /// path's leaf) when none are declared.
    pub fn effective_inputs(&self) -> Vec<InputSpec> {
        if !self.inputs.is_empty() {
            return self.inputs.clone();
        }
        let mut inputs: Vec<InputSpec> = Vec::new();
        for binding in &self.bindings {
            if inputs.iter().any(|i| i.id == binding.input.as_str()) {
                continue;
            }
            inputs.push(InputSpec {
                id: binding.input.to_string(),
                label: binding.path.leaf().to_string(),
                value: String::new(),
            });
        }
        inputs
    }
}
