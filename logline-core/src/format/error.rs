use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    /// The pattern string is not a valid regular expression.
    #[error("invalid regex in format '{name}': {source}")]
    InvalidExpression {
        name: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// The pattern compiled but does not define every required capture group.
    #[error("format '{name}' must define the capture groups: {}", missing.join(", "))]
    MissingGroups { name: String, missing: Vec<String> },
}
