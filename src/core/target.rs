//! Target domain model

/// The identity a single pipeline run personalizes output for.
///
/// Supplied by the caller (batch driver or `run` command) and immutable for
/// the duration of a run. Presence of all three fields is a caller
/// responsibility; the pipeline does not validate them further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Company being applied to
    pub company: String,

    /// Name of the person receiving the email
    pub recipient_name: String,

    /// Address the email is delivered to
    pub recipient_email: String,
}

impl Target {
    pub fn new(
        company: impl Into<String>,
        recipient_name: impl Into<String>,
        recipient_email: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            recipient_name: recipient_name.into(),
            recipient_email: recipient_email.into(),
        }
    }
}
