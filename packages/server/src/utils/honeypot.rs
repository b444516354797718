/// Honeypot spam detection for public forms.
///
/// The form renders a hidden input that humans never see or fill.
/// Automated submitters tend to populate every field, so a non-empty
/// value marks the submission as a bot. Flagged submissions are still
/// recorded (with `is_bot = true`) so the response gives bots no signal.
pub struct Honeypot {
    field: String,
}

impl Honeypot {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Check raw form fields for a filled honeypot.
    pub fn is_bot(&self, fields: &[(String, String)]) -> bool {
        fields
            .iter()
            .any(|(name, value)| *name == self.field && !value.trim().is_empty())
    }
}
