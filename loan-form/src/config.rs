/// Behaviour switches for the application form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Skip the ten-digit check when the phone number is left empty.
    ///
    /// Off by default: the check then rejects an empty phone number even
    /// though the field is optional.
    pub allow_empty_phone: bool,
    /// Where to navigate after a successful save.
    pub list_route: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            allow_empty_phone: false,
            list_route: "/".to_string(),
        }
    }
}
