use stockroom_core::FieldErrors;

/// Maximum length (in characters) of catalog names.
pub const MAX_NAME_LEN: usize = 100;

/// Trim a name and record field errors if it is blank or too long.
pub(crate) fn check_name(field: &str, raw: &str, errors: &mut FieldErrors) -> String {
    let name = raw.trim();
    if name.is_empty() {
        errors.add(field, "this field may not be blank");
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.add(
            field,
            format!("ensure this field has no more than {MAX_NAME_LEN} characters"),
        );
    }
    name.to_string()
}
