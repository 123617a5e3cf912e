/// Table names used by the Postgres repositories.
///
/// Names are interpolated into SQL text, so `validate` must pass before any
/// repository is constructed from untrusted configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub users: String,
    pub adverts: String,
    pub images: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            users: "users".to_string(),
            adverts: "adverts".to_string(),
            images: "images".to_string(),
        }
    }
}

impl TableNames {
    /// True when the names match the schema created by the bundled migrations
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        for (var, name) in [
            ("USERS_TABLE", &self.users),
            ("ADVERTS_TABLE", &self.adverts),
            ("IMAGES_TABLE", &self.images),
        ] {
            if !is_identifier(name) {
                return Err(format!(
                    "{var} must be a plain SQL identifier (letters, digits, underscore), got '{name}'"
                ));
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
