use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gravatar_url: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
}

impl Author {
    /// Name for display, falling back to the email and then to "unknown".
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}

/// Keeps the first author seen for each email, preserving order.
pub fn unique_by_email<'a, I>(authors: I) -> Vec<&'a Author>
where
    I: IntoIterator<Item = &'a Author>,
{
    let mut unique: Vec<&Author> = Vec::new();
    for author in authors {
        if !unique.iter().any(|a| a.email == author.email) {
            unique.push(author);
        }
    }
    unique
}
