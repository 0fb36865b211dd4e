use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Default for UserProfile {
    fn default() -> UserProfile {
        UserProfile {
            name: "Jane Doe".to_string(),
            role: "Freelance Photographer".to_string(),
            avatar_url: None,
        }
    }
}
