use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RenameCategoryRequest {
    pub old_name: String,
    pub new_name: String,
}
