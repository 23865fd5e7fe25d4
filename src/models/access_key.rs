use serde::{Deserialize, Serialize};

/// A credential record tied to one login. `key` is secret material and is
/// only ever displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeyListResponse {
    pub access_keys: Vec<AccessKey>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeyResponse {
    pub access_key: AccessKey,
}

#[derive(Debug, Serialize)]
pub struct AccessKeyCreateRequest<'a> {
    pub name: &'a str,
}
