use serde::{Deserialize, Serialize};
use crate::structs::change_record::ChangeRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePage {
    pub items: Vec<ChangeRecord>,
    pub next_page_token: Option<String>,
    pub current_page: u32,
    pub page_size: u32,
}
