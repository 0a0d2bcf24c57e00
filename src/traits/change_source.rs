use async_trait::async_trait;
use crate::errors::PrNotesResult;
use crate::structs::change_page::ChangePage;

#[async_trait]
pub trait ChangeSource: Send + Sync {
    /// Fetches one page of merged changes. `None` starts at the first page.
    async fn fetch_page(&self, page_token: Option<&str>) -> PrNotesResult<ChangePage>;
}
