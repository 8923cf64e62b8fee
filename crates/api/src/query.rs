//! Query parameter types for the list endpoints.
//!
//! Each list endpoint takes `offset`, `limit` and one optional substring
//! filter. Values are validated here, before any repository call.

use serde::Deserialize;
use swapi_core::error::CoreError;
use swapi_core::filter;
use swapi_core::pagination::PageRequest;

/// `?offset=&limit=&name=` for characters and starships.
#[derive(Debug, Default, Deserialize)]
pub struct NameListParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub name: Option<String>,
}

impl NameListParams {
    pub fn page(&self) -> Result<PageRequest, CoreError> {
        PageRequest::from_query(self.offset, self.limit)
    }

    /// Trimmed name filter, if one was given.
    pub fn name(&self) -> Result<Option<String>, CoreError> {
        filter::normalize("name", self.name.as_deref())
    }
}

/// `?offset=&limit=&title=` for films.
#[derive(Debug, Default, Deserialize)]
pub struct TitleListParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub title: Option<String>,
}

impl TitleListParams {
    pub fn page(&self) -> Result<PageRequest, CoreError> {
        PageRequest::from_query(self.offset, self.limit)
    }

    /// Trimmed title filter, if one was given.
    pub fn title(&self) -> Result<Option<String>, CoreError> {
        filter::normalize("title", self.title.as_deref())
    }
}
