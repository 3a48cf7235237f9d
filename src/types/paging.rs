use serde::Deserialize;

/// Position within a paginated listing, present in `search`-style responses.
#[derive(Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page_index: u32,
    pub page_size: u32,
    pub total: u32,
}

impl Paging {
    /// Whether pages after this one exist.
    pub fn has_next(&self) -> bool {
        u64::from(self.page_index) * u64::from(self.page_size) < u64::from(self.total)
    }
}
