//! Pagination policy / 分页策略
//!
//! Both listing endpoints share this logic; they differ only in the name of
//! the size parameter (`size` vs `pageSize`), so the policy takes the field
//! name and reports it back in validation errors.

use crate::error::ApiError;

/// Default results per page / 默认每页数量
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Maximum results per page / 每页数量上限
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request / 校验后的分页请求
///
/// `page` is 1-indexed; `size` is within [1, 100]. Construction goes through
/// [`PageRequest::resolve`] so invalid values never exist past the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Validate raw page/size parameters / 校验原始分页参数
    ///
    /// Absent or empty parameters fall back to page=1, size=20. Out-of-bounds
    /// or non-integer values are client errors, never clamped.
    pub fn resolve(
        page: Option<&str>,
        size: Option<&str>,
        size_field: &'static str,
    ) -> Result<Self, ApiError> {
        let page = match page.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<u32>().map_err(|_| ApiError::InvalidPage)?,
            None => 1,
        };
        if page < 1 {
            return Err(ApiError::InvalidPage);
        }

        let size = match size.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| ApiError::InvalidSize { field: size_field })?,
            None => DEFAULT_PAGE_SIZE,
        };
        if size < 1 || size > MAX_PAGE_SIZE {
            return Err(ApiError::InvalidSize { field: size_field });
        }

        Ok(Self { page, size })
    }

    /// Offset the backend skips to / 后端跳过的偏移量
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.size as u64
    }

    /// Page count for a total / 总页数
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.size as u64)
    }

    /// Whether pages remain after this one / 是否还有后续页
    pub fn has_more(&self, total: u64) -> bool {
        (self.page as u64) < self.total_pages(total)
    }
}
