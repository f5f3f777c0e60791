//! Pagination configuration.

use thiserror::Error;

/// Page size used when the caller does not request one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound a requested page size is clamped to.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Paging limits consumed by the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    default_page_size: u32,
    max_page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationConfigError {
    #[error("page sizes must be positive")]
    ZeroPageSize,

    #[error("default page size {default} exceeds maximum {max}")]
    DefaultExceedsMax { default: u32, max: u32 },
}

impl PaginationConfig {
    /// Builds a configuration with validated limits.
    ///
    /// # Errors
    ///
    /// Returns an error when either size is zero or the default exceeds the
    /// maximum.
    pub fn new(default_page_size: u32, max_page_size: u32) -> Result<Self, PaginationConfigError> {
        if default_page_size == 0 || max_page_size == 0 {
            return Err(PaginationConfigError::ZeroPageSize);
        }

        if default_page_size > max_page_size {
            return Err(PaginationConfigError::DefaultExceedsMax {
                default: default_page_size,
                max: max_page_size,
            });
        }

        Ok(Self {
            default_page_size,
            max_page_size,
        })
    }

    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    #[must_use]
    pub const fn max_page_size(&self) -> u32 {
        self.max_page_size
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}
