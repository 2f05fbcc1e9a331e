//! Pagination helpers for listing endpoints.

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane values and convert to SeaORM's 0-based page index.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, 50);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: 20 }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn zero_inputs_become_first_page() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn per_page_is_capped() {
        let (idx, per) = Pagination { page: 3, per_page: 500 }.normalize();
        assert_eq!(idx, 2);
        assert_eq!(per, 50);
    }
}
