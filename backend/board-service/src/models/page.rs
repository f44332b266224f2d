use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 1_000;

/// Zero-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Builds a page request, rejecting sizes outside `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, size: u32) -> Result<Self, String> {
        if size == 0 {
            return Err("page size must be at least 1".to_string());
        }
        if size > MAX_PAGE_SIZE {
            return Err(format!("page size must not exceed {}", MAX_PAGE_SIZE));
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of documents that precede this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Listing mode: everything at once, or one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pageable {
    Unpaged,
    Paged(PageRequest),
}

impl Default for Pageable {
    fn default() -> Self {
        Pageable::Paged(PageRequest::default())
    }
}

impl From<PageRequest> for Pageable {
    fn from(request: PageRequest) -> Self {
        Pageable::Paged(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        let total_pages = total_elements.div_ceil(size);
        let page_number = request.page();

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            page_number,
            page_size: request.size(),
            total_elements,
            total_pages,
            first: page_number == 0,
            last: u64::from(page_number) + 1 >= total_pages,
        }
    }

    /// A single page holding the whole result set.
    pub fn unpaged(content: Vec<T>, total_elements: u64) -> Self {
        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            page_size: u32::try_from(content.len()).unwrap_or(u32::MAX),
            content,
            page_number: 0,
            total_elements,
            total_pages: 1,
            first: true,
            last: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_first_ten() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), 10);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(PageRequest::new(0, 0).is_err());
        assert!(PageRequest::new(0, MAX_PAGE_SIZE + 1).is_err());
        assert!(PageRequest::new(3, MAX_PAGE_SIZE).is_ok());
    }

    #[test]
    fn offset_does_not_overflow() {
        let request = PageRequest::new(u32::MAX, MAX_PAGE_SIZE).unwrap();
        assert_eq!(request.offset(), u64::from(u32::MAX) * 1_000);
    }

    #[test]
    fn page_metadata_for_middle_page() {
        let page = Page::new(vec![6, 7, 8, 9, 10], PageRequest::new(1, 5).unwrap(), 15);

        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 5);
        assert_eq!(page.total_elements, 15);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number_of_elements, 5);
        assert!(!page.first);
        assert!(!page.last);
    }

    #[test]
    fn empty_result_is_first_and_last() {
        let page: Page<u8> = Page::new(vec![], PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
        assert!(page.empty);
    }

    #[test]
    fn serializes_camel_case() {
        let page = Page::new(vec!["a"], PageRequest::new(0, 5).unwrap(), 1);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["pageNumber"], 0);
        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["content"][0], "a");
    }
}
