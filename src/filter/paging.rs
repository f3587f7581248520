/// Skip/limit window for 1-indexed pages. Page 0 is clamped to the first
/// window rather than underflowing.
pub fn window(page: u64, page_size: u64) -> (u64, i64) {
    let skip = page.saturating_sub(1) * page_size;
    (skip, page_size as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(window(1, 9), (0, 9));
    }

    #[test]
    fn later_pages_skip_full_windows() {
        assert_eq!(window(2, 9), (9, 9));
        assert_eq!(window(5, 9), (36, 9));
        assert_eq!(window(3, 10), (20, 10));
    }

    #[test]
    fn page_zero_is_clamped() {
        assert_eq!(window(0, 9), (0, 9));
    }

    #[test]
    fn windows_are_contiguous_and_non_overlapping() {
        let page_size = 9;
        let mut expected_start = 0;
        for page in 1..=20u64 {
            let (skip, limit) = window(page, page_size);
            assert_eq!(skip, expected_start);
            expected_start = skip + limit as u64;
        }
    }
}
