/// Number of pages needed for `count` items. Never less than 1, so an empty
/// table still shows "page 1 of 1".
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Slice out 1-indexed `page`. Pages outside `1..=total_pages` come back
/// empty; clamping is the caller's job.
pub fn paginate<T>(records: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = match (page - 1).checked_mul(page_size) {
        Some(start) if start < records.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(records.len());
    &records[start..end]
}

/// Pull a requested page back into `1..=total`.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up_with_floor_of_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn pages_slice_in_order() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 2, 10), &items[10..20]);
        assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, 2, 10).is_empty());
        assert!(paginate(&items, usize::MAX, 10).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
    }

    #[test]
    fn empty_input_first_page_is_empty() {
        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items, 1, 10).is_empty());
    }

    #[test]
    fn clamp_into_valid_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(5, 0), 1);
    }
}
