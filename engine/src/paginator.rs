use std::fmt;
use std::slice::Chunks;

/// One contiguous page of a paginated slice.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Restartable pagination over a borrowed slice. Every page but the
/// last holds exactly `page_size` items.
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
}

impl<'a, T> Paginator<'a, T> {
    pub fn iter(&self) -> Pages<'a, T> {
        Pages(self.items.chunks(self.page_size))
    }

    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }
}

impl<'a, T> IntoIterator for &Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Pages<'a, T>(Chunks<'a, T>);

impl<'a, T> Iterator for Pages<'a, T> {
    type Item = Page<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|items| Page { items })
    }
}

/// Split `items` into pages of at most `page_size` elements. A page
/// size of zero is treated as one.
pub fn paginate<T>(items: &[T], page_size: usize) -> Paginator<'_, T> {
    Paginator {
        items,
        page_size: page_size.max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_holds_the_remainder() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        let paginator = paginate(&items, 3);

        let sizes: Vec<usize> = paginator.iter().map(|page| page.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(paginator.page_count(), 3);

        let last = paginator.iter().last().unwrap();
        assert_eq!(last.items(), &[7]);
        assert!(!last.is_empty());
    }

    #[test]
    fn iteration_is_restartable() {
        let items = [1, 2, 3, 4];
        let paginator = paginate(&items, 2);

        assert_eq!(paginator.iter().count(), 2);
        assert_eq!(paginator.iter().count(), 2);
    }

    #[test]
    fn empty_input_has_no_pages() {
        let items: [i32; 0] = [];
        assert_eq!(paginate(&items, 3).iter().count(), 0);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let items = [1, 2];
        assert_eq!(paginate(&items, 0).page_count(), 2);
    }
}
