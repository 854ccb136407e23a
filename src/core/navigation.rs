use crate::domain::ports::Page;

/// 只攔截 `#something` 形式的頁內連結；`#` 本身與外部網址都交給瀏覽器
pub fn in_page_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|fragment| !fragment.is_empty())
}

/// 平滑捲動到目標元素；目標不存在時什麼都不做並回傳 false
pub fn scroll_to_fragment<P: Page>(page: &mut P, fragment: &str) -> bool {
    match page.element_by_id(fragment) {
        Some(target) => {
            page.scroll_into_view(&target);
            true
        }
        None => {
            tracing::trace!("No element #{} to scroll to", fragment);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_page_fragment() {
        assert_eq!(in_page_fragment("#about"), Some("about"));
        assert_eq!(in_page_fragment("#"), None);
        assert_eq!(in_page_fragment(""), None);
        assert_eq!(in_page_fragment("/blog#about"), None);
        assert_eq!(in_page_fragment("https://github.com"), None);
    }
}
