use crate::config::controller_config::NavbarConfig;
use crate::domain::ports::Page;

/// 捲動超過門檻才算 scrolled；剛好等於門檻不算
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[derive(Debug, Clone)]
pub struct Navbar<N> {
    node: Option<N>,
    scrolled: bool,
}

impl<N: Clone + PartialEq + std::fmt::Debug> Navbar<N> {
    pub fn discover<P: Page<Node = N>>(page: &P, config: &NavbarConfig) -> Self {
        let node = config.ids.iter().find_map(|id| page.element_by_id(id));
        if node.is_none() {
            tracing::trace!("No navbar found (tried {:?})", config.ids);
        }
        Self {
            node,
            scrolled: false,
        }
    }

    pub fn apply<P: Page<Node = N>>(&mut self, page: &mut P, config: &NavbarConfig) {
        let scrolled = is_scrolled(page.scroll_y(), config.threshold_px);
        let Some(node) = &self.node else {
            return;
        };
        if scrolled != self.scrolled {
            tracing::debug!("Navbar scrolled state -> {}", scrolled);
        }
        page.set_class(node, &config.scrolled_class, scrolled);
        self.scrolled = scrolled;
    }

    pub fn is_present(&self) -> bool {
        self.node.is_some()
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }
}
