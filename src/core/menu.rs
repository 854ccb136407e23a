use crate::config::controller_config::MenuConfig;
use crate::domain::ports::Page;

/// 行動版選單；選單或開關任一不存在時所有操作都是 no-op
#[derive(Debug, Clone)]
pub struct MobileMenu<N> {
    menu: Option<N>,
    toggle: Option<N>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> MobileMenu<N> {
    pub fn discover<P: Page<Node = N>>(page: &P, config: &MenuConfig) -> Self {
        let menu = page.query_all(&config.menu).into_iter().next();
        let toggle = page.element_by_id(&config.toggle_id);
        if menu.is_none() || toggle.is_none() {
            tracing::trace!(
                "Mobile menu disabled (menu: {}, toggle: {})",
                menu.is_some(),
                toggle.is_some()
            );
        }
        Self { menu, toggle }
    }

    fn parts(&self) -> Option<(&N, &N)> {
        Some((self.menu.as_ref()?, self.toggle.as_ref()?))
    }

    pub fn is_open<P: Page<Node = N>>(&self, page: &P, config: &MenuConfig) -> bool {
        self.menu
            .as_ref()
            .map(|menu| page.has_class(menu, &config.open_class))
            .unwrap_or(false)
    }

    /// 回傳切換後的狀態
    pub fn toggle<P: Page<Node = N>>(&self, page: &mut P, config: &MenuConfig) -> Option<bool> {
        let (menu, _) = self.parts()?;
        let open = !page.has_class(menu, &config.open_class);
        page.set_class(menu, &config.open_class, open);
        tracing::debug!("Mobile menu {}", if open { "opened" } else { "closed" });
        Some(open)
    }

    pub fn close<P: Page<Node = N>>(&self, page: &mut P, config: &MenuConfig) -> bool {
        if !self.is_open(page, config) {
            return false;
        }
        let Some(menu) = &self.menu else {
            return false;
        };
        page.set_class(menu, &config.open_class, false);
        true
    }

    /// 點擊落在選單與開關之外時關閉選單；`target` 為 None 視為點在外面
    pub fn close_on_outside_click<P: Page<Node = N>>(
        &self,
        page: &mut P,
        config: &MenuConfig,
        target: Option<&N>,
    ) -> bool {
        let Some((menu, toggle)) = self.parts() else {
            return false;
        };
        if !page.has_class(menu, &config.open_class) {
            return false;
        }
        let inside = target
            .map(|target| page.contains(menu, target) || page.contains(toggle, target))
            .unwrap_or(false);
        if inside {
            return false;
        }
        page.set_class(menu, &config.open_class, false);
        tracing::debug!("Mobile menu closed by outside click");
        true
    }

    pub fn toggle_node(&self) -> Option<&N> {
        self.toggle.as_ref()
    }
}
