//! 捲動驅動的 UI 控制器。
//!
//! 頁面掛載時建立一次，之後由宿主把 load / scroll / resize / click / submit 與計時器回呼
//! 逐一交給對應的方法。所有 class 變更都是冪等的；一次性閘門（技能條、淡入）設定後
//! 就不再重置，重複呼叫只會變成 no-op。

use crate::config::ControllerConfig;
use crate::core::contact::{self, SubmitOutcome};
use crate::core::menu::MobileMenu;
use crate::core::navbar::Navbar;
use crate::core::navigation;
use crate::core::reveal::Reveal;
use crate::core::scroll_spy::ScrollSpy;
use crate::core::skills::{SkillBars, SkillCheck};
use crate::domain::model::{ClickOutcome, ControllerSnapshot, Deferred, TimerTask};
use crate::domain::ports::Page;

pub struct ScrollUiController<N> {
    config: ControllerConfig,
    navbar: Navbar<N>,
    spy: ScrollSpy<N>,
    reveal: Reveal<N>,
    skills: SkillBars<N>,
    menu: MobileMenu<N>,
    anchors: Vec<N>,
    menu_open: bool,
    scroll_y: f64,
    loaded: bool,
}

impl<N: Clone + PartialEq + std::fmt::Debug> ScrollUiController<N> {
    /// 掃描頁面並綁定所有目標；缺少的目標只會停用對應的子行為
    pub fn attach<P: Page<Node = N>>(page: &P, config: ControllerConfig) -> Self {
        let navbar = Navbar::discover(page, &config.navbar);
        let spy = ScrollSpy::discover(page, &config.scroll_spy);
        let reveal = Reveal::discover(page, &config.reveal);
        let skills = SkillBars::discover(page, &config.skills);
        let menu = MobileMenu::discover(page, &config.menu);
        let anchors = page.query_all(&config.navigation.anchors);
        let menu_open = menu.is_open(page, &config.menu);

        tracing::info!(
            "🧭 Controller attached: navbar={}, sections={}, animatables={}, \
             skill bars={}, anchors={}",
            navbar.is_present(),
            spy.sections().len(),
            reveal.total(),
            skills.bars().len(),
            anchors.len()
        );

        Self {
            scroll_y: page.scroll_y(),
            config,
            navbar,
            spy,
            reveal,
            skills,
            menu,
            anchors,
            menu_open,
            loaded: false,
        }
    }

    /// 頁面可互動時呼叫一次，回傳需要宿主排程的延遲工作。
    /// 再次呼叫只會重新套用狀態，不會重複排程。
    pub fn on_load<P: Page<Node = N>>(&mut self, page: &mut P) -> Vec<Deferred> {
        self.refresh(page);
        let skills = self.skills.check(page, &self.config.skills);
        tracing::debug!("Initial skill check: {}", skills);

        if self.loaded {
            tracing::debug!("on_load called again, nothing rescheduled");
            return Vec::new();
        }
        self.loaded = true;

        let mut deferred = vec![Deferred::after_ms(
            self.config.reveal.hero_delay_ms,
            TimerTask::HeroReveal,
        )];
        deferred.extend(
            self.config
                .skills
                .recheck_delays_ms
                .iter()
                .map(|&ms| Deferred::after_ms(ms, TimerTask::SkillRecheck)),
        );
        if let Some(fragment) = page.location_fragment() {
            deferred.push(Deferred::after_ms(
                self.config.navigation.fragment_scroll_delay_ms,
                TimerTask::FragmentScroll { fragment },
            ));
        }
        deferred
    }

    pub fn on_scroll<P: Page<Node = N>>(&mut self, page: &mut P) -> SkillCheck {
        self.refresh(page);
        self.skills.check(page, &self.config.skills)
    }

    /// 只重新量測版面並更新 scroll-spy，不重跑一次性動畫
    pub fn on_resize<P: Page<Node = N>>(&mut self, page: &mut P) {
        self.scroll_y = page.scroll_y();
        self.spy.update(page, &self.config.scroll_spy);
    }

    pub fn on_timer<P: Page<Node = N>>(&mut self, page: &mut P, task: &TimerTask) {
        match task {
            TimerTask::HeroReveal => {
                let revealed = self.reveal.reveal_hero(page, &self.config.reveal);
                tracing::debug!("Hero entrance revealed {} elements", revealed);
            }
            TimerTask::SkillRecheck => {
                let result = self.skills.check(page, &self.config.skills);
                tracing::trace!("Deferred skill check: {}", result);
            }
            TimerTask::FragmentScroll { fragment } => {
                if navigation::scroll_to_fragment(page, fragment) {
                    tracing::debug!("Scrolled to initial fragment #{}", fragment);
                    self.after_programmatic_scroll(page);
                }
            }
        }
    }

    /// 頁內連結點擊：攔截後平滑捲動並寫入歷史紀錄
    pub fn on_anchor_click<P: Page<Node = N>>(&mut self, page: &mut P, href: &str) -> ClickOutcome {
        let Some(fragment) = navigation::in_page_fragment(href) else {
            return ClickOutcome::default();
        };

        if page.element_by_id(fragment).is_none() {
            tracing::trace!("Anchor {} has no target on this page", href);
            return ClickOutcome {
                prevent_default: true,
                navigated: false,
            };
        }

        if self.menu.close(page, &self.config.menu) {
            self.menu_open = false;
        }
        navigation::scroll_to_fragment(page, fragment);
        page.push_history(href);
        self.after_programmatic_scroll(page);
        tracing::debug!("Navigated to {}", href);

        ClickOutcome {
            prevent_default: true,
            navigated: true,
        }
    }

    /// 行動版選單開關；宿主需阻止這次點擊再傳到 document
    pub fn on_menu_toggle<P: Page<Node = N>>(&mut self, page: &mut P) -> Option<bool> {
        let open = self.menu.toggle(page, &self.config.menu)?;
        self.menu_open = open;
        Some(open)
    }

    pub fn on_document_click<P: Page<Node = N>>(&mut self, page: &mut P, target: Option<&N>) {
        if self
            .menu
            .close_on_outside_click(page, &self.config.menu, target)
        {
            self.menu_open = false;
        }
    }

    pub fn on_contact_submit<P: Page<Node = N>>(&mut self, page: &mut P) -> SubmitOutcome {
        contact::submit(page, &self.config.contact)
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            scroll_y: self.scroll_y,
            navbar_scrolled: self.navbar.scrolled(),
            active_section: self.spy.active().map(str::to_string),
            revealed: self.reveal.revealed(),
            animatable_total: self.reveal.total(),
            skills_filled: self.skills.filled(),
            menu_open: self.menu_open,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// 需要掛上點擊處理的頁內連結
    pub fn anchors(&self) -> &[N] {
        &self.anchors
    }

    pub fn menu_toggle(&self) -> Option<&N> {
        self.menu.toggle_node()
    }

    // 瀏覽器會為程式捲動補發 scroll 事件；這裡直接同步一次，重複執行無害
    fn after_programmatic_scroll<P: Page<Node = N>>(&mut self, page: &mut P) {
        self.refresh(page);
        self.skills.check(page, &self.config.skills);
    }

    fn refresh<P: Page<Node = N>>(&mut self, page: &mut P) {
        self.scroll_y = page.scroll_y();
        self.navbar.apply(page, &self.config.navbar);
        self.spy.update(page, &self.config.scroll_spy);
        self.reveal.update(page, &self.config.reveal);
    }
}
