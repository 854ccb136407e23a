use crate::config::controller_config::RevealConfig;
use crate::domain::model::AnimatableElement;
use crate::domain::ports::Page;

/// 淡入動畫：元素進入觸發帶後加上 animated class，之後永不移除
#[derive(Debug, Clone)]
pub struct Reveal<N> {
    elements: Vec<AnimatableElement<N>>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> Reveal<N> {
    pub fn discover<P: Page<Node = N>>(page: &P, config: &RevealConfig) -> Self {
        let hero = page.query_all(&config.hero_elements);

        let mut elements: Vec<AnimatableElement<N>> = page
            .query_all(&config.elements)
            .into_iter()
            .map(|node| AnimatableElement {
                in_hero: hero.contains(&node),
                animated: page.has_class(&node, &config.animated_class),
                node,
            })
            .collect();

        // hero 選擇器不一定是 elements 的子集
        for node in hero {
            if !elements.iter().any(|element| element.node == node) {
                elements.push(AnimatableElement {
                    animated: page.has_class(&node, &config.animated_class),
                    node,
                    in_hero: true,
                });
            }
        }

        Self { elements }
    }

    /// 檢查所有尚未顯示的元素，回傳這次新顯示的數量
    pub fn update<P: Page<Node = N>>(&mut self, page: &mut P, config: &RevealConfig) -> usize {
        let viewport_height = page.viewport_height();
        let mut revealed = 0;

        for element in self.elements.iter_mut().filter(|element| !element.animated) {
            let Some(rect) = page.bounding_rect(&element.node) else {
                continue;
            };
            if rect.within_band(viewport_height, config.margin_px) {
                page.set_class(&element.node, &config.animated_class, true);
                element.animated = true;
                revealed += 1;
            }
        }

        if revealed > 0 {
            tracing::debug!("Revealed {} elements", revealed);
        }
        revealed
    }

    /// 進場效果：不看捲動位置，直接顯示 hero 區塊內的元素
    pub fn reveal_hero<P: Page<Node = N>>(&mut self, page: &mut P, config: &RevealConfig) -> usize {
        let mut revealed = 0;
        for element in self
            .elements
            .iter_mut()
            .filter(|element| element.in_hero && !element.animated)
        {
            page.set_class(&element.node, &config.animated_class, true);
            element.animated = true;
            revealed += 1;
        }
        revealed
    }

    pub fn revealed(&self) -> usize {
        self.elements.iter().filter(|element| element.animated).count()
    }

    pub fn total(&self) -> usize {
        self.elements.len()
    }
}
