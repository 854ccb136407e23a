//! Scroll-spy：依目前捲動位置找出所在區段，並標記對應的導覽連結。

use crate::config::controller_config::ScrollSpyConfig;
use crate::domain::model::{NavLink, SectionAnchor};
use crate::domain::ports::Page;

/// 區段換算後的觸發範圍 `[top, bottom)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpyBand<'a> {
    pub id: &'a str,
    pub top: f64,
    pub bottom: f64,
}

impl<'a> SpyBand<'a> {
    pub fn from_anchor<N>(anchor: &'a SectionAnchor<N>, offset: f64) -> Self {
        let top = anchor.top - offset;
        Self {
            id: &anchor.id,
            top,
            bottom: top + anchor.height,
        }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.bottom
    }
}

/// 依文件順序掃描，後面符合的區段覆蓋前面的
pub fn select_active<'a, I>(bands: I, position: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = SpyBand<'a>>,
{
    bands
        .into_iter()
        .filter(|band| band.contains(position))
        .last()
        .map(|band| band.id)
}

#[derive(Debug, Clone)]
pub struct ScrollSpy<N> {
    sections: Vec<SectionAnchor<N>>,
    links: Vec<NavLink<N>>,
    active: Option<String>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> ScrollSpy<N> {
    pub fn discover<P: Page<Node = N>>(page: &P, config: &ScrollSpyConfig) -> Self {
        let sections: Vec<SectionAnchor<N>> = page
            .query_all(&config.sections)
            .into_iter()
            .filter_map(|node| {
                let id = page.attribute(&node, "id").filter(|id| !id.is_empty())?;
                let geometry = page.offset_box(&node)?;
                Some(SectionAnchor {
                    node,
                    id,
                    top: geometry.top,
                    height: geometry.height,
                })
            })
            .collect();

        let links: Vec<NavLink<N>> = page
            .query_all(&config.links)
            .into_iter()
            .map(|node| {
                let href = page.attribute(&node, "href");
                NavLink::new(node, href.as_deref())
            })
            .collect();

        tracing::debug!(
            "Scroll-spy tracking {} sections and {} links",
            sections.len(),
            links.len()
        );

        Self {
            sections,
            links,
            active: None,
        }
    }

    /// 重新量測區段位置（版面可能因 resize 或字型載入而改變）
    pub fn measure<P: Page<Node = N>>(&mut self, page: &P) {
        for section in &mut self.sections {
            if let Some(geometry) = page.offset_box(&section.node) {
                section.top = geometry.top;
                section.height = geometry.height;
            }
        }
    }

    pub fn update<P: Page<Node = N>>(&mut self, page: &mut P, config: &ScrollSpyConfig) {
        self.measure(page);

        let position = page.scroll_y() + config.offset_px;
        let active = select_active(
            self.sections
                .iter()
                .map(|section| SpyBand::from_anchor(section, config.offset_px)),
            position,
        )
        .map(str::to_string);

        if active != self.active {
            tracing::debug!("Active section: {:?} -> {:?}", self.active, active);
        }

        for link in &mut self.links {
            // 只接受完全相同的片段，`#resumes` 不會被 `resume` 點亮
            let is_active = matches!((&link.fragment, &active), (Some(f), Some(a)) if f == a);
            page.set_class(&link.node, &config.active_class, is_active);
            link.active = is_active;
        }

        self.active = active;
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn sections(&self) -> &[SectionAnchor<N>] {
        &self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> Vec<SpyBand<'static>> {
        vec![
            SpyBand {
                id: "A",
                top: 0.0,
                bottom: 100.0,
            },
            SpyBand {
                id: "B",
                top: 100.0,
                bottom: 250.0,
            },
            SpyBand {
                id: "C",
                top: 250.0,
                bottom: 400.0,
            },
        ]
    }

    #[test]
    fn test_stacked_sections() {
        assert_eq!(select_active(bands(), 50.0), Some("A"));
        assert_eq!(select_active(bands(), 150.0), Some("B"));
        assert_eq!(select_active(bands(), 300.0), Some("C"));
        assert_eq!(select_active(bands(), 500.0), None);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(select_active(bands(), 0.0), Some("A"));
        assert_eq!(select_active(bands(), 100.0), Some("B"));
        assert_eq!(select_active(bands(), 400.0), None);
        assert_eq!(select_active(bands(), -1.0), None);
    }

    #[test]
    fn test_later_section_wins_on_overlap() {
        let overlapping = vec![
            SpyBand {
                id: "outer",
                top: 0.0,
                bottom: 500.0,
            },
            SpyBand {
                id: "inner",
                top: 100.0,
                bottom: 200.0,
            },
        ];
        assert_eq!(select_active(overlapping.clone(), 150.0), Some("inner"));
        assert_eq!(select_active(overlapping, 300.0), Some("outer"));
    }

    #[test]
    fn test_band_from_anchor_applies_offset() {
        let anchor = SectionAnchor {
            node: 0usize,
            id: "about".to_string(),
            top: 700.0,
            height: 500.0,
        };
        let band = SpyBand::from_anchor(&anchor, 120.0);
        assert_eq!(band.top, 580.0);
        assert_eq!(band.bottom, 1080.0);
    }
}
