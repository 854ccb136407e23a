use crate::config::controller_config::SkillsConfig;
use crate::domain::model::SkillBar;
use crate::domain::ports::Page;
use serde::Serialize;
use std::fmt;

/// 一次檢查的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SkillCheck {
    AlreadyFilled,
    SectionMissing,
    NotVisible,
    Filled { bars: usize },
}

impl fmt::Display for SkillCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillCheck::AlreadyFilled => write!(f, "skills already filled"),
            SkillCheck::SectionMissing => write!(f, "skills section missing"),
            SkillCheck::NotVisible => write!(f, "skills section not visible"),
            SkillCheck::Filled { bars } => write!(f, "filled {} skill bars", bars),
        }
    }
}

/// 技能進度條：區段可見時一次寫入所有寬度，之後永遠不再執行
#[derive(Debug, Clone)]
pub struct SkillBars<N> {
    bars: Vec<SkillBar<N>>,
    filled: bool,
}

impl<N: Clone + PartialEq + std::fmt::Debug> SkillBars<N> {
    pub fn discover<P: Page<Node = N>>(page: &P, config: &SkillsConfig) -> Self {
        let bars: Vec<SkillBar<N>> = page
            .query_all(&config.percents)
            .into_iter()
            .filter_map(|percent| {
                let width = page
                    .attribute(&percent, &config.width_attribute)
                    .filter(|width| !width.trim().is_empty())?;
                let item = page.closest(&percent, &config.item)?;
                let fill = page.query_within(&item, &config.fill)?;
                Some(SkillBar { fill, width })
            })
            .collect();

        tracing::debug!("Found {} skill bars", bars.len());
        Self {
            bars,
            filled: false,
        }
    }

    pub fn check<P: Page<Node = N>>(&mut self, page: &mut P, config: &SkillsConfig) -> SkillCheck {
        if self.filled {
            return SkillCheck::AlreadyFilled;
        }

        let Some(section) = page.element_by_id(&config.section_id) else {
            tracing::trace!("No #{} section, skipping skill bars", config.section_id);
            return SkillCheck::SectionMissing;
        };
        let Some(rect) = page.bounding_rect(&section) else {
            return SkillCheck::SectionMissing;
        };

        if !rect.within_band(page.viewport_height(), config.margin_px) {
            return SkillCheck::NotVisible;
        }

        for bar in &self.bars {
            page.set_style_width(&bar.fill, &bar.style_width());
        }
        self.filled = true;

        tracing::info!("🎯 Skill bars animated ({} bars)", self.bars.len());
        SkillCheck::Filled {
            bars: self.bars.len(),
        }
    }

    pub fn filled(&self) -> bool {
        self.filled
    }

    pub fn bars(&self) -> &[SkillBar<N>] {
        &self.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SkillCheck::Filled { bars: 3 }.to_string(), "filled 3 skill bars");
        assert_eq!(SkillCheck::AlreadyFilled.to_string(), "skills already filled");
    }
}
