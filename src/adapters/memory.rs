//! 記憶體中的頁面文件。
//!
//! 由 JSON 快照建立，實作 `Page` 讓模擬器與測試不需要瀏覽器。幾何模型很單純：
//! 每個節點有文件座標 `top` 與 `height`，外框即 `top - scroll_y`。
//! 副作用（寬度寫入、捲動請求、歷史紀錄、開啟的網址）都會被記錄下來供檢查。

use crate::domain::model::{OffsetBox, Rect};
use crate::domain::ports::{Page, SimulationControl};
use crate::domain::selector::{Selector, SelectorSubject};
use crate::utils::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

fn default_viewport_height() -> f64 {
    800.0
}

fn default_tag() -> String {
    "div".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default)]
    pub scroll_y: f64,
    /// 初始網址的片段，例如 "#about"
    #[serde(default)]
    pub location_hash: Option<String>,
    #[serde(default)]
    pub body: Vec<NodeSpec>,
}

impl Default for PageSnapshot {
    fn default() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            scroll_y: 0.0,
            location_hash: None,
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// 文件座標；省略時沿用父節點的 top
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            top: None,
            height: 0.0,
            value: None,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = Some(top);
        self.height = height;
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MemoryNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    top: f64,
    height: f64,
    value: Option<String>,
    initial_value: Option<String>,
    text: Option<String>,
    style_width: Option<String>,
    parent: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct MemoryPage {
    nodes: Vec<MemoryNode>,
    scroll_y: f64,
    viewport_height: f64,
    location_hash: Option<String>,
    history: Vec<String>,
    style_writes: usize,
    scroll_requests: Vec<NodeId>,
    opened_urls: Vec<String>,
}

struct NodeRef<'a> {
    page: &'a MemoryPage,
    index: usize,
}

impl SelectorSubject for NodeRef<'_> {
    fn tag(&self) -> &str {
        &self.page.nodes[self.index].tag
    }

    fn id(&self) -> Option<&str> {
        self.page.nodes[self.index].id.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        self.page.nodes[self.index].classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        let node = &self.page.nodes[self.index];
        match name {
            "id" => node.id.as_deref(),
            _ => node.attrs.get(name).map(String::as_str),
        }
    }

    fn parent(&self) -> Option<Self> {
        self.page.nodes[self.index].parent.map(|index| NodeRef {
            page: self.page,
            index,
        })
    }
}

impl MemoryPage {
    pub fn from_snapshot(snapshot: PageSnapshot) -> Result<Self> {
        if !(snapshot.viewport_height > 0.0) {
            return Err(FolioError::SnapshotError {
                message: format!(
                    "viewport_height must be positive, got {}",
                    snapshot.viewport_height
                ),
            });
        }

        let mut page = Self {
            nodes: vec![MemoryNode {
                tag: "body".to_string(),
                id: None,
                classes: Vec::new(),
                attrs: BTreeMap::new(),
                top: 0.0,
                height: 0.0,
                value: None,
                initial_value: None,
                text: None,
                style_width: None,
                parent: None,
            }],
            scroll_y: snapshot.scroll_y.max(0.0),
            viewport_height: snapshot.viewport_height,
            location_hash: snapshot.location_hash,
            history: Vec::new(),
            style_writes: 0,
            scroll_requests: Vec::new(),
            opened_urls: Vec::new(),
        };

        for spec in snapshot.body {
            page.insert(spec, 0)?;
        }

        page.nodes[0].height = page.document_height();

        tracing::debug!("Loaded page snapshot with {} nodes", page.nodes.len());
        Ok(page)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: PageSnapshot = serde_json::from_str(content)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn document_height(&self) -> f64 {
        self.nodes
            .iter()
            .skip(1)
            .map(|node| node.top + node.height)
            .fold(0.0, f64::max)
    }

    // 前序走訪：陣列索引即文件順序
    fn insert(&mut self, spec: NodeSpec, parent: usize) -> Result<()> {
        if spec.height < 0.0 {
            return Err(FolioError::SnapshotError {
                message: format!("node <{}> has negative height {}", spec.tag, spec.height),
            });
        }

        let index = self.nodes.len();
        let top = spec.top.unwrap_or(self.nodes[parent].top);
        self.nodes.push(MemoryNode {
            tag: spec.tag.to_ascii_lowercase(),
            id: spec.id,
            classes: spec.classes,
            attrs: spec.attrs,
            top,
            height: spec.height,
            initial_value: spec.value.clone(),
            value: spec.value,
            text: spec.text,
            style_width: None,
            parent: Some(parent),
        });

        for child in spec.children {
            self.insert(child, index)?;
        }
        Ok(())
    }

    fn subject(&self, index: usize) -> NodeRef<'_> {
        NodeRef { page: self, index }
    }

    fn is_descendant(&self, ancestor: usize, mut index: usize) -> bool {
        loop {
            if index == ancestor {
                return true;
            }
            match self.nodes[index].parent {
                Some(parent) => index = parent,
                None => return false,
            }
        }
    }

    fn get(&self, node: &NodeId) -> Option<&MemoryNode> {
        self.nodes.get(node.0)
    }

    pub fn node_id_of(&self, node: &NodeId) -> Option<&str> {
        self.get(node)?.id.as_deref()
    }

    pub fn class_of(&self, id: &str, class: &str) -> bool {
        self.element_by_id(id)
            .map(|node| self.has_class(&node, class))
            .unwrap_or(false)
    }

    pub fn style_width_of(&self, id: &str) -> Option<&str> {
        let node = self.element_by_id(id)?;
        self.get(&node)?.style_width.as_deref()
    }

    pub fn text_of(&self, id: &str) -> Option<&str> {
        let node = self.element_by_id(id)?;
        self.get(&node)?.text.as_deref()
    }

    pub fn value_of(&self, id: &str) -> Option<&str> {
        let node = self.element_by_id(id)?;
        self.get(&node)?.value.as_deref()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    pub fn scroll_requests(&self) -> &[NodeId] {
        &self.scroll_requests
    }

    pub fn opened_urls(&self) -> &[String] {
        &self.opened_urls
    }

    /// 文件總高度減去視窗高度
    pub fn max_scroll(&self) -> f64 {
        (self.nodes[0].height - self.viewport_height).max(0.0)
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&index| selector.matches(&self.subject(index)))
            .map(NodeId)
            .collect()
    }

    fn query_within(&self, root: &NodeId, selector: &Selector) -> Option<NodeId> {
        (root.0 + 1..self.nodes.len())
            .filter(|&index| self.is_descendant(root.0, index))
            .find(|&index| selector.matches(&self.subject(index)))
            .map(NodeId)
    }

    fn closest(&self, node: &NodeId, selector: &Selector) -> Option<NodeId> {
        let mut cursor = self.get(node).map(|_| node.0);
        while let Some(index) = cursor {
            if selector.matches(&self.subject(index)) {
                return Some(NodeId(index));
            }
            cursor = self.nodes[index].parent;
        }
        None
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        ancestor.0 < self.nodes.len()
            && node.0 < self.nodes.len()
            && self.is_descendant(ancestor.0, node.0)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get(node)?;
        self.subject(node.0).attribute(name).map(str::to_string)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.get(node)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_class(&mut self, node: &NodeId, class: &str, on: bool) {
        let Some(target) = self.nodes.get_mut(node.0) else {
            return;
        };
        let present = target.classes.iter().any(|c| c == class);
        if on && !present {
            target.classes.push(class.to_string());
        } else if !on && present {
            target.classes.retain(|c| c != class);
        }
    }

    fn set_style_width(&mut self, node: &NodeId, value: &str) {
        if let Some(target) = self.nodes.get_mut(node.0) {
            target.style_width = Some(value.to_string());
            self.style_writes += 1;
        }
    }

    fn offset_box(&self, node: &NodeId) -> Option<OffsetBox> {
        let node = self.get(node)?;
        Some(OffsetBox {
            top: node.top,
            height: node.height,
        })
    }

    fn bounding_rect(&self, node: &NodeId) -> Option<Rect> {
        let node = self.get(node)?;
        let top = node.top - self.scroll_y;
        Some(Rect {
            top,
            bottom: top + node.height,
        })
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn location_fragment(&self) -> Option<String> {
        self.location_hash
            .as_deref()
            .and_then(crate::domain::model::fragment_of)
    }

    fn scroll_into_view(&mut self, node: &NodeId) {
        let Some(target) = self.get(node) else {
            return;
        };
        self.scroll_y = target.top.clamp(0.0, self.max_scroll());
        self.scroll_requests.push(*node);
    }

    fn push_history(&mut self, href: &str) {
        self.location_hash = Some(href.to_string());
        self.history.push(href.to_string());
    }

    fn input_value(&self, node: &NodeId) -> Option<String> {
        self.get(node)?.value.clone()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if let Some(target) = self.nodes.get_mut(node.0) {
            target.text = Some(text.to_string());
        }
    }

    fn reset_form(&mut self, form: &NodeId) {
        if form.0 >= self.nodes.len() {
            return;
        }
        for index in form.0..self.nodes.len() {
            if self.is_descendant(form.0, index) {
                let node = &mut self.nodes[index];
                node.value = node.initial_value.clone();
            }
        }
    }

    fn open_url(&mut self, url: &str) {
        self.opened_urls.push(url.to_string());
    }
}

impl SimulationControl for MemoryPage {
    fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    fn set_viewport_height(&mut self, height: f64) {
        if height > 0.0 {
            self.viewport_height = height;
        }
    }

    fn set_input_value(&mut self, id: &str, value: &str) -> bool {
        match self.element_by_id(id) {
            Some(node) => {
                self.nodes[node.0].value = Some(value.to_string());
                true
            }
            None => false,
        }
    }

    fn set_geometry(&mut self, id: &str, top: f64, height: f64) -> bool {
        let Some(node) = self.element_by_id(id) else {
            return false;
        };
        let shift = top - self.nodes[node.0].top;
        for index in node.0..self.nodes.len() {
            if self.is_descendant(node.0, index) {
                self.nodes[index].top += shift;
            }
        }
        self.nodes[node.0].height = height;
        self.nodes[0].height = self.document_height();
        true
    }
}
