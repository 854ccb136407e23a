use crate::domain::model::{OffsetBox, Rect};
use crate::domain::selector::Selector;

/// 控制器對 DOM 的讀寫介面。
///
/// 所有查詢都回傳 `Option`/空集合：找不到目標時呼叫端只略過該子行為，不視為錯誤。
pub trait Page {
    type Node: Clone + PartialEq + std::fmt::Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &Selector) -> Vec<Self::Node>;
    fn query_within(&self, root: &Self::Node, selector: &Selector) -> Option<Self::Node>;
    fn closest(&self, node: &Self::Node, selector: &Selector) -> Option<Self::Node>;
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool);
    fn set_style_width(&mut self, node: &Self::Node, value: &str);

    fn offset_box(&self, node: &Self::Node) -> Option<OffsetBox>;
    fn bounding_rect(&self, node: &Self::Node) -> Option<Rect>;
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;

    /// 目前網址的片段（不含 `#`）
    fn location_fragment(&self) -> Option<String>;
    /// 平滑捲動，對齊區塊頂端
    fn scroll_into_view(&mut self, node: &Self::Node);
    fn push_history(&mut self, href: &str);

    fn input_value(&self, node: &Self::Node) -> Option<String>;
    fn set_text(&mut self, node: &Self::Node, text: &str);
    fn reset_form(&mut self, form: &Self::Node);
    fn open_url(&mut self, url: &str);
}

/// 模擬宿主用來推進捲動位置、視窗尺寸與表單輸入；瀏覽器裡由使用者操作完成
pub trait SimulationControl {
    fn set_scroll_y(&mut self, y: f64);
    fn set_viewport_height(&mut self, height: f64);
    /// 依 id 填入欄位值，找不到欄位時回傳 false
    fn set_input_value(&mut self, id: &str, value: &str) -> bool;
    /// 重排版面：移動元素（連同子孫）並改變高度，找不到元素時回傳 false
    fn set_geometry(&mut self, id: &str, top: f64, height: f64) -> bool;
}
