//! 瀏覽器 DOM 實作（`web` feature）。
//!
//! `install` 在頁面上建立唯一一個控制器，並把每個處理函式各註冊一次；
//! 重複呼叫不會重複掛上監聽器。

use crate::config::ControllerConfig;
use crate::core::controller::ScrollUiController;
use crate::domain::model::{Deferred, OffsetBox, Rect};
use crate::domain::ports::Page;
use crate::domain::selector::Selector;
use crate::utils::validation::Validate;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn collect(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl Page for WebPage {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &Selector) -> Vec<Element> {
        Self::collect(self.document.query_selector_all(&selector.to_string()))
    }

    fn query_within(&self, root: &Element, selector: &Selector) -> Option<Element> {
        root.query_selector(&selector.to_string()).ok().flatten()
    }

    fn closest(&self, node: &Element, selector: &Selector) -> Option<Element> {
        node.closest(&selector.to_string()).ok().flatten()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node))
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&mut self, node: &Element, class: &str, on: bool) {
        let _ = node.class_list().toggle_with_force(class, on);
    }

    fn set_style_width(&mut self, node: &Element, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property("width", value);
        }
    }

    fn offset_box(&self, node: &Element) -> Option<OffsetBox> {
        let element = node.dyn_ref::<HtmlElement>()?;
        Some(OffsetBox {
            top: f64::from(element.offset_top()),
            height: f64::from(element.offset_height()),
        })
    }

    fn bounding_rect(&self, node: &Element) -> Option<Rect> {
        let rect = node.get_bounding_client_rect();
        Some(Rect {
            top: rect.top(),
            bottom: rect.bottom(),
        })
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .or_else(|| {
                self.document
                    .document_element()
                    .map(|root| f64::from(root.client_height()))
            })
            .unwrap_or(0.0)
    }

    fn location_fragment(&self) -> Option<String> {
        let hash = self.window.location().hash().ok()?;
        crate::domain::model::fragment_of(&hash)
    }

    fn scroll_into_view(&mut self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn push_history(&mut self, href: &str) {
        if let Ok(history) = self.window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(href));
        }
    }

    fn input_value(&self, node: &Element) -> Option<String> {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        node.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn reset_form(&mut self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn open_url(&mut self, url: &str) {
        let _ = self.window.location().set_href(url);
    }
}

struct Shared {
    page: WebPage,
    controller: ScrollUiController<Element>,
}

type Handle = Rc<RefCell<Shared>>;

thread_local! {
    static ATTACHED: Cell<bool> = const { Cell::new(false) };
}

fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // 監聽器與頁面同生命週期
    closure.forget();
    Ok(())
}

fn schedule(window: &Window, handle: &Handle, deferred: Vec<Deferred>) {
    for item in deferred {
        let handle = handle.clone();
        let task = item.task;
        let callback = Closure::once_into_js(move || {
            if let Ok(mut shared) = handle.try_borrow_mut() {
                let Shared { page, controller } = &mut *shared;
                controller.on_timer(page, &task);
            }
        });
        let delay = i32::try_from(item.delay.as_millis()).unwrap_or(i32::MAX);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay,
        );
    }
}

fn load_already_fired(ready_state: &str) -> bool {
    ready_state == "complete"
}

fn run_load(window: &Window, handle: &Handle) {
    let deferred = match handle.try_borrow_mut() {
        Ok(mut shared) => {
            let Shared { page, controller } = &mut *shared;
            controller.on_load(page)
        }
        Err(_) => return,
    };
    schedule(window, handle, deferred);
}

/// 掛載控制器並註冊所有事件處理；同一頁面只會生效一次
pub fn install(config: ControllerConfig) -> Result<(), JsValue> {
    if ATTACHED.with(|attached| attached.replace(true)) {
        tracing::debug!("Controller already installed, skipping");
        return Ok(());
    }

    let page = WebPage::new().ok_or_else(|| JsValue::from_str("no window/document"))?;
    let window = page.window.clone();
    let document = page.document.clone();
    let controller = ScrollUiController::attach(&page, config);
    let anchors = controller.anchors().to_vec();
    let toggle = controller.menu_toggle().cloned();
    let form = document.get_element_by_id(&controller.config().contact.form_id);
    let handle: Handle = Rc::new(RefCell::new(Shared { page, controller }));

    // wasm 模組通常在 load 之後才實例化，這時 load 事件已經錯過了
    if load_already_fired(&document.ready_state()) {
        run_load(&window, &handle);
    } else {
        let handle = handle.clone();
        let timer_window = window.clone();
        listen(&window, "load", move |_| run_load(&timer_window, &handle))?;
    }

    {
        let handle = handle.clone();
        listen(&window, "scroll", move |_| {
            if let Ok(mut shared) = handle.try_borrow_mut() {
                let Shared { page, controller } = &mut *shared;
                controller.on_scroll(page);
            }
        })?;
    }

    {
        let handle = handle.clone();
        listen(&window, "resize", move |_| {
            if let Ok(mut shared) = handle.try_borrow_mut() {
                let Shared { page, controller } = &mut *shared;
                controller.on_resize(page);
            }
        })?;
    }

    for anchor in anchors {
        let handle = handle.clone();
        let href_source = anchor.clone();
        listen(&anchor, "click", move |event| {
            let Some(href) = href_source.get_attribute("href") else {
                return;
            };
            if let Ok(mut shared) = handle.try_borrow_mut() {
                let Shared { page, controller } = &mut *shared;
                if controller.on_anchor_click(page, &href).prevent_default {
                    event.prevent_default();
                }
            }
        })?;
    }

    if let Some(toggle) = toggle {
        let handle = handle.clone();
        listen(&toggle, "click", move |event| {
            event.stop_propagation();
            if let Ok(mut shared) = handle.try_borrow_mut() {
                let Shared { page, controller } = &mut *shared;
                controller.on_menu_toggle(page);
            }
        })?;
    }

    {
        let handle = handle.clone();
        listen(&document, "click", move |event| {
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok());
            if let Ok(mut shared) = handle.try_borrow_mut() {
                let Shared { page, controller } = &mut *shared;
                controller.on_document_click(page, target.as_ref());
            }
        })?;
    }

    if let Some(form) = form {
        let handle = handle.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            if let Ok(mut shared) = handle.try_borrow_mut() {
                let Shared { page, controller } = &mut *shared;
                controller.on_contact_submit(page);
            }
        })?;
    }

    Ok(())
}

/// wasm 入口：以預設標記契約掛載
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    install(ControllerConfig::default())
}

/// 以 TOML 設定掛載，例如頁面使用不同的 id 或 class
#[wasm_bindgen]
pub fn start_with_config(toml: &str) -> Result<(), JsValue> {
    let config = page_config(toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
    install(config)
}

// 不合法的 class 名稱會讓 classList 操作丟出例外，必須在掛載前擋下
fn page_config(toml: &str) -> crate::Result<ControllerConfig> {
    let config = ControllerConfig::from_toml_str(toml)?;
    config.validate()?;
    Ok(config)
}
