mod common;

use common::portfolio_page;
use folio_ui::core::contact::{FieldError, SubmitOutcome};
use folio_ui::domain::model::{ClickOutcome, TimerTask};
use folio_ui::domain::ports::{Page, SimulationControl};
use folio_ui::{ControllerConfig, MemoryPage, NodeSpec, PageSnapshot, ScrollUiController};

fn attach(page: &MemoryPage) -> ScrollUiController<<MemoryPage as Page>::Node> {
    ScrollUiController::attach(page, ControllerConfig::default())
}

/// 測試頁內連結：攔截、平滑捲動、寫入歷史並更新 scroll-spy
#[test]
fn test_anchor_click_scrolls_and_pushes_history() {
    let mut page = portfolio_page();
    let mut controller = attach(&page);

    let outcome = controller.on_anchor_click(&mut page, "#resume");

    assert_eq!(
        outcome,
        ClickOutcome {
            prevent_default: true,
            navigated: true
        }
    );
    assert_eq!(page.scroll_y(), 1500.0);
    assert_eq!(page.history(), &["#resume".to_string()]);
    assert_eq!(controller.snapshot().active_section.as_deref(), Some("resume"));
    assert!(controller.snapshot().skills_filled);
}

/// 測試目標不存在的連結不會改變捲動位置或歷史紀錄
#[test]
fn test_anchor_click_missing_target() {
    let mut page = portfolio_page();
    page.set_scroll_y(250.0);
    let mut controller = attach(&page);

    let outcome = controller.on_anchor_click(&mut page, "#nowhere");

    assert!(outcome.prevent_default);
    assert!(!outcome.navigated);
    assert_eq!(page.scroll_y(), 250.0);
    assert!(page.history().is_empty());
    assert!(page.scroll_requests().is_empty());
}

/// 測試捲動目標受文件底部限制
#[test]
fn test_anchor_click_clamped_at_document_end() {
    let mut page = portfolio_page();
    let mut controller = attach(&page);

    controller.on_anchor_click(&mut page, "#contact");

    assert_eq!(page.scroll_y(), page.max_scroll());
    assert_eq!(page.scroll_y(), 2200.0);
    assert_eq!(controller.snapshot().active_section.as_deref(), Some("contact"));
}

/// 測試外部連結與單獨的 `#` 不被攔截
#[test]
fn test_non_fragment_links_pass_through() {
    let mut page = portfolio_page();
    let mut controller = attach(&page);

    assert_eq!(
        controller.on_anchor_click(&mut page, "https://github.com/someone"),
        ClickOutcome::default()
    );
    assert_eq!(controller.on_anchor_click(&mut page, "#"), ClickOutcome::default());
    assert!(page.history().is_empty());
}

/// 測試載入時網址帶有片段會在延遲後捲動過去，且不寫入歷史
#[test]
fn test_initial_fragment_scroll() {
    let mut snapshot = common::portfolio_snapshot();
    snapshot.location_hash = Some("#about".to_string());
    let mut page = MemoryPage::from_snapshot(snapshot).unwrap();
    let mut controller = attach(&page);

    let deferred = controller.on_load(&mut page);
    let fragment_task = deferred
        .iter()
        .find(|item| matches!(item.task, TimerTask::FragmentScroll { .. }))
        .expect("fragment scroll scheduled");
    assert_eq!(fragment_task.delay.as_millis(), 300);

    controller.on_timer(&mut page, &fragment_task.task);

    assert_eq!(page.scroll_y(), 800.0);
    assert!(page.history().is_empty());
    assert_eq!(controller.snapshot().active_section.as_deref(), Some("about"));
}

/// 測試行動版選單：開關、點擊外部關閉、點擊內部保持開啟
#[test]
fn test_mobile_menu_toggle_and_outside_click() {
    let mut page = portfolio_page();
    let mut controller = attach(&page);

    assert_eq!(controller.on_menu_toggle(&mut page), Some(true));
    let menu = page.query_all(&".nav-list".parse().unwrap())[0];
    assert!(page.has_class(&menu, "active"));

    let inside = page.element_by_id("link-about");
    controller.on_document_click(&mut page, inside.as_ref());
    assert!(controller.snapshot().menu_open);

    let toggle = page.element_by_id("navToggle");
    controller.on_document_click(&mut page, toggle.as_ref());
    assert!(controller.snapshot().menu_open);

    let outside = page.element_by_id("about-card");
    controller.on_document_click(&mut page, outside.as_ref());
    assert!(!controller.snapshot().menu_open);
    assert!(!page.has_class(&menu, "active"));

    assert_eq!(controller.on_menu_toggle(&mut page), Some(true));
    assert_eq!(controller.on_menu_toggle(&mut page), Some(false));
}

/// 測試點擊頁內連結時會順便關閉已開啟的選單
#[test]
fn test_anchor_click_closes_menu() {
    let mut page = portfolio_page();
    let mut controller = attach(&page);

    controller.on_menu_toggle(&mut page);
    controller.on_anchor_click(&mut page, "#about");

    assert!(!controller.snapshot().menu_open);
    assert_eq!(page.history(), &["#about".to_string()]);
}

/// 測試沒有選單標記的頁面：所有選單操作都是 no-op
#[test]
fn test_menu_absent() {
    let mut page = MemoryPage::from_snapshot(PageSnapshot {
        body: vec![NodeSpec::new("section").id("home").at(0.0, 800.0)],
        ..PageSnapshot::default()
    })
    .unwrap();
    let mut controller = attach(&page);

    assert_eq!(controller.on_menu_toggle(&mut page), None);
    controller.on_document_click(&mut page, None);
    assert!(!controller.snapshot().menu_open);
}

/// 測試聯絡表單驗證失敗時顯示錯誤且不開啟郵件程式
#[test]
fn test_contact_form_validation_feedback() {
    let mut page = portfolio_page();
    let mut controller = attach(&page);
    page.set_input_value("name", "Ada");
    page.set_input_value("email", "not-an-email");

    let outcome = controller.on_contact_submit(&mut page);

    assert_eq!(
        outcome,
        SubmitOutcome::Invalid {
            errors: vec![
                FieldError::InvalidEmail,
                FieldError::Missing { field: "message" }
            ]
        }
    );
    assert!(page.opened_urls().is_empty());
    assert!(page.class_of("formStatus", "form-error"));
    assert_eq!(
        page.text_of("formStatus"),
        Some("Please enter a valid email address. Please enter your message")
    );
    assert_eq!(page.value_of("name"), Some("Ada"));
}

/// 測試聯絡表單成功送出：開啟 mailto 連結並重設表單
#[test]
fn test_contact_form_opens_mail_client() {
    let mut page = portfolio_page();
    let mut config = ControllerConfig::default();
    config.contact.recipient = "owner@example.com".to_string();
    let mut controller = ScrollUiController::attach(&page, config);

    page.set_input_value("name", "Ada");
    page.set_input_value("email", "ada@example.com");
    page.set_input_value("subject", "Project idea");
    page.set_input_value("message", "Let's talk");

    let SubmitOutcome::Sent { url } = controller.on_contact_submit(&mut page) else {
        panic!("expected the form to be sent");
    };

    assert!(url.starts_with("mailto:owner@example.com?subject=Project%20idea&body=Let%27s%20talk"));
    assert_eq!(page.opened_urls(), &[url.clone()]);
    assert!(page.class_of("formStatus", "form-success"));
    assert!(!page.class_of("formStatus", "form-error"));
    assert_eq!(page.value_of("message"), Some(""));
}

/// 測試頁面沒有表單時略過送出
#[test]
fn test_contact_form_absent() {
    let mut page = common::page_without_resume();
    let mut config = ControllerConfig::default();
    config.contact.form_id = "missingForm".to_string();
    let mut controller = ScrollUiController::attach(&page, config);

    assert_eq!(controller.on_contact_submit(&mut page), SubmitOutcome::Skipped);
    assert!(page.opened_urls().is_empty());
}
