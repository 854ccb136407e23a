#![allow(dead_code)]

use folio_ui::{MemoryPage, NodeSpec, PageSnapshot};

fn link(href: &str) -> NodeSpec {
    NodeSpec::new("a").class("nav-link").attr("href", href)
}

fn skill(fill_id: &str, width: Option<&str>) -> NodeSpec {
    let percent = match width {
        Some(width) => NodeSpec::new("span").class("skill-percent").attr("data-width", width),
        None => NodeSpec::new("span").class("skill-percent"),
    };
    NodeSpec::new("div")
        .class("skill-bar-item")
        .child(percent)
        .child(
            NodeSpec::new("div")
                .class("progress-bar")
                .child(NodeSpec::new("div").id(fill_id).class("progress-fill")),
        )
}

pub fn navbar() -> NodeSpec {
    NodeSpec::new("nav")
        .id("mainNav")
        .at(0.0, 70.0)
        .child(NodeSpec::new("a").class("nav-logo").attr("href", "#home"))
        .child(
            NodeSpec::new("ul")
                .class("nav-list")
                .child(link("#home"))
                .child(link("#about").id("link-about"))
                .child(link("#resume"))
                .child(link("#resumes"))
                .child(link("#contact")),
        )
        .child(NodeSpec::new("button").id("navToggle"))
}

pub fn hero() -> NodeSpec {
    NodeSpec::new("section")
        .id("home")
        .class("hero")
        .at(0.0, 800.0)
        .child(NodeSpec::new("h1").id("hero-title").attr("data-animate", "").at(200.0, 100.0))
        .child(NodeSpec::new("p").id("hero-tagline").attr("data-animate", "").at(320.0, 50.0))
}

pub fn about() -> NodeSpec {
    NodeSpec::new("section")
        .id("about")
        .at(800.0, 700.0)
        .child(NodeSpec::new("div").id("about-card").attr("data-animate", "").at(900.0, 200.0))
        .child(NodeSpec::new("div").id("about-stats").attr("data-animate", "").at(1300.0, 150.0))
}

pub fn resume() -> NodeSpec {
    NodeSpec::new("section")
        .id("resume")
        .at(1500.0, 900.0)
        .child(skill("fill-rust", Some("85")).at(1600.0, 40.0))
        .child(skill("fill-ts", Some("70")).at(1650.0, 40.0))
        .child(skill("fill-none", None).at(1700.0, 40.0))
}

pub fn contact() -> NodeSpec {
    NodeSpec::new("section").id("contact").at(2400.0, 600.0).child(
        NodeSpec::new("form")
            .id("contactForm")
            .child(NodeSpec::new("input").id("name").value(""))
            .child(NodeSpec::new("input").id("email").value(""))
            .child(NodeSpec::new("input").id("subject").value(""))
            .child(NodeSpec::new("textarea").id("message").value(""))
            .child(NodeSpec::new("p").id("formStatus").class("form-status")),
    )
}

/// 視窗 800px、文件高 3000px 的作品集頁面
pub fn portfolio_snapshot() -> PageSnapshot {
    PageSnapshot {
        viewport_height: 800.0,
        scroll_y: 0.0,
        location_hash: None,
        body: vec![navbar(), hero(), about(), resume(), contact()],
    }
}

pub fn portfolio_page() -> MemoryPage {
    MemoryPage::from_snapshot(portfolio_snapshot()).expect("valid snapshot")
}

pub fn page_without_resume() -> MemoryPage {
    MemoryPage::from_snapshot(PageSnapshot {
        body: vec![navbar(), hero(), about(), contact()],
        ..portfolio_snapshot()
    })
    .expect("valid snapshot")
}
