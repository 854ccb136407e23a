//! 單執行緒事件迴圈：一次只處理一個事件或計時器，處理完才接下一個，
//! 與瀏覽器的事件分派模型相同。計時器沒有取消機制，閘門已設定時自然變成 no-op。

use crate::app::script::{PageEvent, Script};
use crate::config::ControllerConfig;
use crate::core::controller::ScrollUiController;
use crate::core::contact::SubmitOutcome;
use crate::domain::model::{ControllerSnapshot, TimerTask};
use crate::domain::ports::{Page, SimulationControl};
use crate::utils::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

/// 每次分派後的控制器狀態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    pub at_ms: u64,
    pub trigger: String,
    pub scroll_y: f64,
    pub navbar_scrolled: bool,
    pub active_section: String,
    pub revealed: usize,
    pub skills_filled: bool,
    pub menu_open: bool,
    pub note: String,
}

#[derive(Debug)]
struct Pending {
    due: Instant,
    seq: u64,
    task: TimerTask,
}

pub struct LoopOutcome<P: Page> {
    pub page: P,
    pub snapshot: ControllerSnapshot,
    pub trace: Vec<TraceRow>,
}

pub struct EventLoop<P: Page> {
    page: P,
    controller: ScrollUiController<P::Node>,
    timers: Vec<Pending>,
    next_seq: u64,
    started: Instant,
    trace: Vec<TraceRow>,
}

impl<P: Page + SimulationControl> EventLoop<P> {
    pub fn new(page: P, config: ControllerConfig) -> Self {
        let controller = ScrollUiController::attach(&page, config);
        Self {
            page,
            controller,
            timers: Vec::new(),
            next_seq: 0,
            started: Instant::now(),
            trace: Vec::new(),
        }
    }

    /// 處理事件直到傳送端關閉，再依到期順序執行剩下的計時器
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<PageEvent>,
    ) -> Result<LoopOutcome<P>> {
        self.started = Instant::now();

        loop {
            let next_due = self.next_due();
            let wake_at = next_due.unwrap_or_else(Instant::now);
            tokio::select! {
                biased;
                _ = time::sleep_until(wake_at), if next_due.is_some() => {
                    if let Some(pending) = self.pop_earliest() {
                        self.fire(pending.task);
                    }
                }
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                }
            }
        }

        while let Some(pending) = self.pop_earliest() {
            time::sleep_until(pending.due).await;
            self.fire(pending.task);
        }

        tracing::debug!("Event loop finished after {} dispatches", self.trace.len());
        Ok(LoopOutcome {
            snapshot: self.controller.snapshot(),
            page: self.page,
            trace: self.trace,
        })
    }

    fn dispatch(&mut self, event: PageEvent) {
        let trigger = event.label();
        tracing::trace!("Dispatching {}", trigger);

        let note = match event {
            PageEvent::Load => {
                let deferred = self.controller.on_load(&mut self.page);
                let count = deferred.len();
                for item in deferred {
                    self.schedule(item.delay, item.task);
                }
                format!("scheduled {} timers", count)
            }
            PageEvent::Scroll { y } => {
                self.page.set_scroll_y(y);
                self.controller.on_scroll(&mut self.page).to_string()
            }
            PageEvent::Resize { viewport_height } => {
                self.page.set_viewport_height(viewport_height);
                self.controller.on_resize(&mut self.page);
                String::new()
            }
            PageEvent::AnchorClick { href } => {
                let outcome = self.controller.on_anchor_click(&mut self.page, &href);
                match (outcome.prevent_default, outcome.navigated) {
                    (_, true) => "navigated".to_string(),
                    (true, false) => "no target".to_string(),
                    (false, false) => "not intercepted".to_string(),
                }
            }
            PageEvent::MenuToggle => match self.controller.on_menu_toggle(&mut self.page) {
                Some(true) => "menu opened".to_string(),
                Some(false) => "menu closed".to_string(),
                None => "no menu".to_string(),
            },
            PageEvent::DocumentClick { target } => {
                let node = target.as_deref().and_then(|id| self.page.element_by_id(id));
                self.controller.on_document_click(&mut self.page, node.as_ref());
                String::new()
            }
            PageEvent::ContactSubmit { fields } => {
                for (id, value) in &fields {
                    if !self.page.set_input_value(id, value) {
                        tracing::warn!("No form field #{} to fill", id);
                    }
                }
                match self.controller.on_contact_submit(&mut self.page) {
                    SubmitOutcome::Skipped => "no contact form".to_string(),
                    SubmitOutcome::Invalid { errors } => format!("{} field errors", errors.len()),
                    SubmitOutcome::Sent { .. } => "mail client opened".to_string(),
                }
            }
        };

        self.record(trigger, note);
    }

    fn fire(&mut self, task: TimerTask) {
        let trigger = match &task {
            TimerTask::HeroReveal => "timer(hero_reveal)".to_string(),
            TimerTask::SkillRecheck => "timer(skill_recheck)".to_string(),
            TimerTask::FragmentScroll { fragment } => format!("timer(fragment #{})", fragment),
        };
        self.controller.on_timer(&mut self.page, &task);
        self.record(trigger, String::new());
    }

    fn schedule(&mut self, delay: Duration, task: TimerTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Pending {
            due: Instant::now() + delay,
            seq,
            task,
        });
    }

    fn next_due(&self) -> Option<Instant> {
        self.timers.iter().map(|pending| pending.due).min()
    }

    // 同一時間到期的計時器依排程順序執行
    fn pop_earliest(&mut self) -> Option<Pending> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, pending)| (pending.due, pending.seq))
            .map(|(index, _)| index)?;
        Some(self.timers.remove(index))
    }

    fn record(&mut self, trigger: String, note: String) {
        let snapshot = self.controller.snapshot();
        self.trace.push(TraceRow {
            at_ms: self.started.elapsed().as_millis() as u64,
            trigger,
            scroll_y: snapshot.scroll_y,
            navbar_scrolled: snapshot.navbar_scrolled,
            active_section: snapshot.active_section.unwrap_or_default(),
            revealed: snapshot.revealed,
            skills_filled: snapshot.skills_filled,
            menu_open: snapshot.menu_open,
            note,
        });
    }
}

/// 依腳本時間把事件送進迴圈；回傳時傳送端被丟棄，迴圈隨之收尾
pub async fn replay(script: &Script, events: mpsc::UnboundedSender<PageEvent>) -> Result<()> {
    let start = Instant::now();
    for step in &script.steps {
        time::sleep_until(start + Duration::from_millis(step.at_ms)).await;
        events
            .send(step.event.clone())
            .map_err(|_| FolioError::EventLoopError {
                message: "event loop closed before the script finished".to_string(),
            })?;
    }
    Ok(())
}

/// 在目前的 runtime 上重播整份腳本
pub async fn simulate<P: Page + SimulationControl>(
    page: P,
    config: ControllerConfig,
    script: &Script,
) -> Result<LoopOutcome<P>> {
    let (sender, receiver) = mpsc::unbounded_channel();
    let event_loop = EventLoop::new(page, config);
    let (outcome, replayed) = tokio::join!(event_loop.run(receiver), replay(script, sender));
    replayed?;
    outcome
}

/// 以暫停的虛擬時鐘執行模擬，結果與實際耗時無關
pub fn simulate_blocking<P: Page + SimulationControl>(
    page: P,
    config: ControllerConfig,
    script: &Script,
) -> Result<LoopOutcome<P>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()?;
    runtime.block_on(simulate(page, config, script))
}
