//! 送信中リクエストの保持
//!
//! 中断用の AbortController を送信チケットと組で持つ。
//! 完了通知は自分のチケットのときだけ枠を空ける

use caption_form_common::SubmitTicket;
use web_sys::AbortController;

#[derive(Debug, Default)]
pub struct InflightRequest {
    current: Option<(SubmitTicket, AbortController)>,
}

impl InflightRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信開始。前のリクエストが残っていれば中断する
    pub fn start(&mut self, ticket: SubmitTicket, controller: AbortController) {
        if let Some((previous, controller)) = self.current.replace((ticket, controller)) {
            log::debug!("{} replaced by {}", previous, ticket);
            controller.abort();
        }
    }

    /// 送信完了
    pub fn settle(&mut self, ticket: SubmitTicket) -> bool {
        match &self.current {
            Some((current, _)) if *current == ticket => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// 新しい選択による中断
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some((ticket, controller)) => {
                log::debug!("aborting {}", ticket);
                controller.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
