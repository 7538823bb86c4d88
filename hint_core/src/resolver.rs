//! `resolver`：把选中的候选变成一个宿主动作，并明确告知是否结束会话。

use crate::{
    key_event::Action,
    model::{Candidate, CandidateKind},
};

/// 执行结果对会话的影响。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 点击/跳转/切换：会话结束
    Terminal,
    /// 只是把焦点移到文本输入框：用户接下来要在框里打字
    NonTerminal,
}

/// 只看发现时判定的 `CandidateKind`，不再检查原始属性。
pub fn resolve(candidate: &Candidate) -> (Resolution, Action) {
    let element = candidate.element;
    match &candidate.kind {
        CandidateKind::ToggleInput => (Resolution::Terminal, Action::ToggleChecked(element)),
        CandidateKind::ButtonInput => (Resolution::Terminal, Action::Click(element)),
        CandidateKind::TextInput => (Resolution::NonTerminal, Action::Focus(element)),
        CandidateKind::Link {
            href: Some(href),
            script: false,
        } => (Resolution::Terminal, Action::Navigate(href.clone())),
        CandidateKind::Link { .. } => (Resolution::Terminal, Action::Click(element)),
        CandidateKind::Frame => (Resolution::Terminal, Action::Focus(element)),
    }
}
