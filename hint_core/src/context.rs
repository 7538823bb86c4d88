//! `HintContext`：processor 链共享的唯一会话状态。
//!
//! 约定：
//! - `candidates`：会话开始时发现的全部候选（按 top 升序，决定编号顺序）
//! - `active`：仍匹配当前输入的候选下标（`candidates` 的子序列）
//! - `focused`：`active` 中当前高亮的位置
//! - `buffer`：已输入的文本（小写）；删除字符时从头重新发现并重放
use tracing::{debug, info};

use crate::{
    filter,
    key_event::Action,
    model::{Candidate, HintState, HintView, NodeId, Phase},
    overlay::OverlayLayer,
    processor::EngineFacade,
    resolver::{self, Resolution},
};

/// 会话状态；只在提示可见期间有内容，结束时全部清空。
#[derive(Debug, Clone, Default)]
pub struct HintContext {
    pub phase: Phase,
    pub candidates: Vec<Candidate>,
    pub active: Vec<usize>,
    pub focused: Option<usize>,
    pub buffer: String,
    /// 上一次输入切分出的 token（判断是否需要重放）
    tokens: Vec<String>,
    overlay: OverlayLayer,
}

impl HintContext {
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// 开始一次会话；已有会话时先取消再重新开始。
    pub fn start(&mut self, engine: &mut dyn EngineFacade) {
        if self.is_active() {
            info!("hint session already active; restarting");
            self.finish(engine, Phase::Cancelled);
        }
        let (document, _) = engine.surface();
        document.blur_active();
        self.phase = Phase::Active;
        self.populate(engine);
    }

    /// 重新发现候选并全部显示（编号从头分配，高亮第一个）。
    fn populate(&mut self, engine: &mut dyn EngineFacade) {
        self.candidates = engine.discover();
        self.active = (0..self.candidates.len()).collect();
        self.focused = None;
        if self.candidates.is_empty() {
            debug!("no hintable elements; session stays inert");
            return;
        }

        let (document, style) = engine.surface();
        self.overlay.mount(document);
        for candidate in self.candidates.iter_mut() {
            self.overlay.attach(document, candidate);
            self.overlay.show_label(document, candidate);
        }
        self.focused = Some(0);
        self.overlay.set_focus(document, &self.candidates[0], style);
    }

    /// 处理一次新的完整输入串。
    ///
    /// 输入变短、token 变少或不再以旧输入开头时，从头重新发现，
    /// 再把 `filter::replay` 算出的每一步依次落到界面上；
    /// 否则只用最后一个 token 继续过滤。
    pub fn update_input(&mut self, engine: &mut dyn EngineFacade, input: &str) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        let input = input.to_lowercase();
        let tokens = filter::tokenize(&input);
        let restart = input.len() < self.buffer.len()
            || tokens.len() < self.tokens.len()
            || !input.starts_with(&self.buffer);

        let mut actions = Vec::new();
        if restart {
            debug!(buffer = %input, "input shrank; rediscovering and replaying");
            let (document, _) = engine.surface();
            self.overlay.teardown(document, &self.candidates);
            self.populate(engine);
            let texts: Vec<&str> = self.candidates.iter().map(|c| c.text.as_str()).collect();
            for step in filter::replay(&texts, &input) {
                actions.extend(self.apply_step(engine, step));
                if !self.is_active() {
                    break;
                }
            }
        } else if let Some(last) = tokens.last() {
            actions = self.apply_token(engine, last);
        }

        if self.is_active() {
            self.buffer = input;
            self.tokens = tokens;
        }
        actions
    }

    /// 用一个 token 过滤当前 active 集合。
    fn apply_token(&mut self, engine: &mut dyn EngineFacade, token: &str) -> Vec<Action> {
        if token.is_empty() || !self.is_active() {
            return Vec::new();
        }
        let candidates = &self.candidates;
        let step = filter::narrow(&self.active, token, move |i| {
            (candidates[i].label, candidates[i].text.as_str())
        });
        self.apply_step(engine, step)
    }

    /// 把一步过滤结果落到界面：隐藏淘汰者，0 个取消、1 个执行，其余重新渲染。
    fn apply_step(&mut self, engine: &mut dyn EngineFacade, step: filter::Step) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        let (document, _) = engine.surface();
        for &i in &self.active {
            if step.active.binary_search(&i).is_err() {
                self.overlay.hide(document, &self.candidates[i]);
            }
        }
        debug!(
            token = %step.token,
            before = self.active.len(),
            after = step.active.len(),
            "narrowed hints"
        );
        self.active = step.active;

        let mut actions = Vec::new();
        match self.active.len() {
            0 => {
                debug!(token = %step.token, "no hint left; cancelling");
                self.finish(engine, Phase::Cancelled);
                return actions;
            }
            1 => {
                let (resolution, action) = resolver::resolve(&self.candidates[self.active[0]]);
                debug!(?action, ?resolution, "single hint left");
                actions.push(action);
                if resolution == Resolution::Terminal {
                    self.finish(engine, Phase::Resolved);
                    return actions;
                }
            }
            _ => {}
        }

        self.render(engine, &step.token, &step.relabels);
        actions
    }

    /// 刷新剩余候选：应用新编号，全部恢复普通色，再按词首规则挑选高亮。
    fn render(&mut self, engine: &mut dyn EngineFacade, token: &str, relabels: &[(usize, u32)]) {
        for &(i, label) in relabels {
            self.candidates[i].label = label;
        }

        let (document, style) = engine.surface();
        for &i in &self.active {
            let candidate = &mut self.candidates[i];
            self.overlay.attach(document, candidate);
            self.overlay.show_label(document, candidate);
            self.overlay.set_normal(document, candidate, style);
        }

        let texts = self.active.iter().map(|&i| self.candidates[i].text.as_str());
        let focus = filter::best_focus(texts, token).unwrap_or(0);
        self.focused = Some(focus);
        self.overlay
            .set_focus(document, &self.candidates[self.active[focus]], style);
    }

    pub fn focus_next(&mut self, engine: &mut dyn EngineFacade) {
        let len = self.active.len();
        if let Some(current) = self.focused {
            self.move_focus(engine, if current + 1 == len { 0 } else { current + 1 });
        }
    }

    pub fn focus_prev(&mut self, engine: &mut dyn EngineFacade) {
        let len = self.active.len();
        if let Some(current) = self.focused {
            self.move_focus(engine, if current == 0 { len - 1 } else { current - 1 });
        }
    }

    fn move_focus(&mut self, engine: &mut dyn EngineFacade, next: usize) {
        if !self.is_active() {
            return;
        }
        let Some(current) = self.focused else {
            return;
        };
        let (document, style) = engine.surface();
        self.overlay
            .set_normal(document, &self.candidates[self.active[current]], style);
        self.overlay
            .set_focus(document, &self.candidates[self.active[next]], style);
        self.focused = Some(next);
    }

    /// 对高亮候选执行动作并结束会话（不论 active 集合大小）。
    ///
    /// 没有任何候选的空会话直接取消。
    pub fn confirm(&mut self, engine: &mut dyn EngineFacade) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        let Some(focused) = self.focused else {
            self.finish(engine, Phase::Cancelled);
            return Vec::new();
        };
        let (_, action) = resolver::resolve(&self.candidates[self.active[focused]]);
        info!(?action, "hint confirmed");
        self.finish(engine, Phase::Resolved);
        vec![action]
    }

    /// 鼠标点击覆盖区域：总是对元素做一次合成点击，然后结束会话。
    pub fn click_region(&mut self, engine: &mut dyn EngineFacade, region: NodeId) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        let hit = self
            .active
            .iter()
            .map(|&i| &self.candidates[i])
            .find(|c| c.region == region)
            .map(|c| c.element);
        let Some(element) = hit else {
            return Vec::new();
        };
        info!(element = element.0, "overlay clicked");
        self.finish(engine, Phase::Resolved);
        vec![Action::Click(element)]
    }

    pub fn cancel(&mut self, engine: &mut dyn EngineFacade) {
        if self.is_active() {
            info!("hint session cancelled");
            self.finish(engine, Phase::Cancelled);
        }
    }

    /// 释放所有可视节点并清空状态；可重复调用。
    fn finish(&mut self, engine: &mut dyn EngineFacade, phase: Phase) {
        let (document, _) = engine.surface();
        self.overlay.teardown(document, &self.candidates);
        *self = Self {
            phase,
            ..Self::default()
        };
    }

    /// 生成宿主只读快照。
    pub fn state(&self) -> HintState {
        let hints = self
            .active
            .iter()
            .enumerate()
            .map(|(pos, &i)| {
                let c = &self.candidates[i];
                HintView {
                    label: c.label,
                    element: c.element,
                    region: c.region,
                    kind: c.kind.clone(),
                    focused: self.focused == Some(pos),
                }
            })
            .collect();
        HintState {
            phase: self.phase,
            buffer: self.buffer.clone(),
            hints,
        }
    }
}
