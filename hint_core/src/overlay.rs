//! `overlay`：管理两个容器（徽章层、覆盖区域层）以及每个候选的可视节点。
//!
//! 只直接改会话自己创建的节点；页面元素从不被修改。

use tracing::trace;

use crate::{
    config::HintStyle,
    document::Document,
    model::{Candidate, NodeId},
};

/// 两个容器节点；`None` 表示尚未创建或已拆除。
#[derive(Debug, Clone, Default)]
pub struct OverlayLayer {
    labels: Option<NodeId>,
    regions: Option<NodeId>,
}

impl OverlayLayer {
    /// 创建两个容器并挂到 body（已存在时不重复创建）。
    pub fn mount(&mut self, document: &mut dyn Document) {
        if self.labels.is_none() {
            let node = document.create_container();
            document.attach_to_body(node);
            self.labels = Some(node);
        }
        if self.regions.is_none() {
            let node = document.create_container();
            document.attach_to_body(node);
            self.regions = Some(node);
        }
    }

    /// 把候选的徽章与覆盖区域挂到容器上；幂等。
    pub fn attach(&mut self, document: &mut dyn Document, candidate: &mut Candidate) {
        if candidate.attached {
            return;
        }
        self.mount(document);
        if let (Some(labels), Some(regions)) = (self.labels, self.regions) {
            document.append_child(labels, candidate.badge);
            document.append_child(regions, candidate.region);
            candidate.attached = true;
        }
    }

    /// 刷新徽章上的编号文字。
    pub fn show_label(&self, document: &mut dyn Document, candidate: &Candidate) {
        document.set_text(candidate.badge, &candidate.label.to_string());
    }

    /// 隐藏（不移除）候选的可视节点。
    pub fn hide(&self, document: &mut dyn Document, candidate: &Candidate) {
        trace!(element = candidate.element.0, "hiding candidate");
        document.set_visible(candidate.badge, false);
        document.set_visible(candidate.region, false);
    }

    pub fn set_normal(
        &self,
        document: &mut dyn Document,
        candidate: &Candidate,
        style: &HintStyle,
    ) {
        document.set_background(candidate.region, &style.normal_color);
    }

    pub fn set_focus(
        &self,
        document: &mut dyn Document,
        candidate: &Candidate,
        style: &HintStyle,
    ) {
        document.set_background(candidate.region, &style.focus_color);
    }

    /// 释放本次发现创建的徽章与覆盖区域，再移除两个容器；可重复调用。
    pub fn teardown(&mut self, document: &mut dyn Document, candidates: &[Candidate]) {
        for candidate in candidates {
            document.remove(candidate.badge);
            document.remove(candidate.region);
        }
        for node in [self.labels.take(), self.regions.take()].into_iter().flatten() {
            if !document.remove(node) {
                trace!(node = node.0, "container was not attached");
            }
        }
    }
}
