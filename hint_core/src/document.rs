use crate::model::{ComputedStyle, ElementId, ElementInfo, NodeId, Viewport};

/// 可视节点的角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualRole {
    /// 编号徽章
    Badge,
    /// 可点击的覆盖区域
    Region,
}

/// 创建一个绝对定位可视节点所需的全部样式。
///
/// 坐标已经加上滚动偏移，是文档坐标。
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub role: VisualRole,
    pub left: f64,
    pub top: f64,
    /// 覆盖区域才有宽高；徽章随文字撑开
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub font: Option<String>,
    pub color: Option<String>,
    pub background: String,
    pub opacity: f64,
    pub border: String,
    pub z_index: i32,
}

/// 宿主文档抽象：core 不关心背后是真实 DOM、测试桩还是 CLI 里的内存页面。
///
/// 约定：
/// - 页面元素（`ElementId`）只读；对它们的修改通过 `key_event::Action` 交给宿主
/// - 可视节点（`NodeId`）由会话创建并独占，可以直接改样式
/// - `remove` 之后节点句柄失效；对已移除的节点必须是 no-op
pub trait Document {
    /// 查询所有交互元素（a/area/textarea/select/link/非 hidden input/button/frame/iframe）。
    fn query_candidates(&self) -> Vec<ElementInfo>;

    /// 计算样式（visibility/display）。
    fn computed_style(&self, element: ElementId) -> ComputedStyle;

    /// 当前视口尺寸与滚动偏移。
    fn viewport(&self) -> Viewport;

    /// 让当前获得焦点的元素失焦（会话开始时调用）。
    fn blur_active(&mut self);

    /// 创建一个空容器（尚未挂到 body）。
    fn create_container(&mut self) -> NodeId;

    /// 按 `visual` 创建一个可视节点（尚未挂载）。
    fn create_visual(&mut self, visual: &Visual) -> NodeId;

    /// 把 `child` 追加到 `parent` 下。
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    fn set_text(&mut self, node: NodeId, text: &str);

    fn set_background(&mut self, node: NodeId, color: &str);

    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// 把容器挂到 body 上。
    fn attach_to_body(&mut self, node: NodeId);

    /// 从文档中移除并释放节点；返回它之前是否处于挂载状态。
    fn remove(&mut self, node: NodeId) -> bool;
}
