/// 页面元素句柄（由宿主分配；会话只引用，不拥有）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// 会话创建的可视节点句柄（标签、覆盖区域、容器）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// 视口坐标系下的包围盒。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// 视口尺寸与滚动偏移。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// 计算样式中与可见性相关的两项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub visibility: String,
    pub display: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            visibility: "visible".to_string(),
            display: "inline".to_string(),
        }
    }
}

/// 宿主查询返回的原始元素描述。
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    pub id: ElementId,
    /// 小写标签名（`a`、`input`、`iframe` ...）
    pub tag: String,
    /// `type` 属性（可能为空）
    pub input_type: String,
    /// 可导航目标（`href`）
    pub href: Option<String>,
    /// 元素文本内容
    pub text: String,
    /// `getBoundingClientRect()`；元素未渲染时为 `None`
    pub rect: Option<Rect>,
    /// `getClientRects()` 是否非空
    pub has_client_rects: bool,
}

/// 候选的种类：发现时一次性判定，之后 resolver 只看这个标签。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateKind {
    /// 链接类元素；`script` 表示只能合成点击（`javascript:` 或 type=button）
    Link { href: Option<String>, script: bool },
    /// 文本输入（含 textarea/select）：只移动焦点
    TextInput,
    /// checkbox/radio
    ToggleInput,
    /// submit/reset/button 类控件
    ButtonInput,
    /// frame/iframe
    Frame,
}

impl CandidateKind {
    pub fn classify(info: &ElementInfo) -> Self {
        let ty = info.input_type.to_ascii_lowercase();
        match info.tag.to_ascii_lowercase().as_str() {
            "input" | "textarea" => match ty.as_str() {
                "checkbox" | "radio" => CandidateKind::ToggleInput,
                "submit" | "reset" | "button" => CandidateKind::ButtonInput,
                _ => CandidateKind::TextInput,
            },
            "select" => CandidateKind::TextInput,
            "button" => CandidateKind::ButtonInput,
            "frame" | "iframe" => CandidateKind::Frame,
            _ => {
                let script = info
                    .href
                    .as_deref()
                    .is_some_and(|h| h.trim_start().to_ascii_lowercase().starts_with("javascript:"))
                    || ty == "button";
                CandidateKind::Link {
                    href: info.href.clone(),
                    script,
                }
            }
        }
    }
}

/// 一个可被提示的页面元素。
///
/// `rect` 在发现时捕获，本次会话内不再重新计算。
#[derive(Debug, Clone)]
pub struct Candidate {
    pub element: ElementId,
    pub kind: CandidateKind,
    pub rect: Rect,
    /// 小写文本内容（文本匹配用）
    pub text: String,
    /// 当前编号
    pub label: u32,
    /// 标签徽章节点
    pub badge: NodeId,
    /// 覆盖区域节点
    pub region: NodeId,
    /// 徽章/覆盖区域是否已挂到容器上
    pub attached: bool,
}

/// 会话阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// 没有会话
    #[default]
    Idle,
    /// 提示已显示
    Active,
    /// 已执行终结动作（已拆除）
    Resolved,
    /// 已取消（已拆除）
    Cancelled,
}

/// 单个可见提示的只读视图。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintView {
    pub label: u32,
    pub element: ElementId,
    /// 覆盖区域节点（宿主据此把鼠标点击映射回候选）
    pub region: NodeId,
    pub kind: CandidateKind,
    pub focused: bool,
}

/// 引擎给宿主的“快照视图”。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintState {
    pub phase: Phase,
    /// 当前输入串（已小写）
    pub buffer: String,
    /// active 集合（垂直顺序）
    pub hints: Vec<HintView>,
}

impl HintState {
    /// 本次输入是否让会话以终结动作结束（宿主据此退出提示模式）。
    pub fn is_resolved(&self) -> bool {
        self.phase == Phase::Resolved
    }

    pub fn focused(&self) -> Option<&HintView> {
        self.hints.iter().find(|h| h.focused)
    }
}
