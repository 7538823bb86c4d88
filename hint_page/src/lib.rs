use std::{collections::HashMap, fs, io, path::Path};

use hint_core::{
    document::{Document, Visual},
    key_event::Action,
    model::{ComputedStyle, ElementId, ElementInfo, NodeId, Rect, Viewport},
};
use thiserror::Error;
use tracing::debug;

/// 页面描述加载错误。
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("page line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// 页面上的一个交互元素及其可变状态。
#[derive(Debug, Clone)]
pub struct PageElement {
    pub info: ElementInfo,
    pub style: ComputedStyle,
    /// checkbox/radio 的选中状态
    pub checked: bool,
    /// 收到的合成点击次数
    pub clicks: usize,
}

/// 会话创建的可视节点。
#[derive(Debug, Clone, Default)]
pub struct VisualNode {
    /// 容器节点没有样式
    pub visual: Option<Visual>,
    pub text: String,
    pub background: String,
    pub visible: bool,
    pub parent: Option<NodeId>,
    /// 是否直接挂在 body 上
    pub in_body: bool,
}

/// TSV 格式（简化版）的内存页面：
///
/// - `tag<TAB>type<TAB>left,top,width,height<TAB>href<TAB>text[<TAB>flags]`
/// - 空字段写 `-`；rect 为 `-` 表示元素没有布局
/// - flags 逗号分隔：`hidden`（visibility:hidden）、`none`（display:none）、`norects`、`checked`
/// - `@viewport<TAB>width<TAB>height[<TAB>scroll_x<TAB>scroll_y]` 设置视口
/// - 允许 `#` 开头注释行
///
/// 元素按出现顺序编号（`ElementId(0)` 起），与文档顺序一致。
#[derive(Debug, Clone)]
pub struct PageDocument {
    elements: Vec<PageElement>,
    viewport: Viewport,
    /// 仍存活的可视节点；`remove` 后即释放
    nodes: HashMap<NodeId, VisualNode>,
    next_node: usize,
    focused: Option<ElementId>,
    location: Option<String>,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            viewport: Viewport {
                width: 1024.0,
                height: 768.0,
                scroll_x: 0.0,
                scroll_y: 0.0,
            },
            nodes: HashMap::new(),
            next_node: 0,
            focused: None,
            location: None,
        }
    }
}

fn field(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|x| !x.is_empty() && *x != "-")
}

fn parse_f64(raw: &str, line: usize) -> Result<f64, PageError> {
    raw.trim().parse::<f64>().map_err(|_| PageError::Malformed {
        line,
        message: format!("not a number: {raw:?}"),
    })
}

fn parse_rect(raw: &str, line: usize) -> Result<Rect, PageError> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 4 {
        return Err(PageError::Malformed {
            line,
            message: format!("rect needs left,top,width,height: {raw:?}"),
        });
    }
    Ok(Rect::new(
        parse_f64(parts[0], line)?,
        parse_f64(parts[1], line)?,
        parse_f64(parts[2], line)?,
        parse_f64(parts[3], line)?,
    ))
}

impl PageDocument {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_tsv_str(&s)
    }

    pub fn from_tsv_str(s: &str) -> Result<Self, PageError> {
        let mut page = Self::default();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let mut it = line.split('\t');
            let tag = it.next().unwrap_or("").trim();

            if tag == "@viewport" {
                let width = parse_f64(it.next().unwrap_or(""), line_no)?;
                let height = parse_f64(it.next().unwrap_or(""), line_no)?;
                let scroll_x = field(it.next()).map(|x| parse_f64(x, line_no)).transpose()?;
                let scroll_y = field(it.next()).map(|x| parse_f64(x, line_no)).transpose()?;
                page.viewport = Viewport {
                    width,
                    height,
                    scroll_x: scroll_x.unwrap_or(0.0),
                    scroll_y: scroll_y.unwrap_or(0.0),
                };
                continue;
            }

            if tag.is_empty() || tag == "-" {
                return Err(PageError::Malformed {
                    line: line_no,
                    message: "missing tag".to_string(),
                });
            }
            let input_type = field(it.next()).unwrap_or("").to_string();
            let rect = field(it.next()).map(|r| parse_rect(r, line_no)).transpose()?;
            let href = field(it.next()).map(str::to_string);
            let text = field(it.next()).unwrap_or("").to_string();

            let mut style = ComputedStyle::default();
            let mut has_client_rects = rect.is_some();
            let mut checked = false;
            for flag in field(it.next()).unwrap_or("").split(',').map(str::trim) {
                match flag {
                    "" => {}
                    "hidden" => style.visibility = "hidden".to_string(),
                    "none" => style.display = "none".to_string(),
                    "norects" => has_client_rects = false,
                    "checked" => checked = true,
                    other => {
                        return Err(PageError::Malformed {
                            line: line_no,
                            message: format!("unknown flag {other:?}"),
                        });
                    }
                }
            }

            let id = ElementId(page.elements.len());
            page.elements.push(PageElement {
                info: ElementInfo {
                    id,
                    tag: tag.to_ascii_lowercase(),
                    input_type,
                    href,
                    text,
                    rect,
                    has_client_rects,
                },
                style,
                checked,
                clicks: 0,
            });
        }

        debug!(elements = page.elements.len(), "loaded page");
        Ok(page)
    }

    /// 追加一个元素（测试与程序化构造用），返回它的句柄。
    pub fn push(&mut self, mut info: ElementInfo, style: ComputedStyle) -> ElementId {
        let id = ElementId(self.elements.len());
        info.id = id;
        self.elements.push(PageElement {
            info,
            style,
            checked: false,
            clicks: 0,
        });
        id
    }

    pub fn elements(&self) -> &[PageElement] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&PageElement> {
        self.elements.get(id.0)
    }

    /// 当前拥有输入焦点的元素。
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// 最近一次整页跳转的目标。
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(&id)
    }

    /// 尚未释放的可视节点数。
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 直接挂在 body 上的节点数（提示容器）。
    pub fn body_children(&self) -> usize {
        self.nodes.values().filter(|n| n.in_body).count()
    }

    /// 节点是否真的出现在文档中（沿父链能走到 body）。
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut cur = self.nodes.get(&id);
        while let Some(node) = cur {
            if node.in_body {
                return true;
            }
            cur = node.parent.and_then(|p| self.nodes.get(&p));
        }
        false
    }

    /// 执行会话产生的动作。
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::ToggleChecked(id) => {
                if let Some(e) = self.elements.get_mut(id.0) {
                    e.checked = !e.checked;
                }
            }
            Action::Click(id) => {
                if let Some(e) = self.elements.get_mut(id.0) {
                    e.clicks += 1;
                }
            }
            Action::Focus(id) => self.focused = Some(*id),
            Action::Navigate(url) => self.location = Some(url.clone()),
        }
    }

    fn new_node(&mut self, node: VisualNode) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, node);
        id
    }
}

impl Document for PageDocument {
    fn query_candidates(&self) -> Vec<ElementInfo> {
        const TAGS: [&str; 9] = [
            "a", "area", "textarea", "select", "link", "input", "button", "frame", "iframe",
        ];
        self.elements
            .iter()
            .filter(|e| TAGS.contains(&e.info.tag.as_str()))
            .filter(|e| {
                !(e.info.tag == "input" && e.info.input_type.eq_ignore_ascii_case("hidden"))
            })
            .map(|e| e.info.clone())
            .collect()
    }

    fn computed_style(&self, element: ElementId) -> ComputedStyle {
        self.elements
            .get(element.0)
            .map(|e| e.style.clone())
            .unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn blur_active(&mut self) {
        self.focused = None;
    }

    fn create_container(&mut self) -> NodeId {
        self.new_node(VisualNode {
            visible: true,
            ..VisualNode::default()
        })
    }

    fn create_visual(&mut self, visual: &Visual) -> NodeId {
        self.new_node(VisualNode {
            background: visual.background.clone(),
            visual: Some(visual.clone()),
            visible: true,
            ..VisualNode::default()
        })
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.text = text.to_string();
        }
    }

    fn set_background(&mut self, node: NodeId, color: &str) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.background = color.to_string();
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.visible = visible;
        }
    }

    fn attach_to_body(&mut self, node: NodeId) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.in_body = true;
        }
    }

    fn remove(&mut self, node: NodeId) -> bool {
        self.nodes
            .remove(&node)
            .is_some_and(|n| n.in_body || n.parent.is_some())
    }
}
