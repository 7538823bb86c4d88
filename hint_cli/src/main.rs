use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use hint_core::{
    config::HintStyle,
    engine::Engine,
    key_event::{Action, InputEvent},
    model::{HintState, Phase},
    session::Session,
};
use hint_page::PageDocument;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// 链接提示演示：在一个内存页面上逐键过滤提示。
#[derive(Debug, Parser)]
#[command(about = "link hinting demo", version)]
struct Args {
    /// 页面描述（TSV）
    #[arg(long, default_value_os_t = default_page_path())]
    page: PathBuf,

    /// 外观参数（TOML）；文件不存在时用缺省值
    #[arg(long)]
    style: Option<PathBuf>,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn default_page_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("asset").join("page.tsv")
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let page = PageDocument::from_path(&args.page)
        .with_context(|| format!("failed to load page {}", args.page.display()))?;
    let style = match &args.style {
        Some(path) => HintStyle::from_path(path)
            .with_context(|| format!("failed to load style {}", path.display()))?,
        None => HintStyle::default(),
    };
    let engine = Engine::new(page).style(style);

    let mut session = Session::new(engine);
    repl(&mut session, &args.page)
}

fn repl(session: &mut Session<PageDocument>, page_path: &Path) -> Result<()> {
    let mut out = io::stdout();
    let mut line = String::new();
    writeln!(out, "hint demo | page: {}", page_path.display())?;
    writeln!(
        out,
        "命令：:show 显示提示，:bs 退格，:next/:prev 移动高亮，:ok 确认，:esc 取消，:click <编号> 点击覆盖区域，:q 退出；其他输入逐字符键入。"
    )?;
    out.flush()?;

    loop {
        line.clear();
        print!("hint> ");
        out.flush()?;
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input.is_empty() {
            continue;
        }
        debug!(input, "repl input");

        let mut actions = Vec::new();
        let state = match input {
            ":q" | ":quit" | ":exit" => break,
            ":show" => session.show_hints(),
            ":bs" => collect(session.handle(InputEvent::Backspace), &mut actions),
            ":next" => session.focus_next(),
            ":prev" => session.focus_prev(),
            ":ok" => collect(session.confirm(), &mut actions),
            ":esc" => session.clear(),
            cmd if cmd.starts_with(":click") => {
                let label = cmd[":click".len()..].trim().parse::<u32>().ok();
                let state = session.state();
                let region = state
                    .hints
                    .iter()
                    .find(|h| Some(h.label) == label)
                    .map(|h| h.region);
                match region {
                    Some(region) => {
                        collect(session.handle(InputEvent::OverlayClick(region)), &mut actions)
                    }
                    None => {
                        writeln!(out, "没有这个编号")?;
                        continue;
                    }
                }
            }
            text => {
                let mut state = session.state();
                for ch in text.chars() {
                    state = collect(session.handle(InputEvent::Char(ch)), &mut actions);
                }
                state
            }
        };

        for action in &actions {
            writeln!(out, "action: {}", describe(action))?;
            session.document_mut().apply(action);
        }
        print_state(&mut out, &state, session.document())?;
    }

    Ok(())
}

fn collect((state, mut actions): (HintState, Vec<Action>), out: &mut Vec<Action>) -> HintState {
    out.append(&mut actions);
    state
}

fn describe(action: &Action) -> String {
    match action {
        Action::ToggleChecked(id) => format!("toggle #{}", id.0),
        Action::Click(id) => format!("click #{}", id.0),
        Action::Focus(id) => format!("focus #{}", id.0),
        Action::Navigate(url) => format!("navigate {url}"),
    }
}

fn print_state(out: &mut impl Write, state: &HintState, page: &PageDocument) -> io::Result<()> {
    match state.phase {
        Phase::Idle => writeln!(out, "(idle)")?,
        Phase::Resolved => writeln!(out, "(resolved)")?,
        Phase::Cancelled => writeln!(out, "(cancelled)")?,
        Phase::Active => {
            writeln!(out, "input: {:?}", state.buffer)?;
            if state.hints.is_empty() {
                writeln!(out, "  (no hints)")?;
            }
            for hint in &state.hints {
                let marker = if hint.focused { '>' } else { ' ' };
                let text = page
                    .element(hint.element)
                    .map(|e| format!("<{}> {}", e.info.tag, e.info.text))
                    .unwrap_or_default();
                writeln!(out, "{marker} {:>3}  {text}", hint.label)?;
            }
        }
    }
    if let Some(url) = page.location() {
        writeln!(out, "location: {url}")?;
    }
    if let Some(id) = page.focused() {
        writeln!(out, "focused: #{}", id.0)?;
    }
    Ok(())
}
