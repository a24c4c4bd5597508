//! Interactive dashboard shell.
//!
//! Keeps one pipeline across commands so `upload`, `analyze` and `predict`
//! can be run step by step. Ctrl-C while a stage is running abandons the
//! pipeline and starts a fresh one.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::future::Future;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use hismarketing_application::{Pipeline, PipelineState, WorkflowOrchestrator};
use hismarketing_core::error::Result as HisResult;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use super::parse_report;
use crate::context::AppContext;

const COMMANDS: [&str; 9] = [
    "upload", "analyze", "predict", "report", "status", "whoami", "logout", "help", "quit",
];

/// Completion, highlighting and hints for shell commands.
#[derive(Clone)]
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let command = line.split_whitespace().next().unwrap_or_default();
        if self.commands.iter().any(|cmd| cmd == command) {
            Owned(line.replacen(command, &command.bright_cyan().to_string(), 1))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ShellHelper {}

enum Step {
    Continue,
    Quit,
}

pub async fn run(ctx: &AppContext) -> Result<ExitCode> {
    let orchestrator = &ctx.orchestrator;
    let mut pipeline = orchestrator.new_pipeline();
    if orchestrator.open_dashboard(&mut pipeline).is_err() {
        return Ok(ExitCode::FAILURE);
    }

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new()));

    println!("{}", "=== HisMarketing ===".bright_magenta().bold());
    println!(
        "{}",
        "Komutlar: upload <dosya>, analyze, predict, report <pdf|excel>[:tür], status, logout, quit"
            .bright_black()
    );
    println!();

    loop {
        let prompt = format!("[{}] >> ", pipeline.state());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match execute(orchestrator, &mut pipeline, trimmed).await {
                    Step::Continue => {}
                    Step::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C algılandı. Çıkmak için 'quit' yazın.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    println!("{}", "Güle güle!".bright_green());
    Ok(ExitCode::SUCCESS)
}

async fn execute(orchestrator: &WorkflowOrchestrator, pipeline: &mut Pipeline, line: &str) -> Step {
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        "upload" if argument.is_empty() => {
            println!("{}", "Kullanım: upload <dosya>".yellow());
        }
        "upload" => {
            let stage = orchestrator.upload_path(pipeline, Path::new(argument));
            if interrupted(stage).await {
                restart(orchestrator, pipeline);
            }
        }
        "analyze" => {
            if interrupted(orchestrator.analyze(pipeline)).await {
                restart(orchestrator, pipeline);
            }
        }
        "predict" => {
            if interrupted(orchestrator.predict(pipeline)).await {
                restart(orchestrator, pipeline);
            }
        }
        "report" => match parse_report(if argument.is_empty() { "pdf" } else { argument }) {
            Ok(request) => {
                let _ = orchestrator.download_report(pipeline, request).await;
            }
            Err(err) => println!("{}", err.yellow()),
        },
        "status" => print_status(pipeline),
        "whoami" => {
            let _ = orchestrator.open_dashboard(pipeline);
        }
        "logout" => {
            let _ = orchestrator.logout(pipeline);
            return Step::Quit;
        }
        "help" => print_help(),
        "quit" | "exit" => return Step::Quit,
        other => println!("{}", format!("Bilinmeyen komut: {other}").bright_black()),
    }

    if pipeline.state() == PipelineState::Unauthenticated {
        return Step::Quit;
    }
    Step::Continue
}

/// Runs a stage until it finishes or Ctrl-C is pressed.
///
/// Returns `true` when interrupted; the stage future is dropped, which
/// stops its timers.
async fn interrupted<F>(stage: F) -> bool
where
    F: Future<Output = HisResult<PipelineState>>,
{
    tokio::select! {
        _ = stage => false,
        _ = tokio::signal::ctrl_c() => true,
    }
}

/// Abandons the current pipeline and starts a new one.
fn restart(orchestrator: &WorkflowOrchestrator, pipeline: &mut Pipeline) {
    let abandoned = pipeline.id();
    orchestrator.abandon();
    *pipeline = orchestrator.new_pipeline();
    tracing::info!(
        %abandoned,
        pipeline_id = %pipeline.id(),
        "[Shell] Stage interrupted"
    );
    println!("{}", "\nİşlem iptal edildi; yeni bir oturum başlatıldı.".yellow());
    let _ = orchestrator.open_dashboard(pipeline);
}

fn print_status(pipeline: &Pipeline) {
    println!("  {} {}", "Durum:".bright_black(), pipeline.state());
    if let Some(upload) = pipeline.upload() {
        println!(
            "  {} {} ({} satır)",
            "Dosya:".bright_black(),
            upload.file_id,
            upload.row_count
        );
    }
    if let Some(prediction) = pipeline.prediction() {
        println!(
            "  {} {} ürün, %{:.1} doğruluk",
            "Tahmin:".bright_black(),
            prediction.predictions.len(),
            prediction.accuracy
        );
    }
}

fn print_help() {
    let rows = [
        ("upload <dosya>", "Excel (.xlsx, .xls) veya CSV dosyası yükle"),
        ("analyze", "Yüklenen veriyi analiz et"),
        ("predict", "6 aylık satış tahmini oluştur"),
        ("report <pdf|excel>[:tür]", "Raporu indir (tür: analysis, prediction)"),
        ("status", "Mevcut durumu göster"),
        ("whoami", "Oturum bilgisi"),
        ("logout", "Çıkış yap"),
        ("quit", "Kabuktan çık"),
    ];
    for (command, description) in rows {
        println!("  {:<26} {}", command.bright_cyan(), description);
    }
}
