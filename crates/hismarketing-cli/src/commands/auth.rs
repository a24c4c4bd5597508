use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use hismarketing_core::session::{LoginCredentials, Registration};
use rustyline::DefaultEditor;

use super::exit_code;
use crate::context::AppContext;

/// Reads a value interactively when it was not given as a flag.
pub(crate) fn prompt_missing(value: Option<String>, label: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let mut editor = DefaultEditor::new().context("Failed to open terminal")?;
    let line = editor
        .readline(&format!("{label}: "))
        .with_context(|| format!("No {label} entered"))?;
    Ok(line.trim().to_string())
}

pub async fn login(ctx: &AppContext, email: Option<String>, password: Option<String>) -> Result<ExitCode> {
    let mut pipeline = ctx.orchestrator.new_pipeline();
    if ctx.orchestrator.enter_auth_view(&mut pipeline).is_some() {
        return Ok(ExitCode::SUCCESS);
    }

    let email = prompt_missing(email, "E-posta")?;
    let password = prompt_missing(password, "Şifre")?;

    let outcome = ctx
        .orchestrator
        .login(&mut pipeline, &LoginCredentials::new(email, password))
        .await;
    if outcome.is_ok() {
        ctx.orchestrator.open_dashboard(&mut pipeline)?;
    }
    Ok(exit_code(outcome))
}

pub struct RegisterArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
}

pub async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<ExitCode> {
    let mut pipeline = ctx.orchestrator.new_pipeline();
    if ctx.orchestrator.enter_auth_view(&mut pipeline).is_some() {
        return Ok(ExitCode::SUCCESS);
    }

    let registration = Registration {
        name: prompt_missing(args.name, "Ad Soyad")?,
        email: prompt_missing(args.email, "E-posta")?,
        company: prompt_missing(args.company, "Şirket")?,
        password: prompt_missing(args.password, "Şifre")?,
        password_confirm: prompt_missing(args.password_confirm, "Şifre (tekrar)")?,
    };

    let outcome = ctx.orchestrator.register(&mut pipeline, &registration).await;
    if outcome.is_ok() {
        ctx.orchestrator.open_dashboard(&mut pipeline)?;
    }
    Ok(exit_code(outcome))
}

pub fn logout(ctx: &AppContext) -> Result<ExitCode> {
    let mut pipeline = ctx.orchestrator.new_pipeline();
    Ok(exit_code(ctx.orchestrator.logout(&mut pipeline)))
}

pub fn whoami(ctx: &AppContext) -> Result<ExitCode> {
    let mut pipeline = ctx.orchestrator.new_pipeline();
    let outcome = ctx.orchestrator.open_dashboard(&mut pipeline);
    if outcome.is_ok() {
        println!(
            "  {} {}",
            "API:".bright_black(),
            ctx.settings.config.api.base_url
        );
        if let Ok(dir) = ctx.settings.report_dir() {
            println!("  {} {}", "Raporlar:".bright_black(), dir.display());
        }
    }
    Ok(exit_code(outcome))
}
