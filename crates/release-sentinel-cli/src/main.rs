// crates/release-sentinel-cli/src/main.rs
// ============================================================================
// Module: Release Sentinel CLI Entry Point
// Description: Command dispatcher for release plan gating workflows.
// Purpose: Evaluate, summarize, and validate release inputs from the shell.
// Dependencies: clap, release-sentinel-{core,config,providers}, thiserror.
// ============================================================================

//! ## Overview
//! The Release Sentinel CLI loads a policy configuration and a release plan,
//! gathers readiness signals, and prints one allow/deny decision per service.
//! All user-facing strings are routed through the i18n catalog.
//!
//! Exit codes: `0` when the plan is allowed or a command succeeds, `1` on
//! load, validation, or output failures, `2` when a plan is denied.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use release_sentinel_cli::i18n::Locale;
use release_sentinel_cli::i18n::set_locale;
use release_sentinel_cli::render::render_json;
use release_sentinel_cli::render::render_policies;
use release_sentinel_cli::render::render_table;
use release_sentinel_cli::t;
use release_sentinel_config::load_policies;
use release_sentinel_config::load_release_plan;
use release_sentinel_config::resolve_policies_path;
use release_sentinel_core::DecisionAuditSink;
use release_sentinel_core::FileAuditSink;
use release_sentinel_core::NoopAuditSink;
use release_sentinel_core::PlanEvaluator;
use release_sentinel_core::PolicyConfig;
use release_sentinel_core::SignalProvider;
use release_sentinel_core::StderrAuditSink;
use release_sentinel_core::healthy_signals_for_plan;
use release_sentinel_providers::EnvFreezeConfig;
use release_sentinel_providers::EnvFreezeProvider;
use release_sentinel_providers::FileSignalProvider;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "RELEASE_SENTINEL_LANG";
/// Exit code reported when a plan is denied.
const DENIED_EXIT_CODE: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "release-sentinel",
    about = "Evaluate deployment release plans against policy.",
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `RELEASE_SENTINEL_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a release plan and print a decision table.
    Evaluate(EvaluateCommand),
    /// Print a summary of service policies.
    ShowPolicies(ShowPoliciesCommand),
    /// Load and validate policy and plan documents without evaluating.
    Validate(ValidateCommand),
}

/// Arguments for the `evaluate` command.
#[derive(Args, Debug)]
struct EvaluateCommand {
    /// Release plan document.
    #[arg(value_name = "PLAN")]
    plan: PathBuf,
    /// Policy document (defaults to release-policies.yaml or env override).
    #[arg(long, short = 'p', value_name = "PATH")]
    policies: Option<PathBuf>,
    /// Signal snapshot document; every service is healthy when omitted.
    #[arg(long, value_name = "PATH")]
    signals: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Append a JSON audit record to this file.
    #[arg(long, value_name = "PATH", conflicts_with = "audit_stderr")]
    audit_log: Option<PathBuf>,
    /// Write a JSON audit record to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    audit_stderr: bool,
}

/// Arguments for the `show-policies` command.
#[derive(Args, Debug)]
struct ShowPoliciesCommand {
    /// Policy document (defaults to release-policies.yaml or env override).
    #[arg(value_name = "PATH")]
    policies: Option<PathBuf>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Policy document (defaults to release-policies.yaml or env override).
    #[arg(long, short = 'p', value_name = "PATH")]
    policies: Option<PathBuf>,
    /// Optional release plan document.
    #[arg(long, value_name = "PATH")]
    plan: Option<PathBuf>,
}

/// Output formats for evaluation results.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Bordered text table.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Evaluate(command) => command_evaluate(&command),
        Commands::ShowPolicies(command) => command_show_policies(&command),
        Commands::Validate(command) => command_validate(&command),
    }
}

// ============================================================================
// SECTION: Evaluate Command
// ============================================================================

/// Evaluates a release plan and renders the decisions.
fn command_evaluate(command: &EvaluateCommand) -> CliResult<ExitCode> {
    let policy_cfg = load_policy_config(command.policies.as_deref())?;
    let plan = load_release_plan(&command.plan)
        .map_err(|err| CliError::new(t!("plan.load_failed", error = err)))?;

    let base: Box<dyn SignalProvider> = match &command.signals {
        Some(path) => Box::new(
            FileSignalProvider::load(path)
                .map_err(|err| CliError::new(t!("signals.load_failed", error = err)))?,
        ),
        None => Box::new(healthy_signals_for_plan(&plan)),
    };
    let freeze_config = EnvFreezeConfig::default();
    let provider = EnvFreezeProvider::new(base, &freeze_config);
    if provider.freeze_active() {
        write_stderr_line(&t!("signals.freeze_active", env = freeze_config.variable))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    let evaluator = PlanEvaluator::new().with_audit(audit_sink(command)?);
    let result = evaluator.evaluate(&policy_cfg, &plan, &provider);

    let rendered = match command.format {
        OutputFormat::Table => render_table(&result),
        OutputFormat::Json => render_json(&result)
            .map_err(|err| CliError::new(t!("evaluate.serialize_failed", error = err)))?,
    };
    write_stdout(&rendered)?;

    if result.overall_allowed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(DENIED_EXIT_CODE))
    }
}

/// Builds the audit sink selected by command flags.
fn audit_sink(command: &EvaluateCommand) -> CliResult<Box<dyn DecisionAuditSink>> {
    if let Some(path) = &command.audit_log {
        let sink = FileAuditSink::new(path).map_err(|err| {
            CliError::new(t!("audit.open_failed", path = path.display(), error = err))
        })?;
        return Ok(Box::new(sink));
    }
    if command.audit_stderr {
        return Ok(Box::new(StderrAuditSink));
    }
    Ok(Box::new(NoopAuditSink))
}

// ============================================================================
// SECTION: Policy Commands
// ============================================================================

/// Prints the policy summary.
fn command_show_policies(command: &ShowPoliciesCommand) -> CliResult<ExitCode> {
    let policy_cfg = load_policy_config(command.policies.as_deref())?;
    write_stdout(&render_policies(&policy_cfg))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads and validates documents without evaluating.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let path = resolve_policies_path(command.policies.as_deref())
        .map_err(|err| CliError::new(t!("policies.load_failed", error = err)))?;
    let policy_cfg = load_policy_config(Some(path.as_path()))?;
    write_stdout_line(&t!(
        "validate.policies_ok",
        path = path.display(),
        services = policy_cfg.services.len(),
        windows = policy_cfg.windows.len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if let Some(plan_path) = &command.plan {
        let plan = load_release_plan(plan_path)
            .map_err(|err| CliError::new(t!("plan.load_failed", error = err)))?;
        write_stdout_line(&t!(
            "validate.plan_ok",
            path = plan_path.display(),
            services = plan.services.len()
        ))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads the policy configuration, mapping failures to CLI errors.
fn load_policy_config(path: Option<&Path>) -> CliResult<PolicyConfig> {
    load_policies(path).map_err(|err| CliError::new(t!("policies.load_failed", error = err)))
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout(&help)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes pre-terminated text to stdout, adding a newline when missing.
fn write_stdout(text: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    let result = if text.ends_with('\n') {
        stdout.write_all(text.as_bytes())
    } else {
        writeln!(&mut stdout, "{text}")
    };
    result.map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
