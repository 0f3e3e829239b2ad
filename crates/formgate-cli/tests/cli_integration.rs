//! Integration tests for the `formgate` command registry.
//!
//! Each test parses a full command line, loads settings the way the binary
//! does, and runs the command through the registry.

use std::io::Write;

use formgate_cli::command::load_settings;
use formgate_cli::{register_builtin_commands, CommandContext, CommandOutput, CommandRegistry};
use formgate_core::FormgateError;

fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);
    registry
}

async fn run(args: &[&str]) -> Result<CommandOutput, FormgateError> {
    let registry = registry();
    let matches = registry
        .build_cli()
        .try_get_matches_from(std::iter::once("formgate").chain(args.iter().copied()))
        .expect("arguments should parse");
    let settings = load_settings(&matches)?;
    let ctx = CommandContext::new(settings, matches.get_flag("json"));
    registry.execute(&matches, &ctx).await
}

fn fast_settings_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[submission]\n\
         simulated_latency_ms = 0\n\
         redirect_to = \"home.html\"\n\
         redirect_delay_ms = 10"
    )
    .unwrap();
    file
}

#[test]
fn test_help_lists_every_command() {
    let help = registry().build_cli().render_help().to_string();
    for name in ["check-email", "check-password", "signin", "signup"] {
        assert!(help.contains(name), "missing {name} in help");
    }
}

#[test]
fn test_subcommand_is_required() {
    let result = registry()
        .build_cli()
        .try_get_matches_from(["formgate"]);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_check_email_json_output() {
    let output = run(&["check-email", "a@b", "--json"]).await.unwrap();
    assert!(!output.success);
    let rendered: serde_json::Value = serde_json::from_str(&output.render(true)).unwrap();
    assert_eq!(rendered["outcome"]["status"], "invalid");
    assert_eq!(
        rendered["outcome"]["message"],
        "Please enter a valid email address"
    );
}

#[tokio::test]
async fn test_signin_uses_settings_file() {
    let file = fast_settings_file();
    let path = file.path().to_str().unwrap();
    let output = run(&[
        "--settings",
        path,
        "signin",
        "--email",
        "a@b.com",
        "--password",
        "pw",
    ])
    .await
    .unwrap();

    assert!(output.success);
    assert_eq!(
        output.text,
        "Login successful! Redirecting...\nRedirecting to home.html in 10 ms"
    );
}

#[tokio::test]
async fn test_signup_mismatch_and_strength() {
    let file = fast_settings_file();
    let path = file.path().to_str().unwrap();
    let output = run(&[
        "--settings",
        path,
        "signup",
        "--name",
        "Ada",
        "--email",
        "ada@example.com",
        "--password",
        "Abcdefg1!",
        "--confirm-password",
        "Abcdefg1?",
        "--agree-terms",
    ])
    .await
    .unwrap();

    assert!(!output.success);
    assert_eq!(output.text, "confirm_password: Passwords do not match");
    assert_eq!(output.body["state"], "idle");
    assert_eq!(output.body["report"]["strength"], 5);
}

#[tokio::test]
async fn test_missing_settings_file_is_an_error() {
    let err = run(&["--settings", "/nonexistent/formgate.toml", "check-email", "a@b.com"])
        .await
        .unwrap_err();
    assert!(!err.is_contract_violation());
}
