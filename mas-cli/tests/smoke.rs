use std::process::Command;

fn run_mas(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mas"))
        .args(args)
        .env_remove("MAS_LLM_API_KEY")
        .output()
        .expect("failed to run mas binary")
}

#[test]
fn help_succeeds() {
    let out = run_mas(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("query"));
}

#[test]
fn query_without_a_provider_falls_back_to_the_mock_llm() {
    let out = run_mas(&["hello there"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("canned reply"));
}

#[test]
fn json_flag_emits_a_json_string() {
    let out = run_mas(&["--json", "--mock", "hello there"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.trim().starts_with('"'));
}
