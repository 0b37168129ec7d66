use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn top_level_help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("reelctl");
    let output = cmd
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    assert!(text.contains("plan"), "help missing plan");
    assert!(text.contains("simulate"), "help missing simulate");
    assert!(text.contains("config"), "help missing config");
}

#[test]
fn simulate_help_documents_script_and_renderer() {
    let mut cmd = cargo_bin_cmd!("reelctl");
    let out = cmd
        .arg("simulate")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("--script"), "simulate help missing --script");
    assert!(text.contains("--renderer"), "simulate help missing --renderer");
    assert!(text.contains("silent"), "simulate help missing renderer modes");
}

#[test]
fn overrides_are_global() {
    let mut cmd = cargo_bin_cmd!("reelctl");
    let out = cmd
        .arg("plan")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("--infinite"), "plan help missing --infinite");
    assert!(text.contains("--items"), "plan help missing --items");
}
