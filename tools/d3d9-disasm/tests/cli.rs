use std::fs;

use tempfile::tempdir;

const MOV_LINE: &str = "ffff0300 02000001 900f0000 80000000 0000ffff";
const MOV_BLOCK: &str = "Tokens: ffff0300 02000001 900f0000 80000000 0000ffff\nAssembly: \nps_3_0 \nmov v0 r0.x \nend \n\n";

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn hex_lines_file_matches_reference_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shaders.txt");
    fs::write(
        &path,
        format!("{MOV_LINE}\n\nffff0200 00000000 0000ffff\n"),
    )
    .unwrap();

    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .get_output()
        .clone();

    let expected = format!(
        "{MOV_BLOCK}Tokens: \nAssembly: \n\n\nTokens: ffff0200 00000000 0000ffff\nAssembly: \nps_2_0 \nnop \nend \n\n"
    );
    assert_eq!(stdout_of(&output), expected);
}

#[test]
fn reads_stdin_when_no_inputs() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .write_stdin(format!("{MOV_LINE}\n"))
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(stdout_of(&output), MOV_BLOCK);
}

#[test]
fn fxc_listing_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shader.fx.txt");
    fs::write(
        &path,
        "    ps_3_0\n    mov v0, r0.x\n#if 0\n// 0000:  ffff0300  02000001  900f0000  80000000\n// 0010:  0000ffff\n#endif\n",
    )
    .unwrap();

    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .args(["--input", "fxc", path.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(stdout_of(&output), MOV_BLOCK);
}

#[test]
fn binary_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shader.bin");
    let words = [0xFFFF_0300u32, 0x0200_0001, 0x900F_0000, 0x8000_0000, 0x0000_FFFF];
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    fs::write(&path, bytes).unwrap();

    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .args(["--input", "binary", path.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(stdout_of(&output), MOV_BLOCK);
}

#[test]
fn binary_input_rejects_partial_words() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shader.bin");
    fs::write(&path, [0x00u8, 0x03, 0xFF, 0xFF, 0x01]).unwrap();

    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .args(["--input", "binary", path.to_str().unwrap()])
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a multiple of 4"), "stderr: {stderr}");
}

#[test]
fn json_output() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .args(["--format", "json"])
        .write_stdin(format!("{MOV_LINE}\nffff0300 00000000\n"))
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = stdout_of(&output);
    let reports: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(reports.len(), 2);

    assert_eq!(reports[0]["source"], "<stdin>");
    assert_eq!(reports[0]["line"], 1);
    assert_eq!(reports[0]["words_consumed"], 5);
    assert_eq!(reports[0]["tokens"][1]["text"], "mov");
    assert_eq!(reports[0]["stream_errors"], serde_json::json!([]));

    assert_eq!(reports[1]["line"], 2);
    assert_eq!(
        reports[1]["stream_errors"],
        serde_json::json!([{ "error": "missing_end" }])
    );
}

#[test]
fn strict_mode_fails_on_diagnostics() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shaders.txt");
    fs::write(&path, format!("{MOV_LINE}\nffff0300 00000000\n")).unwrap();

    // Without --strict the partial listing is still printed and the exit is clean.
    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(stdout_of(&output).ends_with("Assembly: \nps_3_0 \nnop \n\n"));

    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .args(["--strict", path.to_str().unwrap()])
        .assert()
        .failure()
        .get_output()
        .clone();
    assert!(stdout_of(&output).starts_with(MOV_BLOCK));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing end token"), "stderr: {stderr}");
    assert!(stderr.contains("shaders.txt:2"), "stderr: {stderr}");
}

#[test]
fn strict_mode_treats_field_errors_as_fatal() {
    // Source modifier 0xE is outside the modifier table.
    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .arg("--strict")
        .write_stdin("ffff0300 02000001 800f0000 8ee40000 0000ffff\n")
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("source modifier value 14 at word 3 is out of range"),
        "stderr: {stderr}"
    );
}

#[test]
fn vertex_headers_and_comments_flags() {
    let line = "fffe0200 0001fffe 43544142 02000001 e00f0000 90e40000 0000ffff\n";

    let output = assert_cmd::cargo::cargo_bin_cmd!("d3d9-disasm")
        .args(["--vertex-headers", "--comments"])
        .write_stdin(line)
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(
        stdout_of(&output),
        format!(
            "Tokens: {}Assembly: \nvs_2_0 \ncomment CTAB \nmov o0 v0 \nend \n\n",
            line
        )
    );
}
