use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PAGE_TEXT: &str = "PUBLIC BANK BERHAD
Statement Date 31 Jan 2024
Total Debits 150.00 No. of Debits 2
Total Credits 1,000.00 No. of Credits 1
";

const PAGE_TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
5\t1\t1\t1\t1\t1\t100\t80\t120\t30\t96\tPUBLIC
5\t1\t1\t1\t1\t2\t230\t80\t90\t30\t96\tBANK
5\t1\t2\t1\t4\t1\t150\t450\t40\t22\t95\tMR
5\t1\t2\t1\t4\t2\t200\t450\t60\t22\t95\tTAN
5\t1\t2\t1\t5\t1\t150\t490\t90\t22\t95\tKUALA
5\t1\t2\t1\t5\t2\t250\t490\t110\t22\t95\tLUMPUR
5\t1\t3\t1\t10\t1\t90\t1200\t70\t22\t96\t03/01
5\t1\t3\t1\t10\t3\t1500\t1200\t90\t22\t94\t100.00
5\t1\t3\t1\t11\t1\t1500\t1240\t80\t22\t94\t50.00
5\t1\t3\t1\t12\t1\t90\t1300\t70\t22\t96\t15/01
5\t1\t3\t1\t12\t3\t1820\t1300\t110\t22\t94\t1,000.00
";

fn stmtx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stmtx").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

/// Write a blank page image with text and token sidecars.
fn write_page(dir: &Path, stem: &str, text: &str) -> PathBuf {
    let image_path = dir.join(format!("{stem}.png"));
    image::GrayImage::new(64, 64).save(&image_path).unwrap();
    fs::write(dir.join(format!("{stem}.txt")), text).unwrap();
    fs::write(dir.join(format!("{stem}.tsv")), PAGE_TSV).unwrap();
    image_path
}

fn process_args(dir: &Path, image: &Path) -> Vec<String> {
    vec![
        "process".to_string(),
        image.display().to_string(),
        "--text".to_string(),
        dir.join("page.txt").display().to_string(),
        "--tokens".to_string(),
        dir.join("page.tsv").display().to_string(),
    ]
}

#[test]
fn process_outputs_json() {
    let dir = TempDir::new().unwrap();
    let image = write_page(dir.path(), "page", PAGE_TEXT);

    let output = stmtx(dir.path())
        .args(process_args(dir.path(), &image))
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let statement = &json["statement"];
    assert_eq!(statement["bank_name"], "PUBLIC");
    assert_eq!(statement["statement_date"], "2024-01-31");
    assert_eq!(statement["address"], "MR TAN\nKUALA LUMPUR");
    assert_eq!(statement["transactions"].as_array().unwrap().len(), 3);
    assert_eq!(json["dropped_rows"], 0);
}

#[test]
fn process_outputs_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let image = write_page(dir.path(), "page", PAGE_TEXT);
    let out = dir.path().join("out.csv");

    stmtx(dir.path())
        .args(process_args(dir.path(), &image))
        .args(["-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("bank,statement_date,date,type,amount\n"));
    assert!(csv.contains("PUBLIC,2024-01-31,2024-01-03,debit,-100.00"));
    assert!(csv.contains("PUBLIC,2024-01-31,2024-01-15,credit,1000.00"));
}

#[test]
fn process_reports_validation_issues() {
    let dir = TempDir::new().unwrap();
    let text = PAGE_TEXT.replace("No. of Debits 2", "No. of Debits 4");
    let image = write_page(dir.path(), "page", &text);

    stmtx(dir.path())
        .args(process_args(dir.path(), &image))
        .arg("--validate")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Found 2 debit transactions but statement lists 4",
        ));
}

#[test]
fn process_rejects_unsupported_bank() {
    let dir = TempDir::new().unwrap();
    let text = PAGE_TEXT.replace("PUBLIC BANK", "ACME BANK");
    let image = write_page(dir.path(), "page", &text);

    stmtx(dir.path())
        .args(process_args(dir.path(), &image))
        .assert()
        .failure()
        .stderr(predicate::str::contains("statements from ACME BANK are not supported"));
}

#[test]
fn process_missing_input() {
    let dir = TempDir::new().unwrap();

    stmtx(dir.path())
        .args(["process", "no-such-page.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");
    write_page(dir.path(), "jan", PAGE_TEXT);
    write_page(dir.path(), "feb", &PAGE_TEXT.replace("PUBLIC BANK", "ACME BANK"));

    stmtx(dir.path())
        .arg("batch")
        .arg(dir.path().join("*.png").display().to_string())
        .arg("-o")
        .arg(&out_dir)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(out_dir.join("jan.json").is_file());
    assert!(!out_dir.join("feb.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("jan.png,success,PUBLIC,2024-01-31,2,1,0"));
    assert!(summary.contains("feb.png,error"));
}

#[test]
fn batch_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), "bad", "Statement Date 31 Jan 2024");

    stmtx(dir.path())
        .arg("batch")
        .arg(dir.path().join("*.png").display().to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("stmtx.json");

    stmtx(dir.path())
        .args(["config", "init", "-o"])
        .arg(&config_path)
        .assert()
        .success();
    assert!(config_path.is_file());

    stmtx(dir.path())
        .args(["config", "init", "-o"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    stmtx(dir.path())
        .args(["config", "get", "extraction.supported_banks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PUBLIC\""));
}

#[test]
fn config_file_overrides_supported_banks() {
    let dir = TempDir::new().unwrap();
    let image = write_page(dir.path(), "page", &PAGE_TEXT.replace("PUBLIC BANK", "RHB BANK"));
    let config_path = dir.path().join("stmtx.json");
    fs::write(
        &config_path,
        r#"{"extraction": {"supported_banks": ["PUBLIC", "RHB"]}}"#,
    )
    .unwrap();

    stmtx(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(process_args(dir.path(), &image))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "profile selection is not implemented for RHB BANK",
        ));
}

#[test]
fn config_get_honors_config_flag() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("stmtx.json");
    fs::write(
        &config_path,
        r#"{"extraction": {"supported_banks": ["PUBLIC", "RHB"]}}"#,
    )
    .unwrap();

    stmtx(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["config", "get", "extraction.supported_banks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"RHB\""));

    stmtx(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stmtx.json"))
        .stdout(predicate::str::contains("exists"));
}
