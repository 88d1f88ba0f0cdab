//! CLI command parsing and end-to-end tests.
//!
//! Argument parsing is checked with clap `try_parse_from` on structs that
//! mirror the binary's. The workflow tests run the built `krump` binary in
//! a scratch directory.

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};

    #[derive(Parser)]
    #[command(name = "krump")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[arg(long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Decode {
            #[arg(short, long, required_unless_present = "table")]
            input: Option<String>,
            #[arg(long, default_value = "3")]
            top: usize,
            #[arg(short, long, default_value = "table")]
            format: String,
            #[arg(long)]
            table: bool,
            #[arg(long, default_value = "3", requires = "table")]
            width: usize,
        },
        Render {
            #[arg(short, long)]
            input: String,
            #[arg(short, long, conflicts_with = "output_dir")]
            output: Option<String>,
            #[arg(long)]
            output_dir: Option<String>,
            #[arg(short, long)]
            preset: Option<String>,
            #[arg(short, long)]
            theme: Option<String>,
            #[arg(long)]
            width: Option<u32>,
            #[arg(long)]
            id: Option<String>,
            #[arg(long)]
            logo: Option<String>,
            #[arg(long)]
            mascot: Option<String>,
        },
        Mock {
            #[arg(short, long, default_value = "1024")]
            shots: u64,
            #[arg(short, long, default_value = "Bell State")]
            circuit: String,
            #[arg(short, long)]
            output: Option<String>,
        },
        Version,
    }

    #[test]
    fn test_decode_defaults() {
        let cli = TestCli::try_parse_from(["krump", "decode", "-i", "result.json"]).unwrap();
        match cli.command {
            TestCommands::Decode {
                input,
                top,
                format,
                table,
                width,
            } => {
                assert_eq!(input.as_deref(), Some("result.json"));
                assert_eq!(top, 3);
                assert_eq!(format, "table");
                assert!(!table);
                assert_eq!(width, 3);
            }
            _ => panic!("Expected Decode command"),
        }
    }

    #[test]
    fn test_decode_requires_input_or_table() {
        assert!(TestCli::try_parse_from(["krump", "decode"]).is_err());

        let cli = TestCli::try_parse_from(["krump", "decode", "--table", "--width", "2"]).unwrap();
        match cli.command {
            TestCommands::Decode { table, width, .. } => {
                assert!(table);
                assert_eq!(width, 2);
            }
            _ => panic!("Expected Decode command"),
        }
    }

    #[test]
    fn test_decode_width_requires_table() {
        let result =
            TestCli::try_parse_from(["krump", "decode", "-i", "r.json", "--width", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_all_options() {
        let cli = TestCli::try_parse_from([
            "krump",
            "render",
            "-i",
            "result.json",
            "-o",
            "card.svg",
            "-p",
            "card",
            "-t",
            "krump",
            "--width",
            "640",
            "--id",
            "run-7",
            "--logo",
            "https://example.com/logo.png",
            "--mascot",
            "mascot.png",
        ])
        .unwrap();

        match cli.command {
            TestCommands::Render {
                input,
                output,
                output_dir,
                preset,
                theme,
                width,
                id,
                logo,
                mascot,
            } => {
                assert_eq!(input, "result.json");
                assert_eq!(output.as_deref(), Some("card.svg"));
                assert!(output_dir.is_none());
                assert_eq!(preset.as_deref(), Some("card"));
                assert_eq!(theme.as_deref(), Some("krump"));
                assert_eq!(width, Some(640));
                assert_eq!(id.as_deref(), Some("run-7"));
                assert_eq!(logo.as_deref(), Some("https://example.com/logo.png"));
                assert_eq!(mascot.as_deref(), Some("mascot.png"));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_render_output_conflicts_with_output_dir() {
        let result = TestCli::try_parse_from([
            "krump",
            "render",
            "-i",
            "r.json",
            "-o",
            "a.svg",
            "--output-dir",
            "out",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_requires_input() {
        assert!(TestCli::try_parse_from(["krump", "render"]).is_err());
    }

    #[test]
    fn test_mock_defaults() {
        let cli = TestCli::try_parse_from(["krump", "mock"]).unwrap();
        match cli.command {
            TestCommands::Mock {
                shots,
                circuit,
                output,
            } => {
                assert_eq!(shots, 1024);
                assert_eq!(circuit, "Bell State");
                assert!(output.is_none());
            }
            _ => panic!("Expected Mock command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            TestCli::try_parse_from(["krump", "version", "-vv", "--config", "krump.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("krump.yaml")));
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["krump", "dance"]).is_err());
    }
}

// ============================================================================
// End-to-end workflow through the binary
// ============================================================================

mod workflow {
    use std::path::{Path, PathBuf};
    use std::process::{Command, Output};

    use serde_json::Value;
    use tempfile::tempdir;

    fn krump_bin() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_krump"))
    }

    /// Run `krump` in `dir` with a clean home and no `KRUMP_*` overrides.
    fn run(dir: &Path, args: &[&str]) -> Output {
        let mut cmd = Command::new(krump_bin());
        cmd.args(args).current_dir(dir).env("HOME", dir);
        for (key, _) in std::env::vars() {
            if key.starts_with("KRUMP_") {
                cmd.env_remove(key);
            }
        }
        cmd.output().expect("run krump")
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    #[test]
    fn test_mock_prints_envelope() {
        let dir = tempdir().unwrap();
        let output = run(dir.path(), &["mock", "--shots", "7"]);
        assert!(output.status.success(), "{}", stderr(&output));

        let envelope: Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(envelope["result"]["measurements"]["00"], 4);
        assert_eq!(envelope["result"]["measurements"]["11"], 3);
        assert_eq!(envelope["metadata"]["circuit"], "Bell State");
        assert_eq!(envelope["metadata"]["shots"], 7);
    }

    #[test]
    fn test_mock_decode_render() {
        let dir = tempdir().unwrap();
        let result_path = dir.path().join("bell.json");
        let result_arg = result_path.to_str().unwrap();

        let output = run(dir.path(), &["mock", "-o", result_arg]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(result_path.exists());

        let output = run(dir.path(), &["decode", "-i", result_arg, "-f", "json"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["moves"].as_array().unwrap().len(), 2);
        assert_eq!(report["sequence"].as_array().unwrap().len(), 2);

        let svg_path = dir.path().join("out").join("bell.svg");
        let output = run(
            dir.path(),
            &[
                "render",
                "-i",
                result_arg,
                "-p",
                "card",
                "-o",
                svg_path.to_str().unwrap(),
            ],
        );
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("Saved"));

        let svg = std::fs::read_to_string(&svg_path).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("Bell State"));
        assert!(svg.contains("50.00%"));
    }

    #[test]
    fn test_render_uses_suggested_filename() {
        let dir = tempdir().unwrap();
        let result_path = dir.path().join("bell.json");
        let result_arg = result_path.to_str().unwrap();

        assert!(run(dir.path(), &["mock", "-o", result_arg]).status.success());

        let out_dir = dir.path().join("reports");
        let output = run(
            dir.path(),
            &[
                "render",
                "-i",
                result_arg,
                "--output-dir",
                out_dir.to_str().unwrap(),
                "--id",
                "e2e",
            ],
        );
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(out_dir.join("krump-results-bell-state-e2e.svg").exists());
    }

    #[test]
    fn test_decode_table_listing() {
        let dir = tempdir().unwrap();
        let output = run(dir.path(), &["decode", "--table", "-f", "json"]);
        assert!(output.status.success(), "{}", stderr(&output));

        let rows: Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempdir().unwrap();
        let output = run(dir.path(), &["decode", "-i", "nope.json"]);
        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Error:"));
        assert!(stderr(&output).contains("File not found"));
    }

    #[test]
    fn test_unknown_outcome_fails_card_render() {
        let dir = tempdir().unwrap();
        let result_path = dir.path().join("odd.json");
        std::fs::write(
            &result_path,
            r#"{"measurements": {"0102": 5}, "probabilities": {"0102": 1.0}}"#,
        )
        .unwrap();

        let svg_path = dir.path().join("odd.svg");
        let output = run(
            dir.path(),
            &[
                "render",
                "-i",
                result_path.to_str().unwrap(),
                "-p",
                "card",
                "-o",
                svg_path.to_str().unwrap(),
            ],
        );
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Error:"));
        assert!(!stdout(&output).contains("Saved"));
        assert!(!svg_path.exists());
    }

    #[test]
    fn test_malformed_envelope_is_not_rendered() {
        let dir = tempdir().unwrap();
        let result_path = dir.path().join("float_counts.json");
        std::fs::write(
            &result_path,
            r#"{"result": {"measurements": {"00": 512.0, "11": 512.0}, "circuit": "Bell"},
                "metadata": {"circuit": "Bell"}}"#,
        )
        .unwrap();

        let svg_path = dir.path().join("bell.svg");
        let output = run(
            dir.path(),
            &[
                "render",
                "-i",
                result_path.to_str().unwrap(),
                "-o",
                svg_path.to_str().unwrap(),
            ],
        );
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("envelope"));
        assert!(!stdout(&output).contains("Saved"));
        assert!(!svg_path.exists());

        let output = run(
            dir.path(),
            &["decode", "-i", result_path.to_str().unwrap(), "-f", "json"],
        );
        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("krump.yaml");
        std::fs::write(&config_path, "report:\n  width: 10\n").unwrap();

        let output = run(
            dir.path(),
            &["--config", config_path.to_str().unwrap(), "version"],
        );
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("width"));
    }
}
