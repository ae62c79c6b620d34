use anyhow::Result;
use line_grouper::LineGrouper;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn run(grouper: &mut LineGrouper, content: &str) -> Result<(usize, String)> {
    let tmp = tempfile::tempdir()?;
    let (input, output) = paths(&tmp, "test.txt");
    fs::write(&input, content)?;
    let groups = grouper.process_file(&input, &output)?;
    Ok((groups, fs::read_to_string(&output)?))
}

fn paths(tmp: &TempDir, name: &str) -> (PathBuf, PathBuf) {
    (tmp.path().join(name), tmp.path().join("output.txt"))
}

#[test]
fn basic_grouping() -> Result<()> {
    let (groups, out) = run(
        &mut LineGrouper::new(),
        "111;123;222\n200;123;100\n300;;100\n400;500;600\n",
    )?;
    assert_eq!(groups, 1);
    assert!(out.contains("111;123;222"));
    assert!(out.contains("200;123;100"));
    assert!(out.contains("300;;100"));
    assert!(!out.contains("400;500;600"));
    Ok(())
}

#[test]
fn different_positions_not_grouped() -> Result<()> {
    let (groups, out) = run(&mut LineGrouper::new(), "100;200;300\n200;300;100\n")?;
    assert_eq!(groups, 0);
    assert_eq!(out, "0\n\n");
    Ok(())
}

#[test]
fn duplicates_collapse() -> Result<()> {
    let (groups, _) = run(
        &mut LineGrouper::new(),
        "111;222;333\n111;222;333\n444;555;666\n",
    )?;
    assert_eq!(groups, 0);
    Ok(())
}

#[test]
fn malformed_quote_lines_excluded() -> Result<()> {
    let content = r#"111;222;333
"8383"200000741652251"
111;555;666
"79855053897"83100000580443402";"200000133000191"
777;222;999
"#;
    let (groups, out) = run(&mut LineGrouper::new(), content)?;
    assert_eq!(groups, 1);
    assert!(out.contains("111;222;333"));
    assert!(out.contains("111;555;666"));
    assert!(out.contains("777;222;999"));
    assert!(!out.contains("8383"));
    assert!(!out.contains("79855053897"));
    Ok(())
}

#[test]
fn malformed_lines_do_not_count_values() -> Result<()> {
    // The only other "42" is on a malformed line.
    let content = "42;a\n\"1\"2\";42\n";
    let (groups, _) = run(&mut LineGrouper::new(), content)?;
    assert_eq!(groups, 0);
    Ok(())
}

#[test]
fn quotes_are_stripped() -> Result<()> {
    let (groups, out) = run(
        &mut LineGrouper::new(),
        "\"111\";\"222\";\"333\"\n444;222;555\n666;777;888\n",
    )?;
    assert_eq!(groups, 1);
    assert!(out.contains("111;222;333"));
    assert!(out.contains("444;222;555"));
    assert!(!out.contains('"'));
    Ok(())
}

#[test]
fn empty_values_never_join() -> Result<()> {
    let (groups, out) = run(&mut LineGrouper::new(), "111;;333\n222;;444\n;;\n555;666;\n")?;
    assert_eq!(groups, 0);
    assert!(!out.contains(";;"));
    Ok(())
}

#[test]
fn two_transitive_groups() -> Result<()> {
    let (groups, out) = run(&mut LineGrouper::new(), "A;B;C\nD;B;E\nF;G;C\nH;I;J\nK;I;L\n")?;
    assert_eq!(groups, 2);
    for line in ["A;B;C", "D;B;E", "F;G;C", "H;I;J", "K;I;L"] {
        assert!(out.contains(line));
    }
    assert_eq!(
        out,
        "2\n\nГруппа 1\nA;B;C\nD;B;E\nF;G;C\n\nГруппа 2\nH;I;J\nK;I;L\n\n"
    );
    Ok(())
}

#[test]
fn custom_delimiter() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let (input, output) = paths(&tmp, "test.csv");
    fs::write(&input, "111,222,333\n444,222,555\n")?;

    let mut grouper = LineGrouper::new();
    grouper.set_delimiter(",")?;
    assert_eq!(grouper.process_file(&input, &output)?, 1);
    Ok(())
}

#[test]
fn empty_file() -> Result<()> {
    let (groups, out) = run(&mut LineGrouper::new(), "")?;
    assert_eq!(groups, 0);
    assert!(out.starts_with('0'));
    Ok(())
}

#[test]
fn all_invalid_file() -> Result<()> {
    let mut grouper = LineGrouper::new();
    let (groups, out) = run(&mut grouper, "\n  \n;;;\n\"\";\"\"\n")?;
    assert_eq!(groups, 0);
    assert_eq!(out, "0\n\n");
    let stats = grouper.last_stats().expect("stats after run");
    assert_eq!(stats.retained_lines, 0);
    assert_eq!(stats.rejected_lines(), 4);
    Ok(())
}

#[test]
fn crlf_input() -> Result<()> {
    let (groups, out) = run(&mut LineGrouper::new(), "1;a\r\n2;a\r\n")?;
    assert_eq!(groups, 1);
    assert!(!out.contains('\r'));
    Ok(())
}

#[test]
fn lone_carriage_return_ends_lines() -> Result<()> {
    let (groups, out) = run(&mut LineGrouper::new(), "1;a\r2;a\r")?;
    assert_eq!(groups, 1);
    assert_eq!(out, "1\n\nГруппа 1\n1;a\n2;a\n\n");
    Ok(())
}

#[test]
fn control_separator_is_trimmed_from_fields() -> Result<()> {
    let (groups, out) = run(&mut LineGrouper::new(), "x;\u{1f}v\ny;v")?;
    assert_eq!(groups, 1);
    assert!(out.contains("x;\u{1f}v"));
    Ok(())
}

#[test]
fn no_break_space_is_content() -> Result<()> {
    let (groups, _) = run(&mut LineGrouper::new(), "x;\u{a0}v\ny;v")?;
    assert_eq!(groups, 0);
    Ok(())
}

#[test]
fn missing_input_fails_without_output() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let (input, output) = paths(&tmp, "absent.txt");
    let err = LineGrouper::new().process_file(&input, &output).unwrap_err();
    assert!(format!("{err:#}").contains("open"));
    assert!(!output.exists());
    Ok(())
}
