#[cfg(feature = "compression-gzip")]
mod gzip_input {
    use anyhow::Result;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use line_grouper::io::open_lines;
    use line_grouper::LineGrouper;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;

    fn write_gzip(path: &Path, content: &str) -> Result<()> {
        let mut enc = GzEncoder::new(File::create(path)?, Compression::default());
        enc.write_all(content.as_bytes())?;
        enc.finish()?;
        Ok(())
    }

    #[test]
    fn gzip_by_extension() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let input = tmp.path().join("test.txt.gz");
        let output = tmp.path().join("output.txt");
        write_gzip(&input, "111;222;333\n444;222;555\n")?;

        assert_eq!(LineGrouper::new().process_file(&input, &output)?, 1);
        let out = fs::read_to_string(&output)?;
        assert!(out.contains("111;222;333"));
        Ok(())
    }

    #[test]
    fn gzip_by_content() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let input = tmp.path().join("disguised.txt");
        write_gzip(&input, "a;1\nb;1\n")?;

        let lines = open_lines(&input)?.collect::<std::io::Result<Vec<_>>>()?;
        assert_eq!(lines, vec!["a;1", "b;1"]);
        Ok(())
    }

    #[test]
    fn uppercase_extension() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let input = tmp.path().join("DATA.GZIP");
        write_gzip(&input, "x;y\n")?;
        assert_eq!(open_lines(&input)?.count(), 1);
        Ok(())
    }

    #[test]
    fn corrupt_gzip_fails() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let input = tmp.path().join("broken.gz");
        let output = tmp.path().join("output.txt");
        fs::write(&input, [0x1f, 0x8b, 0x08, 0x00, 0xde, 0xad])?;

        assert!(LineGrouper::new().process_file(&input, &output).is_err());
        assert!(!output.exists());
        Ok(())
    }
}
