//! Tests for argument parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use gridsynth::io::cli::{Cli, FileProcessor, load_document, save_document};
    use gridsynth::io::preset::demo_synthesizer;
    use gridsynth::{ErrorKind, Symbol, Synthesizer, Transformation};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gridsynth").chain(args.iter().copied())).unwrap()
    }

    fn run(args: &[&str]) -> gridsynth::Result<()> {
        FileProcessor::new(parse(args)).process()
    }

    fn path_arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    // Tests defaults and flag parsing
    #[test]
    fn test_parse_arguments() {
        let cli = parse(&["level.json"]);
        assert_eq!(cli.target, PathBuf::from("level.json"));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.cell_size, 8);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
        assert_eq!(cli.default_log_level(), "info");

        let cli = parse(&["dir", "-s", "42", "-p", "-c", "4", "-q", "-n"]);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.png);
        assert_eq!(cli.cell_size, 4);
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
        assert_eq!(cli.default_log_level(), "warn");

        assert_eq!(parse(&["x", "--verbose"]).default_log_level(), "debug");
        assert!(parse(&["x", "--init"]).init);
    }

    // Tests a missing target is a parse error
    #[test]
    fn test_parse_requires_target() {
        assert!(Cli::try_parse_from(["gridsynth"]).is_err());
    }

    // Tests result paths sit next to the input with the suffix appended
    #[test]
    fn test_get_output_path() {
        assert_eq!(
            FileProcessor::get_output_path(Path::new("maps/cave.json"), "json"),
            PathBuf::from("maps/cave_result.json")
        );
        assert_eq!(
            FileProcessor::get_output_path(Path::new("cave.json"), "png"),
            PathBuf::from("cave_result.png")
        );
    }

    // Tests documents written to disk load back unchanged
    #[test]
    fn test_save_and_load_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let synthesizer = demo_synthesizer().unwrap();

        save_document(&synthesizer, &path).unwrap();

        assert_eq!(load_document(&path).unwrap(), synthesizer);
        let err = load_document(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    // Tests --init writes the demo and refuses to overwrite without --no-skip
    #[test]
    fn test_init_writes_preset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.json");

        run(&[path_arg(&path), "--init", "-q"]).unwrap();
        assert_eq!(load_document(&path).unwrap(), demo_synthesizer().unwrap());

        assert!(run(&[path_arg(&path), "--init", "-q"]).is_err());
        run(&[path_arg(&path), "--init", "-q", "--no-skip"]).unwrap();
    }

    // Tests a single file is synthesized into a result document and image
    #[test]
    fn test_process_single_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("demo.json");
        save_document(&demo_synthesizer().unwrap(), &input).unwrap();

        run(&[path_arg(&input), "-q", "-s", "7", "-p", "-c", "2"]).unwrap();

        let result = load_document(&dir.path().join("demo_result.json")).unwrap();
        assert!(result.grid().iter().all(|cell| cell == 1 || cell == 2));
        assert!(dir.path().join("demo_result.png").exists());

        // Input is untouched
        assert!(load_document(&input).unwrap().grid().all(0));
    }

    // Tests seeded runs produce identical results
    #[test]
    fn test_process_seeded_is_reproducible() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("demo.json");
        save_document(&demo_synthesizer().unwrap(), &input).unwrap();
        let output = dir.path().join("demo_result.json");

        run(&[path_arg(&input), "-q", "-s", "11"]).unwrap();
        let first = load_document(&output).unwrap();
        run(&[path_arg(&input), "-q", "-s", "11", "-n"]).unwrap();
        let second = load_document(&output).unwrap();

        assert_eq!(first, second);
    }

    // Tests directory processing skips results and files with existing output
    #[test]
    fn test_process_directory() {
        let dir = TempDir::new().unwrap();
        let fresh = dir.path().join("a.json");
        let done = dir.path().join("b.json");
        save_document(&demo_synthesizer().unwrap(), &fresh).unwrap();
        save_document(&demo_synthesizer().unwrap(), &done).unwrap();

        let marker = Synthesizer::new(1, 1, 9).unwrap();
        save_document(&marker, &dir.path().join("b_result.json")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        run(&[path_arg(dir.path()), "-q", "-s", "1"]).unwrap();

        assert!(dir.path().join("a_result.json").exists());
        assert_eq!(
            load_document(&dir.path().join("b_result.json")).unwrap(),
            marker
        );
        assert!(!dir.path().join("a_result_result.json").exists());
        assert!(!dir.path().join("b_result_result.json").exists());
    }

    // Tests failures in synthesis are reported and produce no output
    #[test]
    fn test_process_reports_synthesis_errors() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.json");
        let mut synthesizer = Synthesizer::new(2, 2, 0).unwrap();
        synthesizer.add_transformation(Transformation::random("Noise"));
        save_document(&synthesizer, &input).unwrap();

        let err = run(&[path_arg(&input), "-q"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!dir.path().join("broken_result.json").exists());

        synthesizer.alphabet_mut().add_symbol(Symbol::new(4, "D"));
        save_document(&synthesizer, &input).unwrap();
        run(&[path_arg(&input), "-q"]).unwrap();
        assert!(dir.path().join("broken_result.json").exists());
    }

    // Tests targets that are neither documents nor directories are rejected
    #[test]
    fn test_invalid_targets() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "x").unwrap();

        assert_eq!(run(&[path_arg(&text), "-q"]).unwrap_err().kind(), ErrorKind::Config);
        assert!(run(&[path_arg(&dir.path().join("missing")), "-q"]).is_err());
    }
}
