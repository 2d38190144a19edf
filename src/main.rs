use std::{env, fs::read_to_string, path::Path, process::exit};

use rookc::{parse_with_config, FrontendConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: {} <file.rook>", args[0]);
        exit(2);
    }

    let file_path = Path::new(&args[1]);
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args[1].clone());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("failed to read {}: {}", file_path.display(), err);
            exit(1);
        }
    };

    let config = FrontendConfig::from_env();
    let (root, mut report) = parse_with_config(&source, &file_name, &config);

    print!("{}", root);

    let summary = format!(
        "{} error(s), {} warning(s) in {}",
        report.error_count(),
        report.warning_count(),
        file_name
    );
    report.info(summary);

    if report.has_errors() {
        exit(1);
    }
}
