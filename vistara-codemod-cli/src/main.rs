use clap::Parser;
use vistara_codemod_core::{execute, style, CoreCliArgs};

#[tokio::main]
async fn main() {
    // usage errors exit 1, --help and --version exit 0
    let cli_args = match CoreCliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    match execute(cli_args).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!(
                "{} {}",
                style("❌ vistara-codemod failed:").red().bold(),
                style(format!("{e:#}")).red()
            );
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors_go_to_stderr() {
        let error = CoreCliArgs::try_parse_from(["vistara-codemod", "migrate", "a.jsx"]).unwrap_err();
        assert!(error.use_stderr());

        let help = CoreCliArgs::try_parse_from(["vistara-codemod", "--help"]).unwrap_err();
        assert!(!help.use_stderr());
    }
}
