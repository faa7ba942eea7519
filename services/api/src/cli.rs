use crate::report::{run_audit_report, AuditReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use site_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Site Audit",
    about = "Rank SEO and performance recommendations for audited websites",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with audit results from the command line
    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// Print ranked recommendations and a summary for an audit result file
    Report(AuditReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Audit {
            command: AuditCommand::Report(args),
        } => run_audit_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["site-audit"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_audit_report_flags() {
        let cli = Cli::try_parse_from([
            "site-audit",
            "audit",
            "report",
            "--input",
            "audit.json",
            "--format",
            "csv",
            "--impact",
            "high",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Audit {
                command: AuditCommand::Report(args),
            }) => {
                assert_eq!(args.input.as_deref(), Some(std::path::Path::new("audit.json")));
                assert_eq!(args.format, crate::report::OutputFormat::Csv);
                assert_eq!(args.impact, Some(crate::report::ImpactArg::High));
            }
            other => panic!("expected audit report command, got {other:?}"),
        }
    }
}
