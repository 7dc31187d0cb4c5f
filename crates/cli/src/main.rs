use std::process::ExitCode;

fn main() -> ExitCode {
    agentscout_cli::run()
}
