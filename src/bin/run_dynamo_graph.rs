use dynamo_cli_tools::{Mode, cli};

fn main() {
    cli::run(Mode::Run);
}
