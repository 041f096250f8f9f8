use clap::Parser;
use spring_animator_lib::Cli;

fn main() -> anyhow::Result<()> {
    spring_animator_lib::run(Cli::parse())
}
